//! Response envelopes, JSON rendering and transport framing.
//!
//! # Responsibilities
//! - Sample the wall clock (timestamp) and monotonic clock (elapsed)
//! - Render success/failure envelopes as single-line JSON in a fixed key order
//! - Frame the body for the host: bare body, CGI header block, or full HTTP
//!
//! # Design Decisions
//! - Numbers are written with fixed decimals through `RawValue`, so `1` is
//!   reported as `1.00` independently of any locale
//! - Key vocabulary is a deployment choice (`LabelSet`), not a separate type

use std::fmt;
use std::time::{Duration, Instant};

use serde::ser::{Error as _, SerializeMap};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::check::predicate::Verdict;
use crate::check::validator::ValidatedInput;
use crate::config::{CheckConfig, TimingConfig};

/// Decimals used for `x`, `y` and `r`.
pub const COORDINATE_PRECISION: usize = 2;

pub const CONTENT_TYPE_JSON: &str = "application/json";

const VERDICT_EXISTS: &str = "Exists";
const VERDICT_MISSING: &str = "Does not exist";

/// JSON vocabulary of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSet {
    /// `"hit": <bool>` and `"executionTime"`.
    Hit,
    /// `"result": "Exists" | "Does not exist"` and `"time"`.
    Result,
}

impl LabelSet {
    pub fn verdict_key(self) -> &'static str {
        match self {
            LabelSet::Hit => "hit",
            LabelSet::Result => "result",
        }
    }

    pub fn elapsed_key(self) -> &'static str {
        match self {
            LabelSet::Hit => "executionTime",
            LabelSet::Result => "time",
        }
    }
}

/// Unit of the reported execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum TimingUnit {
    #[default]
    #[serde(rename = "ms")]
    Millis,
    #[serde(rename = "us")]
    Micros,
}

impl TimingUnit {
    pub fn measure(self, elapsed: Duration) -> f64 {
        match self {
            TimingUnit::Millis => elapsed.as_secs_f64() * 1_000.0,
            TimingUnit::Micros => elapsed.as_secs_f64() * 1_000_000.0,
        }
    }
}

/// Which parts of the response the core writes itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FramingMode {
    /// JSON body only; the host supplies status line and headers.
    Body,
    /// CGI header block and body; the host supplies the status line.
    #[default]
    Cgi,
    /// Status line, headers with `Content-Length`, and body.
    Http,
}

/// Status signalled to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
        }
    }

    pub fn reason_phrase(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason_phrase())
    }
}

/// Everything a single request produced, ready to serialize.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success {
        input: ValidatedInput,
        verdict: Verdict,
        timestamp: String,
        elapsed: Duration,
    },
    Failure {
        reason: String,
        elapsed: Option<Duration>,
    },
}

impl Envelope {
    pub fn status(&self) -> Status {
        match self {
            Envelope::Success { .. } => Status::Ok,
            Envelope::Failure { .. } => Status::BadRequest,
        }
    }
}

/// Serialized response body plus the status it must be sent with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePayload {
    pub status: Status,
    pub body: String,
}

impl ResponsePayload {
    pub fn content_type(&self) -> &'static str {
        CONTENT_TYPE_JSON
    }
}

/// Builds envelopes and turns them into bytes.
#[derive(Debug, Clone)]
pub struct ResponseFormatter {
    labels: LabelSet,
    timing: TimingConfig,
    framing: FramingMode,
    timestamp_format: String,
}

impl ResponseFormatter {
    pub fn new(config: &CheckConfig) -> Self {
        Self {
            labels: config.effective_labels(),
            timing: config.timing.clone(),
            framing: config.framing,
            timestamp_format: config.timestamp_format.clone(),
        }
    }

    /// Success envelope; stamps the current local time and elapsed time.
    pub fn success(&self, input: ValidatedInput, verdict: Verdict, started: Instant) -> Envelope {
        let timestamp = chrono::Local::now()
            .format(&self.timestamp_format)
            .to_string();
        Envelope::Success {
            input,
            verdict,
            timestamp,
            elapsed: started.elapsed(),
        }
    }

    /// Failure envelope; elapsed time only when the deployment reports it.
    pub fn failure(&self, reason: String, started: Instant) -> Envelope {
        Envelope::Failure {
            reason,
            elapsed: self.timing.include_on_failure.then(|| started.elapsed()),
        }
    }

    /// Serialize an envelope into a single-line JSON payload.
    pub fn payload(&self, envelope: &Envelope) -> ResponsePayload {
        let body = serde_json::to_string(&EnvelopeJson {
            envelope,
            formatter: self,
        })
        .unwrap_or_else(|e| {
            // Unreachable for finite numbers; keep the response well-formed.
            tracing::error!(error = %e, "Failed to serialize envelope");
            format!(r#"{{"error":"{}"}}"#, crate::check::GENERIC_REASON)
        });
        ResponsePayload {
            status: envelope.status(),
            body,
        }
    }

    /// Frame a payload according to the configured mode.
    pub fn frame(&self, payload: &ResponsePayload) -> Vec<u8> {
        frame_as(self.framing, payload)
    }

    fn elapsed_value(&self, elapsed: Duration) -> Fixed {
        Fixed {
            value: self.timing.unit.measure(elapsed),
            precision: self.timing.precision,
        }
    }
}

/// Frame a payload in an explicit mode.
pub fn frame_as(framing: FramingMode, payload: &ResponsePayload) -> Vec<u8> {
    let mut out = String::with_capacity(payload.body.len() + 96);
    match framing {
        FramingMode::Body => {}
        FramingMode::Cgi => {
            if payload.status != Status::Ok {
                out.push_str(&format!("Status: {}\r\n", payload.status));
            }
            out.push_str(&format!("Content-Type: {}\r\n\r\n", payload.content_type()));
        }
        FramingMode::Http => {
            out.push_str(&format!("HTTP/1.1 {}\r\n", payload.status));
            out.push_str(&format!("Content-Type: {}\r\n", payload.content_type()));
            out.push_str(&format!("Content-Length: {}\r\n\r\n", payload.body.len()));
        }
    }
    out.push_str(&payload.body);
    out.into_bytes()
}

/// A number rendered with a fixed count of decimals.
struct Fixed {
    value: f64,
    precision: usize,
}

impl Serialize for Fixed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = format!("{:.*}", self.precision, self.value);
        let raw = RawValue::from_string(text).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}

fn coordinate(value: f64) -> Fixed {
    Fixed {
        value,
        precision: COORDINATE_PRECISION,
    }
}

struct EnvelopeJson<'a> {
    envelope: &'a Envelope,
    formatter: &'a ResponseFormatter,
}

impl Serialize for EnvelopeJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let labels = self.formatter.labels;
        match self.envelope {
            Envelope::Success {
                input,
                verdict,
                timestamp,
                elapsed,
            } => {
                let mut map = serializer.serialize_map(Some(6))?;
                map.serialize_entry("x", &coordinate(input.x))?;
                map.serialize_entry("y", &coordinate(input.y))?;
                map.serialize_entry("r", &coordinate(input.r))?;
                match labels {
                    LabelSet::Hit => map.serialize_entry(labels.verdict_key(), &verdict.member)?,
                    LabelSet::Result => {
                        let text = if verdict.member {
                            VERDICT_EXISTS
                        } else {
                            VERDICT_MISSING
                        };
                        map.serialize_entry(labels.verdict_key(), text)?
                    }
                }
                map.serialize_entry("currentTime", timestamp)?;
                map.serialize_entry(labels.elapsed_key(), &self.formatter.elapsed_value(*elapsed))?;
                map.end()
            }
            Envelope::Failure { reason, elapsed } => {
                let mut map = serializer.serialize_map(Some(1 + usize::from(elapsed.is_some())))?;
                map.serialize_entry("error", reason)?;
                if let Some(elapsed) = elapsed {
                    map.serialize_entry(labels.elapsed_key(), &self.formatter.elapsed_value(*elapsed))?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter(labels: Option<LabelSet>, precision: usize, include_on_failure: bool) -> ResponseFormatter {
        let mut config = CheckConfig::default();
        config.labels = labels;
        config.timing.precision = precision;
        config.timing.include_on_failure = include_on_failure;
        ResponseFormatter::new(&config)
    }

    fn success(member: bool, elapsed: Duration) -> Envelope {
        Envelope::Success {
            input: ValidatedInput {
                x: 1.0,
                y: -0.5,
                r: 3.14159,
            },
            verdict: Verdict { member },
            timestamp: "2024-01-02 03:04:05".into(),
            elapsed,
        }
    }

    #[test]
    fn test_success_body_key_order() {
        let f = formatter(None, 4, true);
        let payload = f.payload(&success(true, Duration::from_micros(1500)));
        assert_eq!(payload.status, Status::Ok);
        assert_eq!(
            payload.body,
            r#"{"x":1.00,"y":-0.50,"r":3.14,"hit":true,"currentTime":"2024-01-02 03:04:05","executionTime":1.5000}"#
        );
    }

    #[test]
    fn test_result_labels() {
        let f = formatter(Some(LabelSet::Result), 0, true);
        let payload = f.payload(&success(false, Duration::from_millis(7)));
        assert_eq!(
            payload.body,
            r#"{"x":1.00,"y":-0.50,"r":3.14,"result":"Does not exist","currentTime":"2024-01-02 03:04:05","time":7}"#
        );
    }

    #[test]
    fn test_microsecond_unit() {
        let mut config = CheckConfig::default();
        config.timing.unit = TimingUnit::Micros;
        config.timing.precision = 1;
        let f = ResponseFormatter::new(&config);
        let body = f.payload(&success(true, Duration::from_nanos(2_500))).body;
        assert!(body.ends_with(r#""executionTime":2.5}"#), "{}", body);
    }

    #[test]
    fn test_failure_with_and_without_elapsed() {
        let envelope = Envelope::Failure {
            reason: "No POST data received.".into(),
            elapsed: Some(Duration::from_millis(2)),
        };
        let payload = formatter(None, 3, true).payload(&envelope);
        assert_eq!(payload.status, Status::BadRequest);
        assert_eq!(
            payload.body,
            r#"{"error":"No POST data received.","executionTime":2.000}"#
        );

        let started = Instant::now();
        let f = formatter(None, 3, false);
        let envelope = f.failure("bad".into(), started);
        assert_eq!(f.payload(&envelope).body, r#"{"error":"bad"}"#);
    }

    #[test]
    fn test_reason_is_json_escaped() {
        let envelope = Envelope::Failure {
            reason: r#"Parameter 'x' is not a finite number: 'a"b'."#.into(),
            elapsed: None,
        };
        let body = formatter(None, 0, false).payload(&envelope).body;
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["error"], r#"Parameter 'x' is not a finite number: 'a"b'."#);
    }

    #[test]
    fn test_body_parses_as_json() {
        let body = formatter(None, 4, true)
            .payload(&success(true, Duration::from_micros(10)))
            .body;
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["hit"], true);
        assert_eq!(parsed["r"].as_f64(), Some(3.14));
    }

    #[test]
    fn test_success_stamps_configured_format() {
        let mut config = CheckConfig::default();
        config.timestamp_format = "%Y".into();
        let f = ResponseFormatter::new(&config);
        let input = ValidatedInput { x: 0.0, y: 0.0, r: 1.0 };
        match f.success(input, Verdict { member: true }, Instant::now()) {
            Envelope::Success { timestamp, .. } => {
                assert_eq!(timestamp.len(), 4);
                assert!(timestamp.bytes().all(|b| b.is_ascii_digit()));
            }
            other => panic!("unexpected envelope {:?}", other),
        }
    }

    #[test]
    fn test_framing_modes() {
        let ok = ResponsePayload {
            status: Status::Ok,
            body: r#"{"hit":true}"#.into(),
        };
        let bad = ResponsePayload {
            status: Status::BadRequest,
            body: r#"{"error":"e"}"#.into(),
        };

        assert_eq!(frame_as(FramingMode::Body, &ok), ok.body.as_bytes());
        assert_eq!(
            String::from_utf8(frame_as(FramingMode::Cgi, &ok)).unwrap(),
            "Content-Type: application/json\r\n\r\n{\"hit\":true}"
        );
        assert_eq!(
            String::from_utf8(frame_as(FramingMode::Cgi, &bad)).unwrap(),
            "Status: 400 Bad Request\r\nContent-Type: application/json\r\n\r\n{\"error\":\"e\"}"
        );
        assert_eq!(
            String::from_utf8(frame_as(FramingMode::Http, &bad)).unwrap(),
            "HTTP/1.1 400 Bad Request\r\nContent-Type: application/json\r\nContent-Length: 13\r\n\r\n{\"error\":\"e\"}"
        );
    }
}

//! The request pipeline: decode → validate → evaluate → format.
//!
//! A `CheckService` is built once from configuration and shared by every
//! transport. It holds no per-request state, so concurrent calls never
//! interact.

use std::time::Instant;

use crate::check::decoder::decode_params;
use crate::check::error::{CheckError, ErrorVerbosity, InputSource};
use crate::check::formatter::{Envelope, ResponseFormatter, ResponsePayload};
use crate::check::predicate::{PredicateKind, Verdict};
use crate::check::validator::{validate, ValidatedInput};
use crate::config::CheckConfig;

#[derive(Debug, Clone)]
pub struct CheckService {
    predicate: PredicateKind,
    verbosity: ErrorVerbosity,
    formatter: ResponseFormatter,
}

impl CheckService {
    pub fn new(config: &CheckConfig) -> Self {
        Self {
            predicate: config.predicate,
            verbosity: config.verbosity,
            formatter: ResponseFormatter::new(config),
        }
    }

    pub fn predicate(&self) -> PredicateKind {
        self.predicate
    }

    /// Run one request through the pipeline.
    ///
    /// `raw` is `None` (or empty) when the transport received no parameters.
    /// `started` marks the request start used for the elapsed time.
    pub fn handle(&self, raw: Option<&[u8]>, origin: InputSource, started: Instant) -> ResponsePayload {
        let envelope = self.envelope(raw, origin, started);
        self.formatter.payload(&envelope)
    }

    /// Like [`CheckService::handle`], framed for hosts that take raw bytes.
    pub fn handle_framed(&self, raw: Option<&[u8]>, origin: InputSource, started: Instant) -> Vec<u8> {
        let payload = self.handle(raw, origin, started);
        self.formatter.frame(&payload)
    }

    /// Build the envelope for one request. Exactly one per call.
    pub fn envelope(&self, raw: Option<&[u8]>, origin: InputSource, started: Instant) -> Envelope {
        match self.evaluate(raw, origin) {
            Ok((input, verdict)) => {
                tracing::debug!(
                    predicate = self.predicate.as_str(),
                    x = input.x,
                    y = input.y,
                    r = input.r,
                    member = verdict.member,
                    "Check evaluated"
                );
                self.formatter.success(input, verdict, started)
            }
            Err(e) => {
                tracing::debug!(error = %e, origin = %origin, "Check rejected");
                self.formatter.failure(e.reason(self.verbosity), started)
            }
        }
    }

    fn evaluate(&self, raw: Option<&[u8]>, origin: InputSource) -> Result<(ValidatedInput, Verdict), CheckError> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(CheckError::MissingInput { origin }),
        };
        let params = decode_params(raw)?;
        let input = validate(&params)?;
        Ok((input, self.predicate.evaluate(&input)))
    }
}

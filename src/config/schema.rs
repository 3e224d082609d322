//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::check::formatter::{FramingMode, LabelSet, TimingUnit};
use crate::check::predicate::PredicateKind;
use crate::check::ErrorVerbosity;

/// Root configuration for the region check service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address, concurrency bound).
    pub listener: ListenerConfig,

    /// Pipeline strategies and response vocabulary.
    pub service: CheckConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum requests evaluated at once (backpressure).
    pub max_concurrent_requests: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_concurrent_requests: 1024,
        }
    }
}

/// Settings that select how each request is evaluated and rendered.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Which region predicate answers the request.
    pub predicate: PredicateKind,

    /// JSON vocabulary. Follows the predicate when unset.
    pub labels: Option<LabelSet>,

    /// Framing emitted by transports that write raw bytes (CGI).
    pub framing: FramingMode,

    /// Whether failure reasons echo the cause or stay generic.
    pub verbosity: ErrorVerbosity,

    /// strftime pattern for `currentTime`.
    pub timestamp_format: String,

    /// Directory served as a fallback (the browser front-end).
    pub static_dir: Option<String>,

    pub timing: TimingConfig,
}

impl CheckConfig {
    /// The label set in effect, resolving the predicate default.
    pub fn effective_labels(&self) -> LabelSet {
        self.labels.unwrap_or_else(|| self.predicate.default_labels())
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            predicate: PredicateKind::default(),
            labels: None,
            framing: FramingMode::default(),
            verbosity: ErrorVerbosity::default(),
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            static_dir: None,
            timing: TimingConfig::default(),
        }
    }
}

/// Execution time reporting.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Unit of the reported elapsed time.
    pub unit: TimingUnit,

    /// Digits after the decimal point (0 renders an integer).
    pub precision: usize,

    /// Report elapsed time on failure envelopes too.
    pub include_on_failure: bool,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            unit: TimingUnit::Millis,
            precision: 4,
            include_on_failure: true,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024, // 64KB
        }
    }
}

/// Log output style.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

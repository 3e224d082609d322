//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, precision bounded)
//! - Check addresses and the timestamp pattern before startup
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use chrono::format::{Item, StrftimeItems};
use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// Largest supported number of elapsed-time decimals (nanosecond resolution).
pub const MAX_TIMING_PRECISION: usize = 9;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.listener.bind_address.parse::<SocketAddr>() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address ({})", config.listener.bind_address, e),
        ));
    }

    if config.listener.max_concurrent_requests == 0 {
        errors.push(ValidationError::new(
            "listener.max_concurrent_requests",
            "must be greater than zero",
        ));
    }

    if config.service.timing.precision > MAX_TIMING_PRECISION {
        errors.push(ValidationError::new(
            "service.timing.precision",
            format!("must be at most {}", MAX_TIMING_PRECISION),
        ));
    }

    let pattern = &config.service.timestamp_format;
    if pattern.is_empty() {
        errors.push(ValidationError::new(
            "service.timestamp_format",
            "must not be empty",
        ));
    } else if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        errors.push(ValidationError::new(
            "service.timestamp_format",
            format!("'{}' is not a valid strftime pattern", pattern),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be greater than zero",
        ));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new(
            "security.max_body_size",
            "must be greater than zero",
        ));
    }

    if config.observability.metrics_enabled {
        if let Err(e) = config.observability.metrics_address.parse::<SocketAddr>() {
            errors.push(ValidationError::new(
                "observability.metrics_address",
                format!(
                    "'{}' is not a socket address ({})",
                    config.observability.metrics_address, e
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

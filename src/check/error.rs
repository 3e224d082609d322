//! Failure taxonomy of the check pipeline.
//!
//! Every variant is caused by caller input: deterministic, never retried,
//! always answered with a 400-equivalent failure envelope.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reason reported for decode and parameter errors in generic mode.
pub const GENERIC_REASON: &str = "Invalid or missing parameters.";

/// Where the raw parameters were expected to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// A POST body.
    Body,
    /// The query component of the request target.
    Query,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Body => f.write_str("POST"),
            InputSource::Query => f.write_str("query"),
        }
    }
}

/// A problem with one of `x`, `y`, `r`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("Missing parameter '{name}'.")]
    Missing { name: &'static str },

    #[error("Parameter '{name}' is not a finite number: '{value}'.")]
    Malformed { name: &'static str, value: String },
}

/// Errors produced while turning raw parameters into a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("Malformed percent-encoding in '{segment}'.")]
    Decode { segment: String },

    #[error("No {origin} data received.")]
    MissingInput { origin: InputSource },

    #[error(transparent)]
    InvalidParameters(#[from] ParameterError),
}

impl CheckError {
    /// The reason string placed in the failure envelope.
    pub fn reason(&self, verbosity: ErrorVerbosity) -> String {
        match (verbosity, self) {
            (ErrorVerbosity::Specific, _) | (_, CheckError::MissingInput { .. }) => {
                self.to_string()
            }
            (ErrorVerbosity::Generic, _) => GENERIC_REASON.to_string(),
        }
    }
}

/// How much of the proximate cause a failure envelope reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorVerbosity {
    /// Echo the error's own message.
    #[default]
    Specific,
    /// Collapse decode and parameter errors into one fixed message.
    Generic,
}

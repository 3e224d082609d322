//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Pick the filter from `RUST_LOG`, falling back to the configured level
//! - Route output to stdout (server) or stderr (CGI, where stdout is the response)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
}

fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "region_check={level},tower_http={level}",
            level = config.log_level
        ))
    })
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(config: &ObservabilityConfig, output: LogOutput) {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    let result = match (config.log_format, output) {
        (LogFormat::Pretty, LogOutput::Stdout) => registry
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
        (LogFormat::Pretty, LogOutput::Stderr) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init(),
        (LogFormat::Json, LogOutput::Stdout) => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        (LogFormat::Json, LogOutput::Stderr) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("logging already initialized: {}", e);
    }
}

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Transports and the check pipeline produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout for the server, stderr under CGI)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID from the HTTP layer is attached to every request span
//! - Metrics are optional; recording without an exporter costs nothing

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogOutput};

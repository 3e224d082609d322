//! Metrics collection and exposition.
//!
//! # Metrics
//! - `region_check_requests_total` (counter): requests by predicate, status
//! - `region_check_request_duration_seconds` (histogram): time spent in the pipeline
//!
//! Without an installed recorder the macros are no-ops, so transports record
//! unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::check::{PredicateKind, Status};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed check.
pub fn record_check(predicate: PredicateKind, status: Status, started: Instant) {
    let status = status.code().to_string();
    metrics::counter!(
        "region_check_requests_total",
        "predicate" => predicate.as_str(),
        "status" => status.clone()
    )
    .increment(1);
    metrics::histogram!(
        "region_check_request_duration_seconds",
        "predicate" => predicate.as_str(),
        "status" => status
    )
    .record(started.elapsed().as_secs_f64());
}

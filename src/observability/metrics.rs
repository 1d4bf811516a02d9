//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define service metrics (request counts, latency)
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `newswire_requests_total` (counter): requests by method, status, route
//! - `newswire_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Low-overhead updates (atomic operations behind the metrics facade)
//! - The route label is the symbolic route name, never the raw path, to
//!   keep cardinality bounded

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exposition endpoint.
///
/// Failure to install is logged, not fatal: the service can run without
/// its metrics endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics endpoint started"),
        Err(err) => tracing::error!(error = %err, "failed to start metrics endpoint"),
    }
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("route", route.to_string()),
    ];
    metrics::counter!("newswire_requests_total", &labels).increment(1);
    metrics::histogram!("newswire_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

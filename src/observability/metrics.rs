//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define router metrics (requests, latency, resolution outcomes)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `site_router_requests_total` (counter): requests by method, status
//! - `site_router_request_duration_seconds` (histogram): latency distribution
//! - `site_router_resolutions_total` (counter): resolver outcome, recorded by
//!   the routing subsystem
//!
//! # Design Decisions
//! - Recording through the `metrics` facade is a no-op until an exporter is
//!   installed, so tests need no setup

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with an HTTP listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a finished request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("site_router_requests_total", &labels).increment(1);
    metrics::histogram!("site_router_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

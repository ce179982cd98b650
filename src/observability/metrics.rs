//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define router metrics (request count, latency)
//! - Expose a Prometheus-compatible scrape endpoint when enabled
//!
//! # Metrics
//! - `router_requests_total` (counter): requests by method, status, route
//! - `router_request_duration_seconds` (histogram): dispatch latency
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so unit tests and
//!   embedders that skip `init_metrics` pay nothing
//! - The `route` label is the matched template, never the raw path, so label
//!   cardinality is bounded by the route table. Unmatched requests use `-`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Route label for requests that matched no route.
pub const UNMATCHED_ROUTE: &str = "-";

/// Record one dispatched request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let method = method.to_string();
    let status = status.to_string();
    let route = route.to_string();

    metrics::counter!(
        "router_requests_total",
        "method" => method.clone(),
        "status" => status.clone(),
        "route" => route.clone()
    )
    .increment(1);
    metrics::histogram!(
        "router_request_duration_seconds",
        "method" => method,
        "status" => status,
        "route" => route
    )
    .record(start.elapsed().as_secs_f64());
}

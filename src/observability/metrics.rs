//! Metrics collection and exposition.
//!
//! # Metrics
//! - `processor_requests_total` (counter): requests by method, path, status
//! - `processor_request_duration_seconds` (histogram): latency by method, path
//! - `processor_transform_total` (counter): transform outcomes
//!
//! Recording is a no-op until a recorder is installed, so handlers and
//! tests never need to care whether the exporter is running.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(method: &str, path: &str, status: u16, start_time: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    counter!("processor_requests_total", &labels).increment(1);

    let labels = [("method", method.to_string()), ("path", path.to_string())];
    histogram!("processor_request_duration_seconds", &labels)
        .record(start_time.elapsed().as_secs_f64());
}

/// Record the outcome of one transform call (`ok`, `invalid`, `error`).
pub fn record_transform(outcome: &'static str) {
    counter!("processor_transform_total", "outcome" => outcome).increment(1);
}

/// Middleware recording request count and latency per matched route.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = req.method().to_string();
    // Matched route template keeps label cardinality bounded.
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;
    record_request(&method, &path, response.status().as_u16(), start_time);
    response
}

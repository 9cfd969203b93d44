//! Prometheus metrics for the API server.

use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "jobly_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "jobly_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "jobly_http_requests_in_flight";
    pub const RATE_LIMIT_HITS_TOTAL: &str = "jobly_rate_limit_hits_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", route_label(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a rate limit hit.
pub fn record_rate_limit_hit(path: &str) {
    let labels = [("path", route_label(path))];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

/// Collapse path parameters so metric labels stay low-cardinality.
fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        ["companies", _] => "/companies/:handle".to_string(),
        ["jobs", _] => "/jobs/:id".to_string(),
        ["users", _] => "/users/:username".to_string(),
        ["users", _, "jobs", _] => "/users/:username/jobs/:id".to_string(),
        _ => path.to_string(),
    }
}

/// Metrics middleware for HTTP requests.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);
    let response = next.run(request).await;
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_label_collapses_path_params() {
        assert_eq!(route_label("/companies/anderson-arias"), "/companies/:handle");
        assert_eq!(route_label("/jobs/42"), "/jobs/:id");
        assert_eq!(route_label("/users/u1/jobs/42"), "/users/:username/jobs/:id");
        assert_eq!(route_label("/companies"), "/companies");
        assert_eq!(route_label("/health"), "/health");
    }
}

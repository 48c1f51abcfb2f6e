//! Prometheus metrics for the API server.

use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use medjobs_models::{ApplicationStatus, Role};

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "medjobs_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "medjobs_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "medjobs_http_requests_in_flight";

    // Domain metrics
    pub const SIGNUPS_TOTAL: &str = "medjobs_signups_total";
    pub const LOGINS_TOTAL: &str = "medjobs_logins_total";
    pub const JOBS_CREATED_TOTAL: &str = "medjobs_jobs_created_total";
    pub const APPLICATIONS_SUBMITTED_TOTAL: &str = "medjobs_applications_submitted_total";
    pub const APPLICATION_STATUS_UPDATES_TOTAL: &str = "medjobs_application_status_updates_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a new account.
pub fn record_signup(role: Role) {
    let labels = [("role", role.as_str().to_string())];
    counter!(names::SIGNUPS_TOTAL, &labels).increment(1);
}

/// Record a login attempt by outcome (`success` or `failure`).
pub fn record_login(outcome: &'static str) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::LOGINS_TOTAL, &labels).increment(1);
}

/// Record a job posting.
pub fn record_job_created() {
    counter!(names::JOBS_CREATED_TOTAL).increment(1);
}

/// Record a submitted application.
pub fn record_application_submitted() {
    counter!(names::APPLICATIONS_SUBMITTED_TOTAL).increment(1);
}

/// Record a review decision.
pub fn record_application_status(status: ApplicationStatus) {
    let labels = [("status", status.as_str().to_string())];
    counter!(names::APPLICATION_STATUS_UPDATES_TOTAL, &labels).increment(1);
}

/// Sanitize path for metrics labels (numeric ids become `:id`).
fn sanitize_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                ":id"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}

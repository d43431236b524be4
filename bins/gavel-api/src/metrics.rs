// Prometheus metrics for the judging pipeline

use axum::http::StatusCode;
use axum::response::IntoResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Encoder, Histogram,
    IntCounter, IntCounterVec, TextEncoder,
};

lazy_static! {
    pub static ref SANDBOX_REQUESTS_TOTAL: IntCounter = register_int_counter!(
        "gavel_sandbox_requests_total",
        "Execution requests issued to the sandbox service"
    )
    .unwrap();
    pub static ref SANDBOX_REQUEST_SECONDS: Histogram = register_histogram!(
        "gavel_sandbox_request_seconds",
        "Sandbox round-trip latency in seconds"
    )
    .unwrap();
    pub static ref VERDICTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "gavel_verdicts_total",
        "Verdicts produced per evaluated test case",
        &["verdict"]
    )
    .unwrap();
    pub static ref SUBMISSIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "gavel_submissions_total",
        "Completed submissions by overall result",
        &["result"]
    )
    .unwrap();
}

/// GET /metrics - Prometheus text exposition
pub async fn metrics_handler() -> impl IntoResponse {
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (StatusCode::OK, buffer).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {}", e),
        )
            .into_response(),
    }
}

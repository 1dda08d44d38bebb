use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "employee_api_operations_total",
        "Service operations executed, by entity and operation",
        &["entity", "operation"]
    )
    .expect("register operations_total")
});

pub static REQUEST_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "employee_api_request_errors_total",
        "Requests answered with an error status",
        &["status"]
    )
    .expect("register request_errors_total")
});

pub fn record_operation(entity: &str, operation: &str) {
    OPERATIONS_TOTAL.with_label_values(&[entity, operation]).inc();
}

pub fn record_error(status: StatusCode) {
    REQUEST_ERRORS_TOTAL.with_label_values(&[status.as_str()]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

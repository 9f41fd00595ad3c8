/// Metrics and telemetry
///
/// Prometheus-compatible metrics for monitoring:
/// - HTTP request counts and latencies
/// - Login attempts
/// - Amendment appends per complaint table
use axum::{extract::Request, middleware::Next, response::Response};
use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request latencies in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    /// Login attempts by outcome
    pub static ref LOGIN_ATTEMPTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "login_attempts_total",
        "Total number of login attempts",
        &["resultado"]
    )
    .unwrap();

    /// Amendment appends by complaint table
    pub static ref AMPLIACIONES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "ampliaciones_total",
        "Total number of amendments appended",
        &["tipo"]
    )
    .unwrap();
}

/// Render metrics in Prometheus text format
pub fn render_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration);
}

/// Record a login attempt
pub fn record_login_attempt(exito: bool) {
    LOGIN_ATTEMPTS_TOTAL
        .with_label_values(&[if exito { "exito" } else { "fallo" }])
        .inc();
}

/// Record an appended amendment
pub fn record_ampliacion(tipo: &str) {
    AMPLIACIONES_TOTAL.with_label_values(&[tipo]).inc();
}

/// Middleware tracking method, path, status and latency for every request
pub async fn track_http(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let inicio = std::time::Instant::now();

    let response = next.run(request).await;

    record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        inicio.elapsed().as_secs_f64(),
    );

    response
}

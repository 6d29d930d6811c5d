use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, Encoder, HistogramVec,
    IntCounterVec, IntGauge, TextEncoder,
};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    // Platform calls
    pub static ref PLATFORM_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "platform_requests_total",
        "Total number of requests sent to the course platform",
        &["endpoint", "status"]
    )
    .unwrap();

    pub static ref PLATFORM_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "platform_request_duration_seconds",
        "Course platform request duration in seconds",
        &["endpoint"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .unwrap();

    // Problem sessions
    pub static ref ANSWERS_SUBMITTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "answers_submitted_total",
        "Total number of answers submitted",
        &["verdict"]
    )
    .unwrap();

    pub static ref STDIN_RUNS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "stdin_runs_total",
        "Total number of code runs on custom stdin",
        &["outcome"]
    )
    .unwrap();

    pub static ref WIDGETS_RENDERED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "widgets_rendered_total",
        "Total number of answer widgets rendered",
        &["kind"]
    )
    .unwrap();

    pub static ref STOPWATCHES_ACTIVE: IntGauge = register_int_gauge!(
        "stopwatches_active",
        "Number of running problem stopwatches"
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

/// Helper: time a platform call and count it by outcome
pub async fn track_platform_call<F, T, E>(endpoint: &str, future: F) -> Result<T, E>
where
    F: std::future::Future<Output = Result<T, E>>,
{
    let start = std::time::Instant::now();
    let result = future.await;
    let duration = start.elapsed().as_secs_f64();

    let status = if result.is_ok() { "success" } else { "error" };

    PLATFORM_REQUESTS_TOTAL
        .with_label_values(&[endpoint, status])
        .inc();

    PLATFORM_REQUEST_DURATION_SECONDS
        .with_label_values(&[endpoint])
        .observe(duration);

    result
}

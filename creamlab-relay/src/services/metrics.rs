//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter and provides the relay-specific
//! recorders. Recording before [`init_metrics`] is a no-op.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the metrics recorder.
///
/// This must be called once at startup before any metrics are recorded.
/// Panics if called more than once.
pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

/// Count one relay invocation by outcome (`success` or an error kind).
pub fn record_relay_outcome(outcome: &'static str) {
    counter!("relay_requests_total", "outcome" => outcome).increment(1);
}

/// Record the latency of one upstream call.
pub fn record_upstream_latency(provider: &'static str, model: &str, elapsed: Duration) {
    histogram!(
        "relay_upstream_latency_seconds",
        "provider" => provider,
        "model" => model.to_string()
    )
    .record(elapsed.as_secs_f64());
}

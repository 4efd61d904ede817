use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::model::{ClassifyError, Label};

/// Install the Prometheus recorder and register the classification metrics.
///
/// Only one global recorder can exist per process. Later calls (tests build
/// several routers) get a detached handle that renders an empty payload.
pub fn init_metrics() -> PrometheusHandle {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    if metrics::set_global_recorder(recorder).is_err() {
        tracing::debug!("Prometheus recorder already installed; using detached handle");
        return handle;
    }

    // Pre-register counters so they appear even before the first increment.
    counter!("classify_requests_total", "label" => Label::Spam.as_str()).absolute(0);
    counter!("classify_requests_total", "label" => Label::NotSpam.as_str()).absolute(0);
    counter!("classify_errors_total", "kind" => "transform").absolute(0);
    counter!("classify_errors_total", "kind" => "prediction").absolute(0);
    counter!("classify_empty_input_total").absolute(0);

    // Histogram is lazily created on first record; force creation.
    histogram!("classify_latency_seconds").record(0.0);

    handle
}

pub fn record_prediction(label: Label, elapsed: Duration) {
    counter!("classify_requests_total", "label" => label.as_str()).increment(1);
    histogram!("classify_latency_seconds").record(elapsed.as_secs_f64());
}

pub fn record_error(err: &ClassifyError) {
    counter!("classify_errors_total", "kind" => err.kind()).increment(1);
}

pub fn record_empty_input() {
    counter!("classify_empty_input_total").increment(1);
}

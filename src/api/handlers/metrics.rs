use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

use crate::AppState;

const PROMETHEUS_TEXT_FORMAT: &str = "text/plain; version=0.0.4";

/// GET /metrics — Prometheus scrape of the classification counters.
pub async fn render(State(state): State<AppState>) -> impl IntoResponse {
    let payload = state.metrics_handle.render();
    tracing::trace!(bytes = payload.len(), "Rendered metrics payload");
    ([(CONTENT_TYPE, PROMETHEUS_TEXT_FORMAT)], payload)
}

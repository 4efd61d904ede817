use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

/// The router is only built after the model has loaded, so reaching this
/// handler means the service is ready.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let info = state.classifier.info();

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "model": info.kind,
            "features": info.features,
            "vocabulary": info.vocabulary,
            "loaded_at": info.loaded_at,
        })),
    )
}

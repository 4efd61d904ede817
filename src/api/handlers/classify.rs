use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::metrics;
use crate::model::{Label, Prediction};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub label: Label,
    pub confidence_pct: f64,
    pub message: String,
}

impl From<Prediction> for ClassifyResponse {
    fn from(p: Prediction) -> Self {
        Self {
            label: p.label,
            confidence_pct: p.confidence_pct(),
            message: p.message(),
        }
    }
}

/// POST /classify — score one email body.
pub async fn classify(
    State(state): State<AppState>,
    Json(body): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    let prediction = classify_text(&state, &body.text)?;
    Ok(Json(prediction.into()))
}

/// Shared by the JSON endpoint and the HTML form.
///
/// Blank input is rejected here and never reaches the model.
pub fn classify_text(state: &AppState, text: &str) -> Result<Prediction, AppError> {
    if text.trim().is_empty() {
        metrics::record_empty_input();
        return Err(AppError::EmptyInput);
    }

    let started = Instant::now();
    match state.classifier.classify(text) {
        Ok(prediction) => {
            let elapsed = started.elapsed();
            metrics::record_prediction(prediction.label, elapsed);
            tracing::debug!(
                chars = text.chars().count(),
                label = %prediction.label,
                confidence_pct = prediction.confidence_pct(),
                elapsed_us = elapsed.as_micros() as u64,
                "Text classified"
            );
            Ok(prediction)
        }
        Err(e) => {
            metrics::record_error(&e);
            tracing::warn!(error = %e, kind = e.kind(), "Classification failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusRecorder};

    use super::*;
    use crate::api::assets::PageAssets;
    use crate::config::AppConfig;
    use crate::model::{Classify, ClassifyError, ModelInfo, PredictionError};

    struct Canned(Result<Prediction, ClassifyError>);

    impl Classify for Canned {
        fn classify(&self, _text: &str) -> Result<Prediction, ClassifyError> {
            self.0.clone()
        }

        fn info(&self) -> ModelInfo {
            ModelInfo {
                kind: "canned".into(),
                features: 0,
                vocabulary: 0,
                loaded_at: Utc::now(),
            }
        }
    }

    fn state(recorder: &PrometheusRecorder, result: Result<Prediction, ClassifyError>) -> AppState {
        AppState {
            classifier: Arc::new(Canned(result)),
            config: AppConfig::default(),
            assets: Arc::new(PageAssets::default()),
            metrics_handle: recorder.handle(),
        }
    }

    #[test]
    fn test_classify_text_records_outcome_counters() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let spam = state(&recorder, Ok(Prediction::new(Label::Spam, [0.1, 0.9])));
        let broken = state(&recorder, Err(PredictionError::NonFiniteScore.into()));

        ::metrics::with_local_recorder(&recorder, || {
            assert!(classify_text(&spam, "WIN A FREE IPHONE").is_ok());
            assert!(matches!(classify_text(&spam, "   "), Err(AppError::EmptyInput)));
            assert!(matches!(
                classify_text(&broken, "hello"),
                Err(AppError::Classification(_))
            ));
        });

        let rendered = recorder.handle().render();
        assert!(rendered.contains(r#"classify_requests_total{label="spam"} 1"#));
        assert!(!rendered.contains(r#"classify_requests_total{label="not_spam"}"#));
        assert!(rendered.contains("classify_empty_input_total 1"));
        assert!(rendered.contains(r#"classify_errors_total{kind="prediction"} 1"#));
        assert!(!rendered.contains(r#"classify_errors_total{kind="transform"}"#));
        assert!(rendered.contains("classify_latency_seconds"));
    }
}

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::Response;
use chrono::Utc;

use spam_detector::api::assets::PageAssets;
use spam_detector::api::router::create_router;
use spam_detector::config::AppConfig;
use spam_detector::model::{
    Classifier, Classify, ClassifyError, ModelInfo, Prediction, SpamClassifier, TfidfVectorizer,
    VectorizerArtifact,
};
use spam_detector::AppState;

/// Seven-term vocabulary, raw counts, L2 normalized.
#[allow(dead_code)]
pub const VECTORIZER_JSON: &str = r#"{
    "vocabulary": { "free": 0, "win": 1, "click": 2, "prize": 3,
                    "meeting": 4, "review": 5, "tomorrow": 6 },
    "norm": "l2"
}"#;

/// Positive weights on promotional terms, negative on scheduling terms.
#[allow(dead_code)]
pub const MODEL_JSON: &str = r#"{
    "kind": "logistic_regression",
    "coef": [2.5, 2.5, 2.0, 2.0, -2.5, -2.0, -1.5],
    "intercept": -0.5
}"#;

#[allow(dead_code)]
pub fn spam_classifier() -> SpamClassifier {
    let artifact: VectorizerArtifact =
        serde_json::from_str(VECTORIZER_JSON).expect("fixture vectorizer parses");
    let vectorizer = TfidfVectorizer::from_artifact(artifact).expect("fixture vectorizer is valid");
    let model: Classifier = serde_json::from_str(MODEL_JSON).expect("fixture model parses");
    SpamClassifier::new(vectorizer, model).expect("fixture pair is compatible")
}

/// Returns a canned result and counts how often it was asked.
#[allow(dead_code)]
pub struct FixedClassifier {
    result: Result<Prediction, ClassifyError>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl FixedClassifier {
    pub fn new(result: Result<Prediction, ClassifyError>) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classify for FixedClassifier {
    fn classify(&self, _text: &str) -> Result<Prediction, ClassifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            kind: "fixed".into(),
            features: 0,
            vocabulary: 0,
            loaded_at: Utc::now(),
        }
    }
}

#[allow(dead_code)]
pub fn build_test_app(classifier: Arc<dyn Classify>) -> axum::Router {
    build_test_app_with_config(classifier, AppConfig::default())
}

#[allow(dead_code)]
pub fn build_test_app_with_config(classifier: Arc<dyn Classify>, config: AppConfig) -> axum::Router {
    let state = AppState {
        classifier,
        config,
        assets: Arc::new(PageAssets::default()),
        metrics_handle: spam_detector::metrics::init_metrics(),
    };
    create_router(state)
}

#[allow(dead_code)]
pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[allow(dead_code)]
pub async fn body_text(resp: Response<Body>) -> String {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

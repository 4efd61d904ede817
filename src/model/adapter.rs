use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::classifier::Classifier;
use super::error::{ClassifyError, PredictionError, StartupError, TransformError};
use super::prediction::{Label, Prediction};
use super::vectorizer::{TfidfVectorizer, VectorizerArtifact};

/// The single operation the HTTP layer needs from a model.
pub trait Classify: Send + Sync {
    fn classify(&self, text: &str) -> Result<Prediction, ClassifyError>;

    fn info(&self) -> ModelInfo;
}

/// Summary of the loaded model, reported by the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub kind: String,
    pub features: usize,
    pub vocabulary: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Local locations of the two pre-fetched artifacts.
#[derive(Debug, Clone)]
pub struct ModelPaths {
    pub model: PathBuf,
    pub vectorizer: PathBuf,
}

/// A fitted vectorizer and classifier, immutable once built.
#[derive(Debug)]
pub struct SpamClassifier {
    vectorizer: TfidfVectorizer,
    model: Classifier,
    loaded_at: DateTime<Utc>,
}

impl SpamClassifier {
    pub fn new(vectorizer: TfidfVectorizer, model: Classifier) -> Result<Self, StartupError> {
        model.validate()?;

        if vectorizer.dim() != model.n_features() {
            return Err(StartupError::Incompatible {
                vectorizer_dim: vectorizer.dim(),
                classifier_dim: model.n_features(),
            });
        }

        Ok(Self {
            vectorizer,
            model,
            loaded_at: Utc::now(),
        })
    }

    /// Read both artifacts from disk. Any missing, unreadable or
    /// mismatched artifact is an error; nothing is fetched remotely.
    pub fn load(paths: &ModelPaths) -> Result<Self, StartupError> {
        let model: Classifier = read_artifact("classifier", &paths.model)?;
        let artifact: VectorizerArtifact = read_artifact("vectorizer", &paths.vectorizer)?;
        let vectorizer = TfidfVectorizer::from_artifact(artifact)?;

        let classifier = Self::new(vectorizer, model)?;
        tracing::info!(
            model = classifier.model.kind(),
            features = classifier.vectorizer.dim(),
            vocabulary = classifier.vectorizer.vocabulary_size(),
            "Model artifacts loaded"
        );
        Ok(classifier)
    }
}

impl Classify for SpamClassifier {
    fn classify(&self, text: &str) -> Result<Prediction, ClassifyError> {
        // the vectorizer is batch oriented; score a batch of one and take row 0
        let rows = self.vectorizer.transform(&[text])?;
        let x = rows.first().ok_or(TransformError::EmptyBatch { batch: 1 })?;

        let class = self.model.predict(x)?;
        let label = Label::from_class(class).ok_or(PredictionError::UnknownClass(class))?;
        let probabilities = self.model.predict_proba(x)?;

        Ok(Prediction::new(label, probabilities))
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            kind: self.model.kind().to_string(),
            features: self.vectorizer.dim(),
            vocabulary: self.vectorizer.vocabulary_size(),
            loaded_at: self.loaded_at,
        }
    }
}

fn read_artifact<T: DeserializeOwned>(artifact: &'static str, path: &Path) -> Result<T, StartupError> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StartupError::MissingArtifact {
                artifact,
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(StartupError::Io {
                artifact,
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_slice(&raw).map_err(|source| StartupError::Parse {
        artifact,
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

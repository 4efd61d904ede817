use std::path::PathBuf;

/// Loading or validating the model artifacts failed. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("{artifact} artifact not found at {}", path.display())]
    MissingArtifact {
        artifact: &'static str,
        path: PathBuf,
    },

    #[error("failed to read {artifact} artifact at {}: {source}", path.display())]
    Io {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {artifact} artifact at {}: {source}", path.display())]
    Parse {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {artifact} artifact: {reason}")]
    InvalidArtifact {
        artifact: &'static str,
        reason: String,
    },

    #[error("vectorizer produces {vectorizer_dim} features but the classifier expects {classifier_dim}")]
    Incompatible {
        vectorizer_dim: usize,
        classifier_dim: usize,
    },
}

/// The text could not be turned into a feature vector.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("vectorizer returned no row for a batch of {batch} document(s)")]
    EmptyBatch { batch: usize },

    #[error("vocabulary term {term:?} maps to column {index}, outside the {dim} feature columns")]
    IndexOutOfRange {
        term: String,
        index: usize,
        dim: usize,
    },

    #[error("feature column {index} has non-finite value")]
    NonFinite { index: usize },
}

/// The classifier could not score a feature vector.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("feature vector has {found} columns but the classifier expects {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("classifier produced a non-finite score")]
    NonFiniteScore,

    #[error("classifier produced unknown class {0}")]
    UnknownClass(u8),
}

/// Any failure of a single `classify` call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifyError {
    #[error("could not vectorize text: {0}")]
    Transform(#[from] TransformError),

    #[error("could not classify text: {0}")]
    Prediction(#[from] PredictionError),
}

impl ClassifyError {
    /// Short stable name used as a metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifyError::Transform(_) => "transform",
            ClassifyError::Prediction(_) => "prediction",
        }
    }
}

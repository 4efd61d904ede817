pub mod adapter;
pub mod classifier;
pub mod error;
pub mod prediction;
pub mod vectorizer;

pub use adapter::{Classify, ModelInfo, ModelPaths, SpamClassifier};
pub use classifier::Classifier;
pub use error::{ClassifyError, PredictionError, StartupError, TransformError};
pub use prediction::{Label, Prediction};
pub use vectorizer::{FeatureVector, Norm, TfidfVectorizer, VectorizerArtifact};

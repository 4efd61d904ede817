use serde::Deserialize;

use super::error::{PredictionError, StartupError};
use super::vectorizer::FeatureVector;

/// Fitted binary classifier. Class index 0 is not-spam, 1 is spam.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    /// `p(spam) = sigmoid(coef · x + intercept)`
    LogisticRegression { coef: Vec<f64>, intercept: f64 },
    /// Multinomial naive Bayes over term weights.
    MultinomialNb {
        class_log_prior: [f64; 2],
        feature_log_prob: [Vec<f64>; 2],
    },
}

impl Classifier {
    pub fn kind(&self) -> &'static str {
        match self {
            Classifier::LogisticRegression { .. } => "logistic_regression",
            Classifier::MultinomialNb { .. } => "multinomial_nb",
        }
    }

    /// Number of feature columns the classifier was fit on.
    pub fn n_features(&self) -> usize {
        match self {
            Classifier::LogisticRegression { coef, .. } => coef.len(),
            Classifier::MultinomialNb { feature_log_prob, .. } => feature_log_prob[0].len(),
        }
    }

    /// Check internal consistency of a freshly deserialized model.
    pub fn validate(&self) -> Result<(), StartupError> {
        let invalid = |reason: String| StartupError::InvalidArtifact {
            artifact: "classifier",
            reason,
        };

        match self {
            Classifier::LogisticRegression { coef, intercept } => {
                if !intercept.is_finite() || coef.iter().any(|c| !c.is_finite()) {
                    return Err(invalid("logistic regression weights must be finite".into()));
                }
            }
            Classifier::MultinomialNb {
                class_log_prior,
                feature_log_prob,
            } => {
                let (spam_len, ham_len) = (feature_log_prob[1].len(), feature_log_prob[0].len());
                if spam_len != ham_len {
                    return Err(invalid(format!(
                        "feature_log_prob rows differ in length ({ham_len} vs {spam_len})"
                    )));
                }
                // log-probabilities may be -inf for an empty class but never NaN or +inf
                let bad = |v: &f64| v.is_nan() || *v == f64::INFINITY;
                if class_log_prior.iter().any(bad)
                    || feature_log_prob.iter().flatten().any(bad)
                {
                    return Err(invalid("naive Bayes log-probabilities contain NaN or +inf".into()));
                }
            }
        }
        Ok(())
    }

    /// Discrete decision for one feature row: class `1` (spam) or `0`.
    pub fn predict(&self, x: &FeatureVector) -> Result<u8, PredictionError> {
        self.check_dim(x)?;
        let spam = match self {
            Classifier::LogisticRegression { coef, intercept } => {
                decision_value(x, coef, *intercept)? > 0.0
            }
            Classifier::MultinomialNb {
                class_log_prior,
                feature_log_prob,
            } => {
                let [ham, spam] = joint_log_likelihood(x, class_log_prior, feature_log_prob)?;
                spam > ham
            }
        };
        Ok(u8::from(spam))
    }

    /// Probability distribution `[p_not_spam, p_spam]` for one feature row.
    pub fn predict_proba(&self, x: &FeatureVector) -> Result<[f64; 2], PredictionError> {
        self.check_dim(x)?;
        match self {
            Classifier::LogisticRegression { coef, intercept } => {
                let p = sigmoid(decision_value(x, coef, *intercept)?);
                Ok([1.0 - p, p])
            }
            Classifier::MultinomialNb {
                class_log_prior,
                feature_log_prob,
            } => {
                let jll = joint_log_likelihood(x, class_log_prior, feature_log_prob)?;
                let max = jll[0].max(jll[1]);
                let log_norm = max + ((jll[0] - max).exp() + (jll[1] - max).exp()).ln();
                Ok([(jll[0] - log_norm).exp(), (jll[1] - log_norm).exp()])
            }
        }
    }

    fn check_dim(&self, x: &FeatureVector) -> Result<(), PredictionError> {
        let expected = self.n_features();
        if x.dim() != expected {
            return Err(PredictionError::DimensionMismatch {
                expected,
                found: x.dim(),
            });
        }
        Ok(())
    }
}

fn decision_value(x: &FeatureVector, coef: &[f64], intercept: f64) -> Result<f64, PredictionError> {
    finite(x.dot(coef) + intercept)
}

fn joint_log_likelihood(
    x: &FeatureVector,
    class_log_prior: &[f64; 2],
    feature_log_prob: &[Vec<f64>; 2],
) -> Result<[f64; 2], PredictionError> {
    let ham = finite(class_log_prior[0] + x.dot(&feature_log_prob[0]))?;
    let spam = finite(class_log_prior[1] + x.dot(&feature_log_prob[1]))?;
    Ok([ham, spam])
}

fn finite(value: f64) -> Result<f64, PredictionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PredictionError::NonFiniteScore)
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

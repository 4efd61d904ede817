use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer};

use super::error::{StartupError, TransformError};

const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Row normalization applied after weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk form of a fitted vectorizer.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorizerArtifact {
    pub vocabulary: HashMap<String, usize>,
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default)]
    pub binary: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    /// `None` when absent: L2 with `idf`, unnormalized counts without.
    /// `Some(None)` for an explicit `null`.
    #[serde(default, deserialize_with = "explicit_norm")]
    pub norm: Option<Option<Norm>>,
}

fn default_lowercase() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.into()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn explicit_norm<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Option<Norm>>, D::Error> {
    Option::<Norm>::deserialize(d).map(Some)
}

// ---------------------------------------------------------------------------
// FeatureVector
// ---------------------------------------------------------------------------

/// Sparse row of a fixed feature dimension. Entries are sorted by column.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    pub fn new(dim: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(index, _)| *index);
        Self { dim, entries }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product against a dense weight row of the same dimension.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|&(index, value)| value * weights[index])
            .sum()
    }
}

// ---------------------------------------------------------------------------
// TfidfVectorizer
// ---------------------------------------------------------------------------

/// Fitted term-frequency vectorizer, optionally IDF weighted.
/// Read-only once built.
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    dim: usize,
    lowercase: bool,
    token_re: Regex,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    binary: bool,
    sublinear_tf: bool,
    norm: Option<Norm>,
}

impl fmt::Debug for TfidfVectorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TfidfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("dim", &self.dim)
            .field("idf", &self.idf.is_some())
            .field("ngram_range", &self.ngram_range)
            .field("norm", &self.norm)
            .finish()
    }
}

impl TfidfVectorizer {
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self, StartupError> {
        let invalid = |reason: String| StartupError::InvalidArtifact {
            artifact: "vectorizer",
            reason,
        };

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(invalid(format!("ngram_range ({min_n}, {max_n}) is not valid")));
        }

        let dim = match &artifact.idf {
            Some(idf) => {
                if let Some(pos) = idf.iter().position(|v| !v.is_finite()) {
                    return Err(invalid(format!("idf[{pos}] is not finite")));
                }
                idf.len()
            }
            None => artifact
                .vocabulary
                .values()
                .max()
                .map_or(0, |max| max + 1),
        };

        if let Some((term, index)) = artifact.vocabulary.iter().find(|(_, &i)| i >= dim) {
            return Err(invalid(format!(
                "term {term:?} maps to column {index} but idf has {dim} entries"
            )));
        }

        let token_re = Regex::new(&artifact.token_pattern)
            .map_err(|e| invalid(format!("token_pattern does not compile: {e}")))?;

        let norm = artifact
            .norm
            .unwrap_or(artifact.idf.as_ref().map(|_| Norm::L2));

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            dim,
            lowercase: artifact.lowercase,
            token_re,
            ngram_range: artifact.ngram_range,
            stop_words: artifact.stop_words.into_iter().collect(),
            binary: artifact.binary,
            sublinear_tf: artifact.sublinear_tf,
            norm,
        })
    }

    /// Number of feature columns every output row has.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Vectorize a batch of documents, one row per document in input order.
    pub fn transform<S: AsRef<str>>(&self, batch: &[S]) -> Result<Vec<FeatureVector>, TransformError> {
        batch
            .iter()
            .map(|doc| self.transform_document(doc.as_ref()))
            .collect()
    }

    fn transform_document(&self, doc: &str) -> Result<FeatureVector, TransformError> {
        let text = if self.lowercase {
            Cow::Owned(doc.to_lowercase())
        } else {
            Cow::Borrowed(doc)
        };

        let tokens: Vec<&str> = self
            .token_re
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .collect();

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        let (min_n, max_n) = self.ngram_range;
        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                let term = window.join(" ");
                let Some(&index) = self.vocabulary.get(&term) else {
                    continue;
                };
                if index >= self.dim {
                    return Err(TransformError::IndexOutOfRange {
                        term,
                        index,
                        dim: self.dim,
                    });
                }
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| {
                let tf = if self.binary {
                    1.0
                } else if self.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                let weight = match &self.idf {
                    Some(idf) => tf * idf[index],
                    None => tf,
                };
                (index, weight)
            })
            .collect();

        normalize(&mut entries, self.norm);

        if let Some(&(index, _)) = entries.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TransformError::NonFinite { index });
        }

        Ok(FeatureVector::new(self.dim, entries))
    }
}

fn normalize(entries: &mut [(usize, f64)], norm: Option<Norm>) {
    let total = match norm {
        Some(Norm::L1) => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
        Some(Norm::L2) => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
        None => return,
    };
    if total > 0.0 {
        for (_, value) in entries.iter_mut() {
            *value /= total;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

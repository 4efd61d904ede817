use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete outcome of a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    NotSpam,
    Spam,
}

impl Label {
    /// Map a raw classifier class (`0` / `1`) onto a label.
    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            0 => Some(Label::NotSpam),
            1 => Some(Label::Spam),
            _ => None,
        }
    }

    /// Column of this label in a `[p_not_spam, p_spam]` distribution.
    pub fn class_index(self) -> usize {
        match self {
            Label::NotSpam => 0,
            Label::Spam => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::NotSpam => "not_spam",
            Label::Spam => "spam",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label together with the full two-class distribution it was chosen from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: Label,
    pub probabilities: [f64; 2],
}

impl Prediction {
    pub fn new(label: Label, probabilities: [f64; 2]) -> Self {
        Self {
            label,
            probabilities,
        }
    }

    /// Probability mass on the predicted label, in `[0, 1]`.
    pub fn confidence(&self) -> f64 {
        self.probabilities[self.label.class_index()]
    }

    /// Confidence as a percentage rounded to two decimals (ties to even).
    pub fn confidence_pct(&self) -> f64 {
        (self.confidence() * 100.0 * 100.0).round_ties_even() / 100.0
    }

    /// User-facing verdict, e.g. `Spam detected with probability: 98.0%`.
    pub fn message(&self) -> String {
        let pct = format_pct(self.confidence_pct());
        match self.label {
            Label::Spam => format!("Spam detected with probability: {pct}%"),
            Label::NotSpam => format!("Not spam with probability: {pct}%"),
        }
    }
}

/// Whole percentages keep one decimal place (`98.0`), others print as-is (`97.12`).
fn format_pct(pct: f64) -> String {
    if pct.fract() == 0.0 {
        format!("{pct:.1}")
    } else {
        format!("{pct}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spam_message() {
        let p = Prediction::new(Label::Spam, [0.02, 0.98]);
        assert_eq!(p.confidence_pct(), 98.0);
        assert_eq!(p.message(), "Spam detected with probability: 98.0%");
    }

    #[test]
    fn test_not_spam_message() {
        let p = Prediction::new(Label::NotSpam, [0.91, 0.09]);
        assert_eq!(p.confidence_pct(), 91.0);
        assert_eq!(p.message(), "Not spam with probability: 91.0%");
    }

    #[test]
    fn test_confidence_uses_predicted_class() {
        // a label that disagrees with the larger mass still reports its own column
        let p = Prediction::new(Label::NotSpam, [0.3, 0.7]);
        assert_eq!(p.confidence_pct(), 30.0);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let p = Prediction::new(Label::Spam, [0.028765, 0.971235]);
        assert_eq!(p.confidence_pct(), 97.12);
        assert_eq!(p.message(), "Spam detected with probability: 97.12%");
    }

    #[test]
    fn test_label_mapping() {
        assert_eq!(Label::from_class(1), Some(Label::Spam));
        assert_eq!(Label::from_class(0), Some(Label::NotSpam));
        assert_eq!(Label::from_class(2), None);
        assert_eq!(serde_json::to_string(&Label::NotSpam).unwrap(), "\"not_spam\"");
    }
}

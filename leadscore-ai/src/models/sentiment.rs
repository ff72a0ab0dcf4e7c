//! Sentiment result types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete polarity label derived from a compound score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "Very Positive")]
    VeryPositive,
    #[serde(rename = "Positive")]
    Positive,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Negative")]
    Negative,
    #[serde(rename = "Very Negative")]
    VeryNegative,
}

impl SentimentLabel {
    /// Map a compound score to a label
    ///
    /// Thresholds are evaluated in order and the first match wins:
    /// `>= 0.5`, `>= 0.1`, `> -0.1`, `<= -0.5`, otherwise Negative.
    /// Boundary values follow that order exactly (`-0.1` is Negative,
    /// `-0.5` is Very Negative).
    pub fn from_compound(compound: f64) -> Self {
        if compound >= 0.5 {
            SentimentLabel::VeryPositive
        } else if compound >= 0.1 {
            SentimentLabel::Positive
        } else if compound > -0.1 {
            SentimentLabel::Neutral
        } else if compound <= -0.5 {
            SentimentLabel::VeryNegative
        } else {
            SentimentLabel::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::VeryPositive => "Very Positive",
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::VeryNegative => "Very Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lexicon sentiment of one message
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Compound polarity in [-1, 1]
    #[serde(rename = "compound_score")]
    pub compound: f64,
}

impl SentimentResult {
    pub fn from_compound(compound: f64) -> Self {
        Self {
            label: SentimentLabel::from_compound(compound),
            compound,
        }
    }

    /// No-signal result used for empty input
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            compound: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_thresholds_in_order() {
        let cases = [
            (1.0, SentimentLabel::VeryPositive),
            (0.5, SentimentLabel::VeryPositive),
            (0.4999, SentimentLabel::Positive),
            (0.1, SentimentLabel::Positive),
            (0.0999, SentimentLabel::Neutral),
            (0.0, SentimentLabel::Neutral),
            (-0.0999, SentimentLabel::Neutral),
            (-0.1, SentimentLabel::Negative),
            (-0.3, SentimentLabel::Negative),
            (-0.4999, SentimentLabel::Negative),
            (-0.5, SentimentLabel::VeryNegative),
            (-1.0, SentimentLabel::VeryNegative),
        ];

        for (compound, expected) in cases {
            assert_eq!(
                SentimentLabel::from_compound(compound),
                expected,
                "compound {} should map to {}",
                compound,
                expected
            );
        }
    }

    #[test]
    fn test_serializes_with_display_labels() {
        let result = SentimentResult::from_compound(-0.62);
        let json = serde_json::to_value(result).unwrap();

        assert_eq!(json["label"], "Very Negative");
        assert_eq!(json["compound_score"], -0.62);
    }
}

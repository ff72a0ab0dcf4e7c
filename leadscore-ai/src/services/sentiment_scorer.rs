//! Lexicon-based sentiment scoring
//!
//! Deterministic and synchronous. The polarity lexicon is VADER (via the
//! `vader_sentiment` crate), reached through [`PolarityAnalyzer`] so tests can
//! pin exact compound values.

use crate::models::SentimentResult;

/// Source of compound polarity scores in [-1, 1]
pub trait PolarityAnalyzer: Send + Sync {
    fn compound(&self, text: &str) -> f64;
}

/// VADER lexicon and rule set
#[derive(Debug, Default, Clone, Copy)]
pub struct VaderAnalyzer;

impl PolarityAnalyzer for VaderAnalyzer {
    fn compound(&self, text: &str) -> f64 {
        let analyzer = vader_sentiment::SentimentIntensityAnalyzer::new();
        analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }
}

/// Maps message text to a compound score and label
pub struct SentimentScorer {
    analyzer: Box<dyn PolarityAnalyzer>,
}

impl SentimentScorer {
    /// Scorer backed by the VADER lexicon
    pub fn new() -> Self {
        Self::with_analyzer(VaderAnalyzer)
    }

    pub fn with_analyzer(analyzer: impl PolarityAnalyzer + 'static) -> Self {
        Self {
            analyzer: Box::new(analyzer),
        }
    }

    /// Score a message
    ///
    /// Never fails. Empty or whitespace-only input is no-signal: compound 0.0,
    /// label Neutral. The message is analysed as given, without normalization.
    pub fn score(&self, message: &str) -> SentimentResult {
        if message.trim().is_empty() {
            return SentimentResult::neutral();
        }

        let compound = self.analyzer.compound(message);
        if !compound.is_finite() {
            return SentimentResult::neutral();
        }

        SentimentResult::from_compound(compound.clamp(-1.0, 1.0))
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

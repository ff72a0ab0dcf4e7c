//! Composite lead scoring
//!
//! `sentiment_scaled = trunc((compound + 1) * 50)`
//! `composite = trunc(ai_score * 0.7 + sentiment_scaled * 0.3)`, bounded to 0-100
//!
//! Both conversions truncate toward zero (integer-cast semantics), never round.

use tracing::info;

use super::lead_analyzer::LeadAnalyzer;
use super::sentiment_scorer::SentimentScorer;
use crate::models::{CompositeResult, LeadScore};

pub const AI_WEIGHT: f64 = 0.7;
pub const SENTIMENT_WEIGHT: f64 = 0.3;

/// Scale a compound score from [-1, 1] onto [0, 100], truncating
pub fn scale_sentiment(compound: f64) -> i64 {
    ((compound + 1.0) * 50.0) as i64
}

/// Blend an LLM score with a sentiment compound score
pub fn combine(lead_score: &LeadScore, compound: f64) -> u8 {
    let sentiment_scaled = scale_sentiment(compound);
    let blended =
        (lead_score.score as f64 * AI_WEIGHT + sentiment_scaled as f64 * SENTIMENT_WEIGHT) as i64;
    blended.clamp(0, 100) as u8
}

/// End-to-end scoring pipeline for one message
///
/// Sentiment and LLM analysis share no state; they run one after the other
/// on the caller's task.
pub struct LeadScorer {
    sentiment: SentimentScorer,
    analyzer: LeadAnalyzer,
}

impl LeadScorer {
    pub fn new(sentiment: SentimentScorer, analyzer: LeadAnalyzer) -> Self {
        Self {
            sentiment,
            analyzer,
        }
    }

    pub fn analyzer(&self) -> &LeadAnalyzer {
        &self.analyzer
    }

    /// Score a lead message
    ///
    /// Never fails: LLM failures are absorbed into a fallback `LeadScore`.
    pub async fn score(&self, message: &str) -> CompositeResult {
        let sentiment = self.sentiment.score(message);
        let ai_analysis = self.analyzer.analyze(message).await;
        let composite_score = combine(&ai_analysis, sentiment.compound);

        info!(
            sentiment = %sentiment.label,
            compound = sentiment.compound,
            ai_score = ai_analysis.score,
            composite_score,
            "Lead scored"
        );

        CompositeResult {
            message: message.to_string(),
            sentiment,
            ai_analysis,
            composite_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(score: i64) -> LeadScore {
        LeadScore::new(score, "test")
    }

    #[test]
    fn test_scale_sentiment_truncates() {
        assert_eq!(scale_sentiment(-1.0), 0);
        assert_eq!(scale_sentiment(0.0), 50);
        assert_eq!(scale_sentiment(1.0), 100);
        assert_eq!(scale_sentiment(0.57), 78);
        assert_eq!(scale_sentiment(0.34), 67);
        assert_eq!(scale_sentiment(-0.999), 0);
    }

    #[test]
    fn test_combine_reference_values() {
        assert_eq!(combine(&lead(80), 0.6), 80);
        assert_eq!(combine(&lead(70), 0.0), 64);
        assert_eq!(combine(&lead(100), 1.0), 100);
        assert_eq!(combine(&lead(0), -1.0), 0);
        assert_eq!(combine(&lead(10), 1.0), 37);
    }

    #[test]
    fn test_combine_truncates_instead_of_rounding() {
        // 55*0.7 + 67*0.3 = 58.6 → 58
        assert_eq!(combine(&lead(55), 0.34), 58);
        // 33*0.7 + 55*0.3 = 39.6 → 39
        assert_eq!(combine(&lead(33), 0.1), 39);
    }

    #[test]
    fn test_combine_bounds_out_of_range_ai_scores() {
        assert_eq!(combine(&lead(500), 1.0), 100);
        assert_eq!(combine(&lead(-200), -1.0), 0);
    }

    #[test]
    fn test_combine_is_deterministic() {
        assert_eq!(combine(&lead(42), -0.27), combine(&lead(42), -0.27));
    }
}

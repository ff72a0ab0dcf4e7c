//! Composite lead scoring result

use serde::{Deserialize, Serialize};

use super::{LeadScore, SentimentResult};

/// Final scoring artifact returned to callers
///
/// Raw model text and retry counters are not retained here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeResult {
    pub message: String,
    pub sentiment: SentimentResult,
    pub ai_analysis: LeadScore,
    /// Weighted blend of AI score (70%) and scaled sentiment (30%), 0-100
    pub composite_score: u8,
}

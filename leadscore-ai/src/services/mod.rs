//! Lead scoring pipeline components
//!
//! Leaves first:
//! - `openrouter_client`: chat-completion calls (one request per call, no retry)
//! - `sentiment_scorer`: deterministic lexicon sentiment
//! - `json_extractor`: JSON object recovery from noisy model output
//! - `lead_analyzer`: prompt, retry loop, validation, fallback
//! - `composite_scorer`: 70/30 blend and the end-to-end `LeadScorer`

pub mod composite_scorer;
pub mod json_extractor;
pub mod lead_analyzer;
pub mod openrouter_client;
pub mod sentiment_scorer;

pub use composite_scorer::{combine, scale_sentiment, LeadScorer};
pub use json_extractor::extract_json;
pub use lead_analyzer::{
    build_prompt, AnalysisOutcome, AttemptFailure, LeadAnalysis, LeadAnalyzer, RetryPolicy,
};
pub use openrouter_client::{GenerationError, GenerationOptions, OpenRouterClient, TextGenerator};
pub use sentiment_scorer::{PolarityAnalyzer, SentimentScorer, VaderAnalyzer};

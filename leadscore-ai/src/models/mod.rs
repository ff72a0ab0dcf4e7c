//! Data models for lead scoring
//!
//! All records are created and dropped within a single scoring call.
//! Nothing here is cached or persisted.

pub mod composite;
pub mod lead_score;
pub mod sentiment;

pub use composite::CompositeResult;
pub use lead_score::{FallbackKind, LeadScore, SchemaViolation};
pub use sentiment::{SentimentLabel, SentimentResult};

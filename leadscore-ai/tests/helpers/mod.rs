//! Test Helper Utilities
//!
//! Shared utilities for testing leadscore-ai

#![allow(dead_code, unused_imports)]

pub mod app;
pub mod fake_provider;
pub mod scripted_generator;

// Re-export commonly used items
pub use app::{app_state, scripted_app_state, PanickingGenerator};
pub use fake_provider::{spawn_provider, ProviderReply, RecordedRequest};
pub use scripted_generator::{Reply, ScriptedGenerator};

use leadscore_ai::services::PolarityAnalyzer;

/// Polarity analyzer that always returns the same compound score
pub struct FixedPolarity(pub f64);

impl PolarityAnalyzer for FixedPolarity {
    fn compound(&self, _text: &str) -> f64 {
        self.0
    }
}

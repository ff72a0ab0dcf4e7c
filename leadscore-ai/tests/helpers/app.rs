//! Router state builders

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use leadscore_ai::services::{
    GenerationError, GenerationOptions, LeadAnalyzer, LeadScorer, RetryPolicy, SentimentScorer,
    TextGenerator,
};
use leadscore_ai::AppState;

use super::{FixedPolarity, ScriptedGenerator};

/// Generator that panics on every call
pub struct PanickingGenerator;

#[async_trait]
impl TextGenerator for PanickingGenerator {
    async fn generate(
        &self,
        _model: &str,
        _prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        panic!("generator blew up");
    }
}

/// App state with a fixed sentiment and the given generator
///
/// Retries are kept but spaced 1 ms apart.
pub fn app_state(generator: Arc<dyn TextGenerator>, compound: f64) -> AppState {
    let analyzer = LeadAnalyzer::new(generator, "test/model").with_retry_policy(RetryPolicy {
        max_attempts: 3,
        delay: Duration::from_millis(1),
    });
    let sentiment = SentimentScorer::with_analyzer(FixedPolarity(compound));
    AppState::new(LeadScorer::new(sentiment, analyzer))
}

/// App state backed by a scripted generator
pub fn scripted_app_state(generator: ScriptedGenerator, compound: f64) -> AppState {
    app_state(Arc::new(generator), compound)
}

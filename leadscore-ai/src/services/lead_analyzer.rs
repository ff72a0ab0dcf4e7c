//! Lead analysis orchestration
//!
//! Builds the scoring prompt, calls the text generator, extracts and validates
//! the `{score, justification}` record, and retries on failure.
//!
//! **Attempt loop:**
//! 1. Attempting(n): call the generator
//! 2. Failed or zero-length completion, no JSON, or schema violation → attempt
//!    failure
//! 3. Failure with attempts remaining: sleep the fixed delay, go to n+1
//! 4. Failure on the final attempt: FallbackReturned with the record for the
//!    last failure's class (no sleep)
//! 5. Valid record on any attempt: Success, loop ends immediately
//!
//! This is the only component that retries or sleeps. Attempts are sequential.

use std::sync::Arc;
use std::time::Duration;

use leadscore_common::config::AnalysisSettings;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::json_extractor::extract_json;
use super::openrouter_client::{GenerationError, GenerationOptions, TextGenerator};
use crate::models::{FallbackKind, LeadScore, SchemaViolation};

/// Attempt count and fixed inter-attempt delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retry
    pub fn single_shot() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

/// Why one attempt did not produce a `LeadScore`
#[derive(Debug, Error)]
pub enum AttemptFailure {
    #[error("generation failed: {0}")]
    Transport(#[from] GenerationError),

    #[error("empty response from model")]
    EmptyCompletion,

    #[error("no valid JSON found in response")]
    MalformedOutput,

    #[error("schema violation: {0}")]
    Schema(#[from] SchemaViolation),
}

impl AttemptFailure {
    /// Fallback class when this failure ends the loop
    pub fn fallback_kind(&self) -> FallbackKind {
        match self {
            AttemptFailure::MalformedOutput => FallbackKind::NoJsonFound,
            AttemptFailure::Transport(_)
            | AttemptFailure::EmptyCompletion
            | AttemptFailure::Schema(_) => FallbackKind::AnalysisError,
        }
    }
}

/// Terminal state of an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Success { attempts: u32 },
    FallbackReturned { attempts: u32, kind: FallbackKind },
}

impl AnalysisOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            AnalysisOutcome::Success { attempts }
            | AnalysisOutcome::FallbackReturned { attempts, .. } => *attempts,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisOutcome::FallbackReturned { .. })
    }
}

/// Lead score plus how it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadAnalysis {
    pub lead_score: LeadScore,
    pub outcome: AnalysisOutcome,
}

/// Build the scoring prompt for a lead message
///
/// Deterministic: the same message always yields the same prompt. The message
/// is embedded verbatim.
pub fn build_prompt(message: &str) -> String {
    format!(
        r#"You are an expert lead scoring assistant. Your task is to analyze customer messages and determine their likelihood of conversion.

Message to analyze:
"{message}"

Please evaluate this message and provide a JSON response with:
1. A 'score' (an integer between 0 and 100), where:
   - 0: No chance of conversion
   - 50: Neutral interest
   - 100: Guaranteed conversion
2. A 'justification' (a brief explanation of how you arrived at that score)

IMPORTANT: Your response must be a valid JSON object with exactly this structure:
{{"score": <integer>, "justification": "<string>"}}

Do not include any additional text, explanations, or markdown formatting outside the JSON object.
Focus on:
- Level of interest expressed
- Specificity of the inquiry
- Urgency or timeline mentioned
- Request for information or next steps
- Overall engagement level"#
    )
}

/// LLM-backed lead analyzer
pub struct LeadAnalyzer {
    generator: Arc<dyn TextGenerator>,
    model: String,
    options: GenerationOptions,
    retry: RetryPolicy,
}

impl LeadAnalyzer {
    /// Analyzer with the default analysis options (max_tokens=1000,
    /// temperature=0.2) and retry policy (3 attempts, 2 s apart)
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
            options: GenerationOptions::default()
                .with_max_tokens(1000)
                .with_temperature(0.2),
            retry: RetryPolicy::default(),
        }
    }

    /// Analyzer tuned from resolved configuration
    pub fn from_settings(
        generator: Arc<dyn TextGenerator>,
        model: impl Into<String>,
        settings: &AnalysisSettings,
    ) -> Self {
        Self::new(generator, model)
            .with_options(
                GenerationOptions::default()
                    .with_max_tokens(settings.max_tokens)
                    .with_temperature(settings.temperature),
            )
            .with_retry_policy(RetryPolicy {
                max_attempts: settings.max_attempts,
                delay: settings.retry_delay,
            })
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = RetryPolicy {
            max_attempts: retry.max_attempts.max(1),
            delay: retry.delay,
        };
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Score a lead message; never fails
    pub async fn analyze(&self, message: &str) -> LeadScore {
        self.analyze_detailed(message).await.lead_score
    }

    /// Score a lead message with a single attempt and no retry
    pub async fn analyze_once(&self, message: &str) -> LeadAnalysis {
        self.run(message, RetryPolicy::single_shot()).await
    }

    /// Score a lead message and report the terminal state
    pub async fn analyze_detailed(&self, message: &str) -> LeadAnalysis {
        self.run(message, self.retry).await
    }

    async fn run(&self, message: &str, retry: RetryPolicy) -> LeadAnalysis {
        let prompt = build_prompt(message);
        let mut attempt = 1;

        loop {
            match self.attempt(&prompt).await {
                Ok(lead_score) => {
                    info!(
                        attempt,
                        score = lead_score.score,
                        "Lead analysis succeeded"
                    );
                    return LeadAnalysis {
                        lead_score,
                        outcome: AnalysisOutcome::Success { attempts: attempt },
                    };
                }
                Err(failure) if attempt >= retry.max_attempts => {
                    let kind = failure.fallback_kind();
                    warn!(
                        attempts = attempt,
                        error = %failure,
                        fallback = ?kind,
                        "Lead analysis failed on every attempt, returning fallback score"
                    );
                    return LeadAnalysis {
                        lead_score: LeadScore::fallback(kind),
                        outcome: AnalysisOutcome::FallbackReturned {
                            attempts: attempt,
                            kind,
                        },
                    };
                }
                Err(failure) => {
                    warn!(
                        attempt,
                        error = %failure,
                        "Lead analysis attempt failed, retrying in {:?}",
                        retry.delay
                    );
                    tokio::time::sleep(retry.delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt(&self, prompt: &str) -> Result<LeadScore, AttemptFailure> {
        let raw = self
            .generator
            .generate(&self.model, prompt, &self.options)
            .await?;

        // Whitespace-only text is a completion; extraction classes it as no-JSON
        if raw.is_empty() {
            return Err(AttemptFailure::EmptyCompletion);
        }

        let object = match extract_json(&raw) {
            Some(object) => object,
            None => {
                debug!(raw_response = %raw, "No JSON object in model response");
                return Err(AttemptFailure::MalformedOutput);
            }
        };

        Ok(LeadScore::from_object(&object)?)
    }
}

//! Chat-completion client for OpenRouter (OpenAI-compatible)
//!
//! Thin request/response wrapper: one outbound POST per `generate` call, no
//! caching, no retry. Retry discipline belongs to the lead analyzer.
//!
//! # API Reference
//! - Endpoint: `{base_url}/chat/completions`
//! - Auth: `Authorization: Bearer <api key>`
//! - Success body: `{"choices": [{"message": {"content": "..."}}]}`

use async_trait::async_trait;
use leadscore_common::config::ServiceConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Prompt sent by the startup connectivity probe
pub const PROBE_PROMPT: &str = "Hello, this is a test message.Who are you?";

/// Generation failure (the TransportFailure class)
///
/// Callers treat every variant as "no usable completion".
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Status(u16, String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Response contained no completion")]
    NoCompletion,

    #[error("Streaming responses are not supported")]
    StreamingUnsupported,

    #[error("Client build failed: {0}")]
    Build(String),
}

/// Per-call generation options
///
/// Defaults: max_tokens=256, temperature=0.7, top_p=1.0, stream=false,
/// no stop sequences, both penalties 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub max_tokens: u32,
    /// Sampling temperature in [0, 2]
    pub temperature: f32,
    /// Nucleus sampling mass in (0, 1]
    pub top_p: f32,
    /// Must stay false; the full completion is always collected before parsing
    pub stream: bool,
    pub stop: Option<Vec<String>>,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: 256,
            temperature: 0.7,
            top_p: 1.0,
            stream: false,
            stop: None,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

impl GenerationOptions {
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = Some(stop);
        self
    }
}

/// Text generation seam
///
/// Implemented by [`OpenRouterClient`] for production and by scripted doubles
/// in tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for a single user prompt
    ///
    /// # Errors
    /// Any transport error, non-2xx status, undecodable body, or missing
    /// completion text.
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    stream: bool,
    frequency_penalty: f32,
    presence_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// OpenRouter API client
///
/// Holds fixed credentials and base URL only, so one instance is shared by
/// every request for the life of the process.
pub struct OpenRouterClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenRouterClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GenerationError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| GenerationError::Build(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, GenerationError> {
        Self::new(
            config.api_key.clone(),
            config.base_url.clone(),
            config.request_timeout,
        )
    }

    /// Build a ready client for service startup
    ///
    /// When the startup probe is enabled, a short test prompt must succeed
    /// within `config.analysis.max_attempts` tries (spaced by the retry delay)
    /// before the client is handed out.
    pub async fn connect(config: &ServiceConfig) -> leadscore_common::Result<Self> {
        let client = Self::from_config(config)
            .map_err(|e| leadscore_common::Error::Config(e.to_string()))?;

        if !config.startup_probe {
            info!("Startup probe disabled, skipping provider connectivity check");
            return Ok(client);
        }

        client
            .probe(
                &config.model,
                config.analysis.max_attempts,
                config.analysis.retry_delay,
            )
            .await
            .map_err(|e| {
                leadscore_common::Error::Config(format!(
                    "Failed to reach text-generation provider at {} after {} attempts: {}",
                    client.base_url, config.analysis.max_attempts, e
                ))
            })?;

        Ok(client)
    }

    /// Check connectivity with a short prompt, retrying with a fixed delay
    pub async fn probe(
        &self,
        model: &str,
        max_attempts: u32,
        retry_delay: Duration,
    ) -> Result<(), GenerationError> {
        let options = GenerationOptions::default()
            .with_max_tokens(100)
            .with_temperature(0.2);

        let mut attempt = 1;
        loop {
            match self.generate(model, PROBE_PROMPT, &options).await {
                Ok(reply) if !reply.trim().is_empty() => {
                    info!(model = %model, attempt, "Text-generation provider reachable");
                    return Ok(());
                }
                Ok(_) => {
                    if attempt >= max_attempts {
                        return Err(GenerationError::NoCompletion);
                    }
                    warn!(attempt, "Probe returned empty completion, retrying in {:?}", retry_delay);
                }
                Err(e) => {
                    if attempt >= max_attempts {
                        return Err(e);
                    }
                    warn!(attempt, error = %e, "Probe failed, retrying in {:?}", retry_delay);
                }
            }
            tokio::time::sleep(retry_delay).await;
            attempt += 1;
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn send(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        if options.stream {
            return Err(GenerationError::StreamingUnsupported);
        }

        let body = ChatCompletionRequest {
            model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
            stream: false,
            frequency_penalty: options.frequency_penalty,
            presence_penalty: options.presence_penalty,
            stop: options.stop.as_deref(),
        };

        debug!(model = %model, max_tokens = options.max_tokens, "Sending chat completion request");

        let response = self
            .http_client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status(status.as_u16(), error_text));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Decode(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GenerationError::NoCompletion)
    }
}

#[async_trait]
impl TextGenerator for OpenRouterClient {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        let result = self.send(model, prompt, options).await;
        if let Err(e) = &result {
            warn!(model = %model, error = %e, "Chat completion call failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = GenerationOptions::default();
        assert_eq!(options.max_tokens, 256);
        assert!((options.temperature - 0.7).abs() < f32::EPSILON);
        assert!((options.top_p - 1.0).abs() < f32::EPSILON);
        assert!(!options.stream);
        assert!(options.stop.is_none());
        assert_eq!(options.frequency_penalty, 0.0);
        assert_eq!(options.presence_penalty, 0.0);
    }

    #[test]
    fn test_request_body_omits_stop_when_unset() {
        let options = GenerationOptions::default();
        let body = ChatCompletionRequest {
            model: "test/model",
            messages: [ChatMessage {
                role: "user",
                content: "hi",
            }],
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
            stream: false,
            frequency_penalty: options.frequency_penalty,
            presence_penalty: options.presence_penalty,
            stop: options.stop.as_deref(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "test/model");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
        assert_eq!(json["max_tokens"], 256);
        assert_eq!(json["stream"], false);
        assert!(json.get("stop").is_none());
    }

    #[test]
    fn test_trailing_slash_trimmed_from_base_url() {
        let client = OpenRouterClient::new("key", "https://openrouter.ai/api/v1/", None).unwrap();
        assert_eq!(client.completions_url(), "https://openrouter.ai/api/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_streaming_rejected_without_network_call() {
        // Unroutable base URL: reaching the network would fail differently
        let client = OpenRouterClient::new("key", "http://127.0.0.1:9", None).unwrap();
        let options = GenerationOptions {
            stream: true,
            ..Default::default()
        };

        let err = client.generate("m", "p", &options).await.unwrap_err();
        assert!(matches!(err, GenerationError::StreamingUnsupported));
    }
}

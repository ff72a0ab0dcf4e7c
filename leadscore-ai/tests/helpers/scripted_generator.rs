//! Scripted text generator
//!
//! Replays a fixed list of replies in order and records every call.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use leadscore_ai::services::{GenerationError, GenerationOptions, TextGenerator};

/// One scripted generator reply
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Network,
    Status(u16),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    fn into_result(self) -> Result<String, GenerationError> {
        match self {
            Reply::Text(text) => Ok(text),
            Reply::Network => Err(GenerationError::Network("connection refused".to_string())),
            Reply::Status(code) => Err(GenerationError::Status(code, "scripted failure".to_string())),
        }
    }
}

/// Recorded generator call
#[derive(Debug, Clone)]
pub struct Call {
    pub model: String,
    pub prompt: String,
    pub options: GenerationOptions,
}

/// Generator double driven by a reply script
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Reply>>,
    repeat: Option<Reply>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedGenerator {
    /// Replay `replies` in order; a network error once exhausted
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            script: Mutex::new(replies.into()),
            repeat: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer every call with the same reply
    pub fn always(reply: Reply) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            repeat: Some(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(Call {
            model: model.to_string(),
            prompt: prompt.to_string(),
            options: options.clone(),
        });

        let next = self.script.lock().unwrap().pop_front();
        match next.or_else(|| self.repeat.clone()) {
            Some(reply) => reply.into_result(),
            None => Err(GenerationError::Network("script exhausted".to_string())),
        }
    }
}

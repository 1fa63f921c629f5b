//! In-memory completion capabilities for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::llm_client::{CompletionCapability, LlmError};

/// Scripted reply for one call.
pub enum Reply {
    Text(String),
    Error(LlmError),
}

/// Returns scripted replies in order and records every prompt it receives.
/// Panics if called more times than it has replies.
#[derive(Default)]
pub struct ScriptedCapability {
    replies: Mutex<VecDeque<Reply>>,
    prompts: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedCapability {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new([Reply::Text(text.to_string())])
    }

    pub fn error(err: LlmError) -> Self {
        Self::new([Reply::Error(err)])
    }

    /// Every call waits on `gate` before replying, so tests can hold a request in flight.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionCapability for ScriptedCapability {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Error(err)) => Err(err),
            None => panic!("ScriptedCapability ran out of replies"),
        }
    }
}

//! In-process `TextGenerator` fakes for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{LlmError, TextGenerator};

/// A canned model reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Status { status: u16, message: String },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    pub fn json(value: serde_json::Value) -> Self {
        Reply::Text(value.to_string())
    }

    pub fn status(status: u16, message: &str) -> Self {
        Reply::Status {
            status,
            message: message.to_string(),
        }
    }

    fn into_result(self) -> Result<String, LlmError> {
        match self {
            Reply::Text(text) => Ok(text),
            Reply::Status { status, message } => Err(LlmError::Api { status, message }),
        }
    }
}

type Responder = Box<dyn Fn(&str, usize) -> Reply + Send + Sync>;

/// Replays scripted replies and records every prompt it receives.
pub struct ScriptedGenerator {
    responder: Responder,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    /// Replies in order; the last reply repeats once the script runs out.
    pub fn new(replies: Vec<Reply>) -> Self {
        assert!(!replies.is_empty(), "script needs at least one reply");
        Self::from_fn(move |_, call| replies[call.min(replies.len() - 1)].clone())
    }

    pub fn repeating(reply: Reply) -> Self {
        Self::new(vec![reply])
    }

    /// Every call fails with a non-retryable transport error.
    pub fn offline() -> Self {
        Self::repeating(Reply::status(500, "network unreachable"))
    }

    /// Chooses a reply from the prompt text and the zero-based call index.
    pub fn from_fn(f: impl Fn(&str, usize) -> Reply + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(f),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.responder)(prompt, call).into_result()
    }
}

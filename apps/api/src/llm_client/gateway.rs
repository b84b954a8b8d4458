//! Model Gateway: turns a prompt into a typed JSON value, or an explicit outcome
//! saying why it could not.
//!
//! Retry policy:
//! - quota / rate-limit exhaustion → stop at once, `GatewayOutcome::QuotaExhausted`
//! - transient overload → sleep `2^attempt` × backoff unit, retry up to the budget
//! - anything else (including malformed JSON) → `GatewayOutcome::Failed` immediately
//!
//! Attempts are strictly sequential. The gateway never touches session state.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::llm_client::json_extract::extract_json;
use crate::llm_client::{LlmError, TextGenerator};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Message fragments that mark quota exhaustion when no status code is available.
pub const QUOTA_MARKERS: &[&str] = &["429", "quota", "exceeded"];
/// Message fragments that mark transient overload when no status code is available.
pub const OVERLOAD_MARKERS: &[&str] = &["503", "overloaded"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    QuotaExhausted,
    Overloaded,
    Other,
}

impl LlmError {
    /// Classifies a transport failure. A structured HTTP status wins; the message
    /// markers above are consulted only when the status says nothing.
    pub fn classify(&self) -> ErrorClass {
        match self {
            LlmError::Api { status, message } => {
                classify_status(*status).unwrap_or_else(|| classify_message(message))
            }
            LlmError::Http(e) => e
                .status()
                .and_then(|s| classify_status(s.as_u16()))
                .unwrap_or_else(|| classify_message(&e.to_string())),
            _ => ErrorClass::Other,
        }
    }
}

fn classify_status(status: u16) -> Option<ErrorClass> {
    match status {
        429 => Some(ErrorClass::QuotaExhausted),
        503 => Some(ErrorClass::Overloaded),
        _ => None,
    }
}

fn classify_message(message: &str) -> ErrorClass {
    let lower = message.to_lowercase();
    if QUOTA_MARKERS.iter().any(|m| lower.contains(m)) {
        ErrorClass::QuotaExhausted
    } else if OVERLOAD_MARKERS.iter().any(|m| lower.contains(m)) {
        ErrorClass::Overloaded
    } else {
        ErrorClass::Other
    }
}

/// Result of one gateway call. Callers treat everything but `Parsed` as
/// "use the fallback".
#[derive(Debug)]
pub enum GatewayOutcome<T> {
    Parsed(T),
    /// Quota is gone for this session; retrying cannot help.
    QuotaExhausted,
    Failed(LlmError),
}

#[derive(Clone)]
pub struct ModelGateway {
    generator: Arc<dyn TextGenerator>,
    max_attempts: u32,
    backoff_unit: Duration,
}

impl ModelGateway {
    pub fn new(generator: Arc<dyn TextGenerator>, max_attempts: u32) -> Self {
        Self {
            generator,
            max_attempts: max_attempts.max(1),
            backoff_unit: Duration::from_secs(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Calls the model and deserializes the JSON object found in its reply.
    pub async fn generate_json<T: DeserializeOwned>(&self, prompt: &str) -> GatewayOutcome<T> {
        let mut attempt = 1u32;

        loop {
            let err = match self.generator.generate(prompt).await {
                Ok(text) => {
                    debug!("Model replied on attempt {attempt} ({} chars)", text.len());
                    return match parse_json::<T>(&text) {
                        Ok(value) => GatewayOutcome::Parsed(value),
                        Err(e) => GatewayOutcome::Failed(e),
                    };
                }
                Err(err) => err,
            };

            match err.classify() {
                ErrorClass::QuotaExhausted => {
                    warn!("Model quota exhausted, skipping retries: {err}");
                    return GatewayOutcome::QuotaExhausted;
                }
                ErrorClass::Overloaded if attempt < self.max_attempts => {
                    let delay = self.backoff_unit * 2u32.pow(attempt);
                    warn!(
                        "Model overloaded on attempt {}/{}, retrying after {}ms...",
                        attempt,
                        self.max_attempts,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                ErrorClass::Overloaded => {
                    return GatewayOutcome::Failed(LlmError::Overloaded { attempts: attempt });
                }
                ErrorClass::Other => return GatewayOutcome::Failed(err),
            }
        }
    }
}

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let candidate = extract_json(text);
    if candidate.is_empty() {
        return Err(LlmError::MalformedResponse);
    }
    serde_json::from_str(candidate).map_err(LlmError::Parse)
}

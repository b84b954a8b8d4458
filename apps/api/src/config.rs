use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::gateway::DEFAULT_MAX_ATTEMPTS;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub llm_max_retries: u32,
    pub deep_dive_question_count: usize,
    pub skill_detail_delay_ms: u64,
    pub session_idle_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            temperature: parse_env("GEMINI_TEMPERATURE", 0.8)?,
            top_k: parse_env("GEMINI_TOP_K", 40)?,
            top_p: parse_env("GEMINI_TOP_P", 0.95)?,
            llm_max_retries: parse_env("LLM_MAX_RETRIES", DEFAULT_MAX_ATTEMPTS)?,
            deep_dive_question_count: parse_env("DEEP_DIVE_QUESTION_COUNT", 30)?,
            skill_detail_delay_ms: parse_env("SKILL_DETAIL_DELAY_MS", 1500)?,
            session_idle_timeout_secs: parse_env("SESSION_IDLE_TIMEOUT_SECS", 3600)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_timeout_secs)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional variable, falling back to `default` when unset.
/// A set-but-unparseable value is an error rather than a silent default.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u32 = parse_env("COMPASS_TEST_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("COMPASS_TEST_BAD_NUMBER", "three");
        let result: Result<u32> = parse_env("COMPASS_TEST_BAD_NUMBER", 3);
        assert!(result.is_err());
        std::env::remove_var("COMPASS_TEST_BAD_NUMBER");
    }

    #[test]
    fn test_parse_env_reads_float() {
        std::env::set_var("COMPASS_TEST_TEMPERATURE", " 0.25 ");
        let value: f32 = parse_env("COMPASS_TEST_TEMPERATURE", 0.8).unwrap();
        assert!((value - 0.25).abs() < f32::EPSILON);
        std::env::remove_var("COMPASS_TEST_TEMPERATURE");
    }
}

use anyhow::{Context, Result};

use crate::llm_client::LlmClient;

/// AI configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub anthropic_api_key: String,
    /// Per-request timeout for provider calls, in seconds.
    pub request_timeout_secs: u64,
}

impl AiConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(AiConfig {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            request_timeout_secs: std::env::var("LLM_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("LLM_REQUEST_TIMEOUT_SECS must be a number of seconds")?,
        })
    }

    /// Builds the provider client this configuration describes.
    pub fn client(&self) -> LlmClient {
        LlmClient::with_timeout(self.anthropic_api_key.clone(), self.request_timeout_secs)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

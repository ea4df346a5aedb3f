//! LLM provider adapters
//!
//! The recommendation service treats the model as an untrusted text
//! generator behind the [`LlmClient`] trait. Each adapter maps transport
//! failures, timeouts and non-success statuses to [`Error::Upstream`].

pub mod gemini;
pub mod openai;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

use crate::config::{ModelConfig, ProviderKind};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// One completion call: system instruction plus a single user utterance
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
    pub temperature: f32,
}

/// Chat-completion backend
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Return the raw completion text
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String>;

    /// Provider name for logs
    fn name(&self) -> &str;
}

/// Build the configured provider adapter.
///
/// Fails with [`Error::Config`] when the API key cannot be resolved.
pub fn build_client(config: &ModelConfig) -> Result<Arc<dyn LlmClient>> {
    let api_key = config.resolve_api_key().ok_or_else(|| {
        Error::Config(format!(
            "No API key for provider '{}': set ${}",
            config.provider,
            config.api_key_ref.to_uppercase()
        ))
    })?;

    let client: Arc<dyn LlmClient> = match config.provider {
        ProviderKind::Gemini => Arc::new(GeminiClient::new(config, api_key)?),
        ProviderKind::Openai => Arc::new(OpenAiClient::new(config, api_key)?),
    };
    tracing::info!(provider = %config.provider, model = %config.model, "LLM client ready");
    Ok(client)
}

/// HTTP client shared by the adapters, with the configured timeout
pub(crate) fn http_client(config: &ModelConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("webtoon-finder/", env!("CARGO_PKG_VERSION")))
        .timeout(config.request_timeout())
        .build()
        .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Map a reqwest failure to an upstream error
pub(crate) fn upstream_error(provider: &str, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Upstream(format!("{} request timed out", provider))
    } else {
        Error::Upstream(format!("{} request failed: {}", provider, err))
    }
}

/// Turn a non-success response into an upstream error carrying the body
pub(crate) async fn check_status(
    provider: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Upstream(format!(
        "{} returned {}: {}",
        provider,
        status,
        body.chars().take(500).collect::<String>()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client_without_key() {
        let config = ModelConfig {
            api_key_ref: "webtoon_finder_llm_test_no_key".to_string(),
            ..Default::default()
        };
        let err = build_client(&config).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("WEBTOON_FINDER_LLM_TEST_NO_KEY"));
    }

    #[test]
    fn test_build_client_selects_provider() {
        std::env::set_var("WEBTOON_FINDER_LLM_TEST_KEY", "k");
        let gemini = ModelConfig {
            api_key_ref: "WEBTOON_FINDER_LLM_TEST_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(build_client(&gemini).unwrap().name(), "gemini");

        let openai = ModelConfig {
            provider: ProviderKind::Openai,
            model: "gpt-4o-mini".to_string(),
            api_key_ref: "WEBTOON_FINDER_LLM_TEST_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(build_client(&openai).unwrap().name(), "openai");
    }
}

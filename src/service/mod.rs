//! Recommendation service: stateless request handling
//!
//! Each call forwards one user utterance, together with the precomputed
//! system instruction, to the model and returns the raw completion text.
//! No conversation history is forwarded; every request stands alone.

pub mod handler;
pub mod types;

pub use handler::{chat_router, ServiceState};
pub use types::{ChatError, ChatReply, ChatRequest, MESSAGE_REQUIRED};

use crate::catalog::Catalog;
use crate::context::CatalogContext;
use crate::error::{Error, Result};
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompt::SystemPrompt;
use std::sync::Arc;
use std::time::Instant;

/// Catalog-grounded recommendation service
pub struct RecommendationService {
    prompt: SystemPrompt,
    llm: Arc<dyn LlmClient>,
    temperature: f32,
}

impl RecommendationService {
    /// Create a service from an already assembled prompt
    pub fn new(prompt: SystemPrompt, llm: Arc<dyn LlmClient>, temperature: f32) -> Self {
        Self {
            prompt,
            llm,
            temperature,
        }
    }

    /// Build the catalog context and system prompt once, then wrap the model
    pub fn from_catalog(catalog: &Catalog, llm: Arc<dyn LlmClient>, temperature: f32) -> Result<Self> {
        let context = CatalogContext::build(catalog);
        let prompt = SystemPrompt::from_context(&context)?;
        Ok(Self::new(prompt, llm, temperature))
    }

    /// The system instruction sent with every request
    pub fn prompt(&self) -> &SystemPrompt {
        &self.prompt
    }

    /// Ask the model for recommendations matching `utterance`.
    ///
    /// Empty or whitespace-only input is rejected before any model call.
    /// Model failures are returned as [`Error::Upstream`] and not retried.
    pub async fn recommend(&self, utterance: &str) -> Result<String> {
        if utterance.trim().is_empty() {
            return Err(Error::InvalidRequest(MESSAGE_REQUIRED.to_string()));
        }

        let started = Instant::now();
        tracing::info!(
            provider = self.llm.name(),
            chars = utterance.chars().count(),
            "Recommendation requested"
        );

        let request = CompletionRequest {
            system: self.prompt.as_str(),
            user: utterance,
            temperature: self.temperature,
        };

        match self.llm.complete(&request).await {
            Ok(reply) => {
                tracing::debug!(
                    latency_ms = started.elapsed().as_millis() as u64,
                    reply_chars = reply.chars().count(),
                    "Recommendation completed"
                );
                Ok(reply)
            }
            Err(e) => {
                tracing::error!(provider = self.llm.name(), error = %e, "LLM call failed");
                Err(match e {
                    Error::Upstream(_) => e,
                    other => Error::Upstream(other.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::interpret;
    use crate::test_helpers::{romance_reply, sample_catalog, ScriptedLlm};

    fn service(llm: Arc<ScriptedLlm>) -> RecommendationService {
        RecommendationService::from_catalog(&sample_catalog(), llm, 0.7).unwrap()
    }

    #[tokio::test]
    async fn test_recommend_forwards_prompt_and_utterance() {
        let llm = Arc::new(ScriptedLlm::replying(romance_reply()));
        let svc = service(llm.clone());

        let reply = svc.recommend("달콤한 로맨스 추천해줘").await.unwrap();
        assert_eq!(reply, romance_reply());
        assert_eq!(llm.calls(), 1);
        assert_eq!(llm.last_user().as_deref(), Some("달콤한 로맨스 추천해줘"));
        assert_eq!(llm.last_system().as_deref(), Some(svc.prompt().as_str()));
    }

    #[tokio::test]
    async fn test_prompt_contains_projected_catalog() {
        let svc = service(Arc::new(ScriptedLlm::replying("[]")));
        let prompt = svc.prompt().as_str();
        assert!(prompt.contains("유미의 세포들"));
        assert!(prompt.contains("화산귀환"));
        assert!(!prompt.contains("매주\\n연재"));
    }

    #[tokio::test]
    async fn test_empty_utterance_rejected_without_call() {
        let llm = Arc::new(ScriptedLlm::replying("[]"));
        let svc = service(llm.clone());

        for input in ["", "   ", "\n\t"] {
            let err = svc.recommend(input).await.unwrap_err();
            assert!(matches!(err, Error::InvalidRequest(_)));
        }
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_not_retried() {
        let llm = Arc::new(ScriptedLlm::failing("quota exceeded"));
        let svc = service(llm.clone());

        let err = svc.recommend("무협 추천").await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_romance_scenario_yields_catalog_card() {
        let catalog = sample_catalog();
        let svc = service(Arc::new(ScriptedLlm::replying(romance_reply())));

        let reply = svc.recommend("달콤한 로맨스 추천해줘").await.unwrap();
        let interp = interpret(&reply);
        let titles: Vec<String> = interp.recommendations().map(|r| r.title.clone()).collect();
        assert!(!titles.is_empty());
        assert!(titles
            .iter()
            .all(|t| catalog.entries().iter().any(|e| &e.title == t)));
    }

    #[tokio::test]
    async fn test_empty_catalog_service() {
        let svc = RecommendationService::from_catalog(
            &Catalog::default(),
            Arc::new(ScriptedLlm::replying("[]")),
            0.7,
        )
        .unwrap();
        assert!(!svc.prompt().as_str().is_empty());
    }
}

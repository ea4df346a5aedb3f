//! Google Gemini `generateContent` adapter

use super::{check_status, http_client, upstream_error, CompletionRequest, LlmClient};
use crate::config::ModelConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Gemini REST client
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client for the configured model
    pub fn new(config: &ModelConfig, api_key: String) -> Result<Self> {
        Ok(Self {
            http: http_client(config)?,
            base_url: config.base_url(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String> {
        let started = Instant::now();
        let body = GenerateContentRequest::from_completion(request);

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| upstream_error("gemini", e))?;

        let response = check_status("gemini", response).await?;
        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse Gemini response: {}", e)))?;

        let text = parsed.text()?;
        tracing::debug!(
            model = %self.model,
            latency_ms = started.elapsed().as_millis() as u64,
            reply_chars = text.chars().count(),
            "Gemini completion finished"
        );
        Ok(text)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_completion(request: &CompletionRequest<'a>) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: request.system,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: request.user }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Default)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize, Default)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> Result<String> {
        let text: String = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::Upstream("Gemini returned an empty completion".to_string()));
        }
        Ok(text)
    }
}

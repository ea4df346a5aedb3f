//! OpenAI-compatible `chat/completions` adapter (OpenAI, OpenRouter, local gateways)

use super::{check_status, http_client, upstream_error, CompletionRequest, LlmClient};
use crate::config::ModelConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// OpenAI-compatible REST client
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiClient {
    /// Create a client for the configured model
    pub fn new(config: &ModelConfig, api_key: String) -> Result<Self> {
        Ok(Self {
            http: http_client(config)?,
            base_url: config.base_url(),
            model: config.model.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String> {
        let started = Instant::now();
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.user,
                },
            ],
            temperature: request.temperature,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| upstream_error("openai", e))?;

        let response = check_status("openai", response).await?;
        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse OpenAI response: {}", e)))?;

        let text = parsed.text()?;
        tracing::debug!(
            model = %self.model,
            latency_ms = started.elapsed().as_millis() as u64,
            reply_chars = text.chars().count(),
            "OpenAI completion finished"
        );
        Ok(text)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
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
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn text(&self) -> Result<String> {
        match self.choices.first().and_then(|c| c.message.content.clone()) {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(Error::Upstream("OpenAI returned an empty completion".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, routing::post, Json, Router};
    use serde_json::{json, Value};

    #[test]
    fn test_response_text() {
        let resp: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "[]"}, "finish_reason": "stop"}]
        }))
        .unwrap();
        assert_eq!(resp.text().unwrap(), "[]");
    }

    #[test]
    fn test_response_empty() {
        let resp: ChatCompletionResponse =
            serde_json::from_value(json!({"choices": [{"message": {"content": null}}]})).unwrap();
        assert!(matches!(resp.text(), Err(Error::Upstream(_))));

        let resp: ChatCompletionResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(resp.text().is_err());
    }

    #[tokio::test]
    async fn test_complete_against_local_server() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer sk-test");
                assert_eq!(body["model"], "gpt-4o-mini");
                assert_eq!(body["messages"][0]["role"], "system");
                assert_eq!(body["messages"][1]["content"], "hi");
                Json(json!({"choices": [{"message": {"content": "hello"}}]}))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = ModelConfig {
            provider: crate::config::ProviderKind::Openai,
            model: "gpt-4o-mini".to_string(),
            base_url: Some(format!("http://{}/v1", addr)),
            ..Default::default()
        };
        let client = OpenAiClient::new(&config, "sk-test".to_string()).unwrap();
        let text = client
            .complete(&CompletionRequest {
                system: "sys",
                user: "hi",
                temperature: 0.7,
            })
            .await
            .unwrap();
        assert_eq!(text, "hello");
    }
}

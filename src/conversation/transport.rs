//! Chat transports: how a conversation reaches the recommendation service

use crate::error::{Error, Result};
use crate::service::types::{ChatError, ChatReply, ChatRequest};
use crate::service::RecommendationService;
use async_trait::async_trait;
use std::time::Duration;

/// Delivers one utterance and returns the raw assistant reply
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &str) -> Result<String>;
}

/// In-process transport: call the service directly
#[async_trait]
impl ChatTransport for RecommendationService {
    async fn send(&self, message: &str) -> Result<String> {
        self.recommend(message).await
    }
}

/// HTTP transport against a running `webtoon-finder serve`
pub struct HttpChatClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpChatClient {
    /// Create a client for a server base URL (e.g. `http://127.0.0.1:3000`)
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/chat", server_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl ChatTransport for HttpChatClient {
    async fn send(&self, message: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest::new(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ChatError>()
                .await
                .map(|e| e.error)
                .unwrap_or_default();
            return Err(Error::Transport(format!("{} {}", status, detail)));
        }

        let body: ChatReply = response.json().await?;
        Ok(body.reply)
    }
}

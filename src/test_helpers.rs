#![cfg(test)]

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::{Error, Result};
use crate::llm::{CompletionRequest, LlmClient};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// [`LlmClient`] that returns a fixed reply (or a fixed upstream failure)
/// and records what it was asked.
pub struct ScriptedLlm {
    reply: std::result::Result<String, String>,
    calls: AtomicUsize,
    last_user: Mutex<Option<String>>,
    last_system: Mutex<Option<String>>,
}

impl ScriptedLlm {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::with(Ok(reply.into()))
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with(Err(reason.into()))
    }

    fn with(reply: std::result::Result<String, String>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_user: Mutex::new(None),
            last_system: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_user(&self) -> Option<String> {
        self.last_user.lock().unwrap().clone()
    }

    pub fn last_system(&self) -> Option<String> {
        self.last_system.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_user.lock().unwrap() = Some(request.user.to_string());
        *self.last_system.lock().unwrap() = Some(request.system.to_string());
        self.reply.clone().map_err(Error::Upstream)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Small catalog with one romance entry and one action entry
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        CatalogEntry {
            title: "유미의 세포들".to_string(),
            author: "이동건".to_string(),
            link: "https://comic.example.com/yumi".to_string(),
            thumbnail: "https://img.example.com/yumi.jpg".to_string(),
            genres: vec!["#로맨스".to_string(), "#일상".to_string()],
            description: "평범한 직장인 유미의 머릿속 세포들이 들려주는 달콤한 연애 이야기".to_string(),
            age_rating: Some("전체 이용가".to_string()),
        },
        CatalogEntry {
            title: "화산귀환".to_string(),
            author: "비가".to_string(),
            link: "https://comic.example.com/hwasan".to_string(),
            thumbnail: "https://img.example.com/hwasan.jpg".to_string(),
            genres: vec!["#무협".to_string(), "매주\n연재".to_string(), "#액션".to_string()],
            description: "대화산파 13대 제자 청명이 몰락한 화산파로 돌아온다".to_string(),
            age_rating: None,
        },
    ])
}

/// A well-formed reply recommending the romance entry of [`sample_catalog`]
pub fn romance_reply() -> String {
    serde_json::json!([
        {"type": "text", "content": "달콤한 로맨스를 찾으신다면 이 작품을 추천해요!"},
        {
            "type": "webtoon",
            "title": "유미의 세포들",
            "author": "이동건",
            "link": "https://comic.example.com/yumi",
            "thumbnail": "https://img.example.com/yumi.jpg",
            "reason": "세포들의 시선으로 그린 설레는 연애 이야기예요."
        }
    ])
    .to_string()
}

//! Webtoon Finder - conversational webtoon recommendations
//!
//! A user describes what they feel like reading; the assistant answers with
//! a short explanation and recommendation cards chosen strictly from a fixed
//! catalog. The catalog is projected once at startup into a compact context,
//! embedded in a system instruction, and sent with every single-turn request.
//!
//! ## Architecture
//!
//! ```text
//!   catalog JSON ──▶ Catalog ──▶ CatalogContext ──▶ SystemPrompt
//!                                                        │ (built once)
//!                                                        ▼
//! ┌──────────────┐  POST /api/chat  ┌──────────────────────────────┐
//! │ Conversation │ ───────────────▶ │    RecommendationService     │
//! │  (state      │                  │  system prompt + utterance   │
//! │   machine)   │ ◀─────────────── │          │                   │
//! └──────┬───────┘   { reply }      │          ▼                   │
//!        │                          │   LlmClient (Gemini/OpenAI)  │
//!        ▼                          └──────────────────────────────┘
//!   interpret(reply) ──▶ [text | webtoon] blocks, or raw prose fallback
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: catalog records and loading
//! - [`context`]: compact per-entry projection for the model
//! - [`prompt`]: system instruction assembly
//! - [`llm`]: model provider clients
//! - [`service`]: recommendation service and HTTP handlers
//! - [`interpreter`]: reply to content block parsing
//! - [`conversation`]: client-side chat state machine
//! - [`api`]: the assembled HTTP application
//! - [`config`]: configuration management

pub mod api;
pub mod catalog;
pub mod config;
pub mod context;
pub mod conversation;
pub mod error;
pub mod interpreter;
pub mod llm;
pub mod prompt;
pub mod service;

mod test_helpers;

pub use config::AppConfig;
pub use error::{Error, Result};

//! Webtoon Finder error types

use thiserror::Error;

/// Webtoon Finder error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog could not be loaded or parsed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// The caller sent an empty or missing utterance
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The LLM call failed (network, quota, timeout, bad status)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The chat server answered with a non-success status
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Whether the error was caused by the caller rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidRequest(_))
    }
}

/// Result type alias for Webtoon Finder operations
pub type Result<T> = std::result::Result<T, Error>;

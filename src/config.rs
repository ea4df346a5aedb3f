//! Webtoon Finder configuration management

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main Webtoon Finder configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Catalog source configuration
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Model configuration
    #[serde(default)]
    pub model: ModelConfig,

    /// Chat client configuration
    #[serde(default)]
    pub chat: ChatConfig,
}

impl AppConfig {
    /// Parse a TOML configuration document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve configuration: explicit path, then the per-user default file,
    /// then built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Default config location (`<config_dir>/webtoon-finder/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|p| p.join("webtoon-finder").join("config.toml"))
    }

    /// Render as pretty TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed CORS origins (empty = any)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// `host:port` listen address
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Catalog source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the catalog JSON file
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/webtoons.json"),
        }
    }
}

/// LLM provider selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Google Gemini `generateContent` API
    #[default]
    Gemini,

    /// Any OpenAI-compatible `chat/completions` endpoint
    Openai,
}

impl ProviderKind {
    /// Base URL used when none is configured
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            ProviderKind::Openai => "https://api.openai.com/v1",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::Openai => write!(f, "openai"),
        }
    }
}

/// Model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider backing the recommendation service
    pub provider: ProviderKind,

    /// Provider-native model id
    pub model: String,

    /// Custom base URL
    #[serde(default)]
    pub base_url: Option<String>,

    /// Name of the environment variable holding the API key
    pub api_key_ref: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Gemini,
            model: "gemini-2.5-flash-lite".to_string(),
            base_url: None,
            api_key_ref: "gemini_api_key".to_string(),
            temperature: 0.7,
            request_timeout_secs: 30,
        }
    }
}

impl ModelConfig {
    /// Effective base URL (configured or provider default), without trailing slash
    pub fn base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
            .trim_end_matches('/')
            .to_string()
    }

    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolve the API key from the environment.
    ///
    /// `api_key_ref` names an environment variable (e.g. `"gemini_api_key"` →
    /// reads `$GEMINI_API_KEY`). The exact casing is tried first, then the
    /// UPPER_CASE form.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_ref)
            .or_else(|_| std::env::var(self.api_key_ref.to_uppercase()))
            .ok()
            .filter(|k| !k.is_empty())
    }
}

/// Chat client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Recommendation server used by `chat --server`
    pub server_url: String,

    /// First assistant message of every conversation
    pub greeting: String,

    /// Assistant message shown when a request fails
    pub apology: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:3000".to_string(),
            greeting: "안녕하세요! 취향에 맞는 웹툰을 찾아드릴게요. 어떤 장르나 스토리를 좋아하시나요?"
                .to_string(),
            apology: "죄송합니다. 오류가 발생했어요. 다시 시도해주세요.".to_string(),
        }
    }
}

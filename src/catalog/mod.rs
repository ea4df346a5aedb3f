//! Catalog module: the fixed collection of recommendable webtoons
//!
//! The catalog is read once at process start from a JSON array and is never
//! mutated afterwards. Missing optional fields are defaulted; nothing else is
//! validated.

pub mod types;

pub use types::{CatalogEntry, MAX_GENRES};

use crate::error::{Error, Result};
use std::path::Path;

/// Immutable, in-memory catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Wrap an already-parsed list of entries
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parse a catalog from a JSON array
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)
            .map_err(|e| Error::Catalog(format!("Failed to parse catalog: {}", e)))?;
        Ok(Self::new(entries))
    }

    /// Load a catalog JSON file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::Catalog(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            entries = catalog.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// All entries in source order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

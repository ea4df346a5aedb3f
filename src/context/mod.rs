//! Catalog context builder
//!
//! Projects every [`CatalogEntry`] into a token-reduced [`ContextEntry`] that
//! grounds the model. The projection is pure, so it is built once per process
//! and shared behind an `Arc`.

use crate::catalog::{Catalog, CatalogEntry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Character budget for projected descriptions
pub const DESCRIPTION_BUDGET: usize = 150;

/// Marker appended to every projected description
pub const ELLIPSIS: &str = "...";

/// Token-reduced projection of a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub title: String,
    pub author: String,
    pub link: String,
    pub thumbnail: String,
    pub genres: Vec<String>,
    pub description: String,
}

impl ContextEntry {
    /// Project a single entry.
    ///
    /// Genres keep the first three tags without line breaks. The description
    /// keeps its first 150 characters and always gets the ellipsis, whether
    /// or not anything was cut.
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            title: entry.title.clone(),
            author: entry.author.clone(),
            link: entry.link.clone(),
            thumbnail: entry.thumbnail.clone(),
            genres: entry.clean_genres().map(str::to_string).collect(),
            description: truncate_description(&entry.description),
        }
    }
}

/// Keep the first [`DESCRIPTION_BUDGET`] characters and append [`ELLIPSIS`]
fn truncate_description(description: &str) -> String {
    let mut out: String = description.chars().take(DESCRIPTION_BUDGET).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Project a sequence of entries, preserving order and cardinality
pub fn build_context(entries: &[CatalogEntry]) -> Vec<ContextEntry> {
    entries.iter().map(ContextEntry::from_entry).collect()
}

/// The cached projection of the whole catalog
#[derive(Debug, Clone)]
pub struct CatalogContext {
    entries: Arc<[ContextEntry]>,
}

impl CatalogContext {
    /// Build the projection for a catalog
    pub fn build(catalog: &Catalog) -> Self {
        let entries: Arc<[ContextEntry]> = build_context(catalog.entries()).into();
        tracing::debug!(entries = entries.len(), "Built catalog context");
        Self { entries }
    }

    /// Projected entries in catalog order
    pub fn entries(&self) -> &[ContextEntry] {
        &self.entries
    }

    /// Number of projected entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the projection is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

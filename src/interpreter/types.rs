//! Content block wire types
//!
//! ```text
//! { "type": "text", "content": string }
//! { "type": "webtoon", "title": string, "author": string, "link": string,
//!   "thumbnail": string, "reason": string }
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A recommendation card emitted by the model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub author: String,
    pub link: String,
    pub thumbnail: String,
    /// One or two sentences explaining the match
    pub reason: String,
}

/// One unit of structured assistant output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Free-form prose, may contain lightweight markup
    #[serde(rename = "text")]
    Text { content: String },

    /// A catalog recommendation card
    #[serde(rename = "webtoon")]
    Recommendation(Recommendation),
}

impl ContentBlock {
    /// Convenience constructor for a text block
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }
}

/// Outcome of interpreting one raw model reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// The reply was a JSON array; recognized blocks in order
    Blocks(Vec<ContentBlock>),

    /// The reply was not a block array; render it verbatim as prose
    Raw(String),
}

impl Interpretation {
    /// Whether the structured parse failed and the prose fallback applies
    pub fn is_degraded(&self) -> bool {
        matches!(self, Interpretation::Raw(_))
    }

    /// Blocks to render; the fallback becomes a single text block
    pub fn blocks(&self) -> Cow<'_, [ContentBlock]> {
        match self {
            Interpretation::Blocks(blocks) => Cow::Borrowed(blocks.as_slice()),
            Interpretation::Raw(text) => Cow::Owned(vec![ContentBlock::text(text.clone())]),
        }
    }

    /// Recommendation cards, in order
    pub fn recommendations(&self) -> impl Iterator<Item = &Recommendation> {
        let blocks: &[ContentBlock] = match self {
            Interpretation::Blocks(blocks) => blocks,
            Interpretation::Raw(_) => &[],
        };
        blocks.iter().filter_map(|b| match b {
            ContentBlock::Recommendation(rec) => Some(rec),
            ContentBlock::Text { .. } => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let text = serde_json::to_value(ContentBlock::text("hi")).unwrap();
        assert_eq!(text, serde_json::json!({"type": "text", "content": "hi"}));

        let card = serde_json::to_value(ContentBlock::Recommendation(Recommendation {
            title: "T".to_string(),
            author: "A".to_string(),
            link: "L".to_string(),
            thumbnail: "I".to_string(),
            reason: "R".to_string(),
        }))
        .unwrap();
        assert_eq!(card["type"], "webtoon");
        assert_eq!(card["title"], "T");
        assert_eq!(card["reason"], "R");
    }

    #[test]
    fn test_raw_blocks_is_single_text() {
        let interp = Interpretation::Raw("plain".to_string());
        assert!(interp.is_degraded());
        assert_eq!(interp.blocks().as_ref(), &[ContentBlock::text("plain")]);
        assert_eq!(interp.recommendations().count(), 0);
    }

    #[test]
    fn test_recommendations_filter() {
        let interp = Interpretation::Blocks(vec![
            ContentBlock::text("intro"),
            ContentBlock::Recommendation(Recommendation {
                title: "One".to_string(),
                ..Default::default()
            }),
        ]);
        assert!(!interp.is_degraded());
        let titles: Vec<_> = interp.recommendations().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["One"]);
    }
}

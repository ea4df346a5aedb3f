//! Response interpreter
//!
//! Turns the model's raw reply into typed content blocks. The output contract
//! is best-effort: anything that is not a JSON array falls back to a single
//! prose block carrying the full original text. Elements with an unknown
//! `type` are dropped so newer block kinds do not break older clients. An
//! array with nothing recognized is an empty block list, never raw JSON.

pub mod types;

pub use types::{ContentBlock, Interpretation, Recommendation};

use serde_json::{Map, Value};

/// Interpret a raw model reply. Never fails.
pub fn interpret(raw: &str) -> Interpretation {
    match parse_blocks(strip_code_fence(raw)) {
        Some(blocks) => Interpretation::Blocks(blocks),
        None => {
            tracing::debug!(chars = raw.chars().count(), "Reply is not a block array, rendering as prose");
            Interpretation::Raw(raw.to_string())
        }
    }
}

/// Parse a JSON array of blocks; `None` when the text is not an array
fn parse_blocks(text: &str) -> Option<Vec<ContentBlock>> {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(text) else {
        return None;
    };
    Some(items.iter().filter_map(block_from_value).collect())
}

fn block_from_value(value: &Value) -> Option<ContentBlock> {
    let obj = value.as_object()?;
    match obj.get("type").and_then(Value::as_str)? {
        "text" => Some(ContentBlock::Text {
            content: string_field(obj, "content"),
        }),
        "webtoon" => Some(ContentBlock::Recommendation(Recommendation {
            title: string_field(obj, "title"),
            author: string_field(obj, "author"),
            link: string_field(obj, "link"),
            thumbnail: string_field(obj, "thumbnail"),
            reason: string_field(obj, "reason"),
        })),
        other => {
            tracing::debug!(block_type = other, "Dropping unrecognized content block");
            None
        }
    }
}

/// Missing or non-string fields render as empty
fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Remove one surrounding markdown code fence (```json ... ```), if present
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return trimmed;
    };
    // the opening line may carry a language tag
    match inner.find('\n') {
        Some(pos) => inner[pos + 1..].trim(),
        None => inner.trim(),
    }
}

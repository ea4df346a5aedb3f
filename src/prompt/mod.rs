//! System prompt assembly
//!
//! The instruction has three fixed parts, in order: the role statement, the
//! JSON output contract, and the serialized catalog projection. The catalog
//! never changes at runtime, so the prompt is assembled once and shared.

use crate::context::{CatalogContext, ContextEntry};
use crate::error::Result;
use std::sync::Arc;

const ROLE: &str = "\
당신은 사용자의 취향에 맞는 웹툰을 추천해주는 친절한 AI 어시스턴트입니다.
아래 제공된 웹툰 데이터베이스 목록 내에서만 추천해야 합니다.
사용자가 장르, 분위기, 스토리 등을 말하면 그에 가장 잘 맞는 웹툰 1~3개를 추천해주고 추천 이유를 간략하게 설명해주세요.";

const OUTPUT_CONTRACT: &str = r#"답변은 친근하고 자연스러운 한국어로 작성하되, **반드시 아래의 정확한 JSON 형식**으로만 응답해야 합니다. (다른 텍스트나 Markdown 블록 기호는 포함하지 마세요)

[
  {
    "type": "text",
    "content": "추천 인사말 및 설명 내용..."
  },
  {
    "type": "webtoon",
    "title": "웹툰 제목",
    "author": "작가 이름",
    "link": "https://...",
    "thumbnail": "https://...",
    "reason": "이 웹툰을 추천하는 이유 (1~2문장)"
  }
]"#;

const CATALOG_HEADER: &str = "[웹툰 데이터베이스]:";

/// The assembled system instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPrompt {
    text: Arc<str>,
}

impl SystemPrompt {
    /// Assemble the instruction for a projected catalog.
    ///
    /// An empty projection still yields a complete instruction with `[]` as
    /// the database, so the model can decline politely.
    pub fn assemble(entries: &[ContextEntry]) -> Result<Self> {
        let catalog_json = serde_json::to_string(entries)?;
        let text = format!(
            "{}\n{}\n\n{}\n{}\n",
            ROLE, OUTPUT_CONTRACT, CATALOG_HEADER, catalog_json
        );
        tracing::debug!(
            chars = text.chars().count(),
            entries = entries.len(),
            "Assembled system prompt"
        );
        Ok(Self { text: text.into() })
    }

    /// Assemble from the cached catalog context
    pub fn from_context(context: &CatalogContext) -> Result<Self> {
        Self::assemble(context.entries())
    }

    /// The instruction text
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for SystemPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> ContextEntry {
        ContextEntry {
            title: "유미의 세포들".to_string(),
            author: "이동건".to_string(),
            link: "https://comic.example.com/yumi".to_string(),
            thumbnail: "https://img.example.com/yumi.jpg".to_string(),
            genres: vec!["#로맨스".to_string(), "#일상".to_string()],
            description: "유미의 머릿속 세포들 이야기...".to_string(),
        }
    }

    #[test]
    fn test_sections_in_order() {
        let prompt = SystemPrompt::assemble(&[sample_entry()]).unwrap();
        let text = prompt.as_str();

        let role = text.find("목록 내에서만 추천").unwrap();
        let contract = text.find("\"type\": \"webtoon\"").unwrap();
        let header = text.find(CATALOG_HEADER).unwrap();
        let catalog = text.find("유미의 세포들").unwrap();

        assert!(role < contract);
        assert!(contract < header);
        assert!(header < catalog);
    }

    #[test]
    fn test_contract_forbids_wrappers() {
        let prompt = SystemPrompt::assemble(&[]).unwrap();
        assert!(prompt.as_str().contains("JSON 형식"));
        assert!(prompt.as_str().contains("Markdown 블록 기호는 포함하지 마세요"));
        assert!(prompt.as_str().contains("\"type\": \"text\""));
    }

    #[test]
    fn test_empty_catalog_still_valid() {
        let prompt = SystemPrompt::assemble(&[]).unwrap();
        assert!(!prompt.as_str().is_empty());
        assert!(prompt.as_str().trim_end().ends_with("[]"));
    }

    #[test]
    fn test_catalog_is_valid_json() {
        let prompt = SystemPrompt::assemble(&[sample_entry(), sample_entry()]).unwrap();
        let text = prompt.as_str();
        let start = text.find(CATALOG_HEADER).unwrap() + CATALOG_HEADER.len();
        let parsed: Vec<ContextEntry> = serde_json::from_str(text[start..].trim()).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], sample_entry());
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let a = SystemPrompt::assemble(&[sample_entry()]).unwrap();
        let b = SystemPrompt::assemble(&[sample_entry()]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), a.as_str());
    }
}

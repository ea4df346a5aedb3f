//! Plain-text rendering of conversation messages for the terminal client

use super::{ConversationMessage, Role};
use crate::interpreter::{ContentBlock, Recommendation};
use std::fmt::Write;

/// Render one message as terminal text
pub fn render_message(message: &ConversationMessage) -> String {
    match message.role {
        Role::User => format!("> {}\n", message.content),
        Role::Assistant => {
            let mut out = String::new();
            if let Some(interp) = message.interpretation() {
                if interp.is_degraded() {
                    tracing::debug!("Rendering unstructured reply as prose");
                }
                for block in interp.blocks().iter() {
                    render_block(&mut out, block);
                }
            }
            out
        }
    }
}

fn render_block(out: &mut String, block: &ContentBlock) {
    match block {
        ContentBlock::Text { content } => {
            let _ = writeln!(out, "{}", content.trim_end());
        }
        ContentBlock::Recommendation(rec) => render_card(out, rec),
    }
}

fn render_card(out: &mut String, rec: &Recommendation) {
    let _ = writeln!(out, "┌ {} / {}", rec.title, rec.author);
    if !rec.reason.is_empty() {
        let _ = writeln!(out, "│ {}", rec.reason);
    }
    if !rec.link.is_empty() {
        let _ = writeln!(out, "└ {}", rec.link);
    } else {
        let _ = writeln!(out, "└");
    }
}

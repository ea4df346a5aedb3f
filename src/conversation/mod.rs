//! Conversation state machine
//!
//! Holds the message history of one chat session and enforces the
//! single-flight rule: while a request is outstanding, new input is
//! ignored. Every submitted utterance is resolved exactly once, either
//! by the assistant reply or by the configured apology.
//!
//! ```text
//!          submit (non-empty)
//!   Idle ─────────────────────▶ AwaitingReply
//!    ▲                              │
//!    └──── resolve_success ─────────┤
//!    └──── resolve_failure ─────────┘
//! ```

pub mod render;
pub mod transport;

pub use transport::{ChatTransport, HttpChatClient};

use crate::config::ChatConfig;
use crate::error::Error;
use crate::interpreter::{interpret, Interpretation};
use std::sync::OnceLock;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// Conversation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    /// Ready for input
    Idle,
    /// A request is in flight; input is disabled
    AwaitingReply,
}

/// One entry of the conversation history
#[derive(Debug)]
pub struct ConversationMessage {
    pub role: Role,
    /// Raw text: the utterance for users, the model reply for the assistant
    pub content: String,
    interpretation: OnceLock<Interpretation>,
}

impl ConversationMessage {
    fn new(role: Role, content: String) -> Self {
        Self {
            role,
            content,
            interpretation: OnceLock::new(),
        }
    }

    /// Interpreted assistant content, computed on first access.
    ///
    /// Returns `None` for user messages.
    pub fn interpretation(&self) -> Option<&Interpretation> {
        match self.role {
            Role::User => None,
            Role::Assistant => Some(self.interpretation.get_or_init(|| interpret(&self.content))),
        }
    }
}

/// A single chat session
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<ConversationMessage>,
    input: String,
    state: ConversationState,
    apology: String,
}

impl Conversation {
    /// Start a conversation with the configured greeting
    pub fn new(config: &ChatConfig) -> Self {
        Self {
            messages: vec![ConversationMessage::new(
                Role::Assistant,
                config.greeting.clone(),
            )],
            input: String::new(),
            state: ConversationState::Idle,
            apology: config.apology.clone(),
        }
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the pending input. Ignored while awaiting a reply.
    pub fn set_input(&mut self, text: impl Into<String>) {
        if self.state == ConversationState::Idle {
            self.input = text.into();
        }
    }

    /// Whether [`submit`](Self::submit) would start a request
    pub fn can_submit(&self) -> bool {
        self.state == ConversationState::Idle && !self.input.trim().is_empty()
    }

    /// Commit the pending input as a user message.
    ///
    /// Returns the trimmed utterance to send, or `None` when the input is
    /// blank or a request is already in flight.
    pub fn submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }

        let utterance = self.input.trim().to_string();
        self.input.clear();
        self.messages
            .push(ConversationMessage::new(Role::User, utterance.clone()));
        self.state = ConversationState::AwaitingReply;
        Some(utterance)
    }

    /// Record the assistant reply for the outstanding request
    pub fn resolve_success(&mut self, reply: String) {
        if self.state != ConversationState::AwaitingReply {
            tracing::warn!("Reply received with no request in flight, dropping");
            return;
        }
        self.messages
            .push(ConversationMessage::new(Role::Assistant, reply));
        self.state = ConversationState::Idle;
    }

    /// Record a failed request as a single apology message
    pub fn resolve_failure(&mut self, error: &Error) {
        if self.state != ConversationState::AwaitingReply {
            tracing::warn!(error = %error, "Failure reported with no request in flight, dropping");
            return;
        }
        tracing::error!(error = %error, "Chat request failed");
        self.messages
            .push(ConversationMessage::new(Role::Assistant, self.apology.clone()));
        self.state = ConversationState::Idle;
    }

    /// Submit the pending input through `transport` and resolve the outcome.
    ///
    /// Returns `false` without contacting the transport when nothing could
    /// be submitted.
    pub async fn send<T: ChatTransport + ?Sized>(&mut self, transport: &T) -> bool {
        let Some(utterance) = self.submit() else {
            return false;
        };

        match transport.send(&utterance).await {
            Ok(reply) => self.resolve_success(reply),
            Err(e) => self.resolve_failure(&e),
        }
        true
    }
}

//! Chat API wire types
//!
//! Shared by the HTTP handlers and the HTTP chat client.

use serde::{Deserialize, Serialize};

/// Error text for a missing or empty message
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// Error text for any upstream failure; details stay in the server log
pub const GENERATION_FAILED: &str = "An error occurred while generating a response.";

/// `POST /api/chat` request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// Successful chat response: the model's raw reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Failed chat response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatError {
    pub error: String,
}

impl ChatError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_absent_message() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.message.is_none());

        let req: ChatRequest = serde_json::from_str(r#"{"message": null}"#).unwrap();
        assert!(req.message.is_none());
    }

    #[test]
    fn test_chat_request_serialization() {
        let json = serde_json::to_string(&ChatRequest::new("추천해줘")).unwrap();
        assert_eq!(json, r#"{"message":"추천해줘"}"#);
    }

    #[test]
    fn test_reply_and_error_shapes() {
        let reply = serde_json::to_value(ChatReply {
            reply: "[]".to_string(),
        })
        .unwrap();
        assert_eq!(reply, serde_json::json!({"reply": "[]"}));

        let err = serde_json::to_value(ChatError::new(MESSAGE_REQUIRED)).unwrap();
        assert_eq!(err, serde_json::json!({"error": "Message is required"}));
    }
}

//! Chat data model shared by the HTTP surface and the backend clients.

use serde::{Deserialize, Serialize};

/// Default sampling temperature applied when the caller omits one.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Default completion token budget applied when the caller omits one.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// One conversation turn, forwarded verbatim.
///
/// The role stays a plain string on purpose: messages are a pass-through
/// contract, and a role this crate has never heard of must still reach the
/// backend unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// An inbound chat request as accepted on `POST /api/chat`.
///
/// Optional fields fall back to the gateway defaults during deserialization,
/// so handlers always see a fully-populated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Model key or canonical id; resolution falls back to the default entry.
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub stream: bool,
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

/// Non-streaming reply returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub content: String,
    /// Model id echoed by the backend, or the resolved canonical id when the
    /// backend omits one.
    pub model: String,
}

/// One unit of streamed output.
///
/// Produced incrementally by the relay as backend frames arrive; the
/// transport layer encodes each event as a caller-facing frame the moment it
/// is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A piece of assistant text.
    Content(String),
    /// Normal end of stream (the backend sent its `[DONE]` sentinel).
    Done,
    /// The backend failed before completing the stream; terminal.
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_applied() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"messages":[{"role":"user","content":"hi"}]}"#).unwrap();
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.model, None);
        assert!((request.temperature - DEFAULT_TEMPERATURE).abs() < f64::EPSILON);
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
        assert!(!request.stream);
    }

    #[test]
    fn request_explicit_fields_win() {
        let request: ChatRequest = serde_json::from_str(
            r#"{"messages":[],"model":"m1","temperature":0.2,"max_tokens":16,"stream":true}"#,
        )
        .unwrap();
        assert_eq!(request.model.as_deref(), Some("m1"));
        assert!((request.temperature - 0.2).abs() < f64::EPSILON);
        assert_eq!(request.max_tokens, 16);
        assert!(request.stream);
    }

    #[test]
    fn empty_body_still_deserializes() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(request.messages.is_empty());
        assert!(!request.stream);
    }

    #[test]
    fn unknown_role_passes_through() {
        let message: ChatMessage =
            serde_json::from_str(r#"{"role":"critic","content":"x"}"#).unwrap();
        assert_eq!(message.role, "critic");
    }

    #[test]
    fn reply_serializes_content_and_model() {
        let reply = ChatReply {
            content: "hi".into(),
            model: "m1".into(),
        };
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value, serde_json::json!({"content": "hi", "model": "m1"}));
    }
}

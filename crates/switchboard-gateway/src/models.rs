//! Wire types: the OpenAI-style backend protocol and caller-facing shapes.
//!
//! Backend responses are deserialized into the narrow subset of fields the
//! gateway actually reads; everything else in the backend's body is ignored.

use serde::{Deserialize, Serialize};
use switchboard_core::{ChatMessage, ChatRequest};

// ============================================================================
// Outbound: gateway to backend
// ============================================================================

/// Payload POSTed to `{base_url}/chat/completions`.
///
/// `model` is always the resolved canonical id; the caller-supplied string
/// never reaches a backend.
#[derive(Debug, Serialize)]
pub struct UpstreamChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f64,
    pub max_tokens: u32,
    pub stream: bool,
}

impl<'a> UpstreamChatRequest<'a> {
    /// Build the backend payload for a resolved request. The `stream` flag
    /// is chosen by the handler path, not copied from the caller.
    pub fn from_chat(model_id: &'a str, request: &'a ChatRequest, stream: bool) -> Self {
        Self {
            model: model_id,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream,
        }
    }
}

// ============================================================================
// Inbound: backend to gateway
// ============================================================================

/// Non-streaming completion response; only `choices[0].message.content` and
/// the echoed `model` are consumed.
#[derive(Debug, Deserialize)]
pub struct UpstreamChatResponse {
    #[serde(default)]
    pub choices: Vec<UpstreamChoice>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamChoice {
    pub message: UpstreamMessage,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Body of `GET {base_url}/models`.
#[derive(Debug, Deserialize)]
pub struct UpstreamModelsResponse {
    #[serde(default)]
    pub data: Vec<UpstreamModelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamModelEntry {
    pub id: String,
}

// ============================================================================
// Caller-facing
// ============================================================================

/// Body of `GET /api/models`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

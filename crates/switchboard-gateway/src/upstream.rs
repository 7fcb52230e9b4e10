//! Backend HTTP calls: completions, stream opening, and model discovery.
//!
//! One attempt per call, no retries. Only discovery carries an explicit
//! timeout; chat calls run as long as the backend keeps the connection.

use std::time::Duration;

use reqwest::Client;
use switchboard_core::{BackendDescriptor, BackendError, BackendRegistry, ChatReply, ChatRequest};

use crate::models::{UpstreamChatRequest, UpstreamChatResponse, UpstreamModelsResponse};

/// Per-backend budget for `GET /models` during discovery.
const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the shared HTTP client used for all backend traffic.
pub fn build_client() -> reqwest::Result<Client> {
    Client::builder().pool_max_idle_per_host(10).build()
}

fn apply_headers(
    mut builder: reqwest::RequestBuilder,
    backend: &BackendDescriptor,
) -> reqwest::RequestBuilder {
    for (name, value) in &backend.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Issue a non-streaming completion and normalize the backend's reply.
///
/// `model_id` must be the resolved canonical id. The reply's `model` is the
/// backend's echo, falling back to the canonical id when absent.
pub async fn complete(
    client: &Client,
    backend: &BackendDescriptor,
    model_id: &str,
    request: &ChatRequest,
) -> Result<ChatReply, BackendError> {
    let payload = UpstreamChatRequest::from_chat(model_id, request, false);
    let response = apply_headers(
        client.post(format!("{}/chat/completions", backend.base_url)),
        backend,
    )
    .json(&payload)
    .send()
    .await
    .map_err(|error| BackendError::Unreachable(error.to_string()))?;

    let status = response.status().as_u16();
    if status != 200 {
        return Err(BackendError::Http(status));
    }

    let body: UpstreamChatResponse = response
        .json()
        .await
        .map_err(|error| BackendError::Malformed(error.to_string()))?;
    let content = body
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| {
            BackendError::Malformed("response carries no message content".to_string())
        })?;

    Ok(ChatReply {
        content,
        model: body.model.unwrap_or_else(|| model_id.to_string()),
    })
}

/// Open a streaming completion and hand the raw response to the relay.
///
/// A non-200 answer is a backend failure here, the same as not connecting
/// at all; the relay turns either into an in-band error frame.
pub async fn open_stream(
    client: &Client,
    backend: &BackendDescriptor,
    model_id: &str,
    request: &ChatRequest,
) -> Result<reqwest::Response, BackendError> {
    let payload = UpstreamChatRequest::from_chat(model_id, request, true);
    let response = apply_headers(
        client.post(format!("{}/chat/completions", backend.base_url)),
        backend,
    )
    .json(&payload)
    .send()
    .await
    .map_err(|error| BackendError::Unreachable(error.to_string()))?;

    let status = response.status().as_u16();
    if status != 200 {
        return Err(BackendError::Http(status));
    }
    Ok(response)
}

/// Aggregate the live model lists of every configured backend.
///
/// Never fails outward: a backend that times out, refuses the connection,
/// answers non-200, or returns an unexpected body simply contributes
/// nothing. An entirely empty result degrades to the configured key list,
/// so the output is never empty.
pub async fn discover_models(client: &Client, registry: &BackendRegistry) -> Vec<String> {
    let mut discovered = Vec::new();
    for entry in registry.entries() {
        match fetch_backend_models(client, &entry.descriptor).await {
            Ok(ids) => discovered.extend(ids),
            Err(reason) => {
                tracing::debug!(backend = %entry.key, %reason, "discovery skipped backend");
            }
        }
    }

    if discovered.is_empty() {
        registry.model_keys()
    } else {
        discovered
    }
}

async fn fetch_backend_models(
    client: &Client,
    backend: &BackendDescriptor,
) -> Result<Vec<String>, BackendError> {
    let response = apply_headers(client.get(format!("{}/models", backend.base_url)), backend)
        .timeout(DISCOVERY_TIMEOUT)
        .send()
        .await
        .map_err(|error| BackendError::Unreachable(error.to_string()))?;

    let status = response.status().as_u16();
    if status != 200 {
        return Err(BackendError::Http(status));
    }

    let body: UpstreamModelsResponse = response
        .json()
        .await
        .map_err(|error| BackendError::Malformed(error.to_string()))?;
    Ok(body.data.into_iter().map(|model| model.id).collect())
}

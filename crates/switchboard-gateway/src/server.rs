//! HTTP surface: router construction and the listener lifecycle.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderName, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use switchboard_core::{BackendRegistry, ChatRequest, StreamEvent};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::models::ModelsResponse;
use crate::{relay, upstream};

/// Shared per-request context: one pooled HTTP client and the routing table.
#[derive(Clone)]
pub struct GatewayState {
    pub client: reqwest::Client,
    pub registry: Arc<BackendRegistry>,
}

/// Build the gateway router.
///
/// When `static_dir` is set, requests that match no API route fall through
/// to files served from that directory. CORS is wide open so a browser UI
/// served from anywhere can talk to the gateway directly.
pub fn router(state: GatewayState, static_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/api/models", get(list_models))
        .route("/api/chat", post(chat))
        .with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http())
}

/// Run the gateway on an already-bound listener until `cancel` fires.
pub async fn serve(
    listener: TcpListener,
    registry: Arc<BackendRegistry>,
    static_dir: Option<PathBuf>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let client = upstream::build_client()?;
    let state = GatewayState { client, registry };
    let app = router(state, static_dir.as_deref());

    let addr = listener.local_addr()?;
    tracing::info!(%addr, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;

    tracing::info!("gateway stopped");
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_models(State(state): State<GatewayState>) -> Json<ModelsResponse> {
    let models = upstream::discover_models(&state.client, &state.registry).await;
    Json(ModelsResponse { models })
}

async fn chat(State(state): State<GatewayState>, Json(request): Json<ChatRequest>) -> Response {
    let resolution = state.registry.resolve(request.model.as_deref());
    tracing::debug!(
        backend = resolution.key,
        model = resolution.model_id,
        stream = request.stream,
        "chat request"
    );

    if request.stream {
        // Streaming responses are always 200: failures surface as in-band
        // error frames so a caller mid-read sees a well-formed stream end.
        let body = match upstream::open_stream(
            &state.client,
            resolution.backend,
            resolution.model_id,
            &request,
        )
        .await
        {
            Ok(response) => Body::from_stream(relay::relay_frames(
                response.bytes_stream(),
                resolution.model_id.to_string(),
            )),
            Err(error) => {
                tracing::warn!(backend = resolution.key, %error, "stream failed to start");
                Body::from(relay::encode_frame(&StreamEvent::Error(error.to_string())))
            }
        };
        stream_response(body)
    } else {
        match upstream::complete(
            &state.client,
            resolution.backend,
            resolution.model_id,
            &request,
        )
        .await
        {
            Ok(reply) => Json(reply).into_response(),
            Err(error) => {
                tracing::warn!(backend = resolution.key, %error, "chat completion failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_body(&error.to_string()),
                )
                    .into_response()
            }
        }
    }
}

fn stream_response(body: Body) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain"),
            (header::CACHE_CONTROL, "no-cache"),
            (HeaderName::from_static("x-accel-buffering"), "no"),
        ],
        body,
    )
        .into_response()
}

fn error_body(message: &str) -> Json<serde_json::Value> {
    Json(json!({ "error": message }))
}

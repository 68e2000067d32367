//! Web chat endpoint exposing the relay to the frontend.

use std::net::SocketAddr;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::relay::Relay;

const HEALTH_TEXT: &str = "SmartChatTLDR bot is running.";
const MISSING_MESSAGE: &str = "Message is required.";
const UPSTREAM_ERROR: &str = "Upstream model error.";

pub fn chat_router(relay: Relay) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/chat", post(chat))
        .layer(CorsLayer::permissive())
        .with_state(relay)
}

async fn health() -> &'static str {
    HEALTH_TEXT
}

/// `POST /chat` with `{"message": "..."}`. The message must be a
/// non-empty string; provider failure surfaces as 502 so web clients can
/// tell it apart from a model answer.
async fn chat(
    State(relay): State<Relay>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty());

    let Some(message) = message else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": MISSING_MESSAGE })),
        );
    };

    match relay.try_complete(message).await {
        Ok(reply) => (StatusCode::OK, Json(json!({ "reply": reply }))),
        Err(e) => {
            warn!("Chat endpoint provider error: {e}");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": UPSTREAM_ERROR })),
            )
        }
    }
}

pub async fn serve(relay: Relay, port: u16) {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            warn!("Failed to bind HTTP listener on {addr}: {e}");
            return;
        }
    };

    info!("🚀 Web endpoint listening on http://{addr}");

    if let Err(e) = axum::serve(listener, chat_router(relay)).await {
        warn!("HTTP server error: {e}");
    }
}

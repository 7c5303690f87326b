//! Request handlers for the chat endpoint

use super::ServerState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use medibot_domain::preview;
use serde::Deserialize;
use serde_json::json;
use std::any::Any;
use tracing::{debug, error, info};

/// Body of `POST /chat`
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

pub(super) async fn handle_chat(
    State(state): State<ServerState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Rejected chat request: {}", rejection.body_text());
            return bad_request("invalid JSON body");
        }
    };

    let Some(message) = request
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
    else {
        return bad_request("message required");
    };

    info!("Received message: {}", preview(message, 80));
    let envelope = state.router.handle(message).await;
    info!("Replying with {} envelope", envelope.kind());

    (StatusCode::OK, Json(envelope)).into_response()
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

/// Response for a panic caught by `CatchPanicLayer`
pub(super) fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "An internal server error occurred" })),
    )
        .into_response()
}

//! HTTP handlers for the chat API
//!
//! Provides 2 REST endpoints:
//! - POST   /api/chat          one recommendation round-trip
//! - GET    /api/v1/webtoons   the full catalog, for card grids

use crate::catalog::Catalog;
use crate::service::types::*;
use crate::service::RecommendationService;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// Shared state for chat handlers
#[derive(Clone)]
pub struct ServiceState {
    pub service: Arc<RecommendationService>,
    pub catalog: Arc<Catalog>,
}

/// Create the chat router
pub fn chat_router(state: ServiceState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/v1/webtoons", get(list_webtoons))
        .with_state(state)
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/chat
///
/// Any body that does not extract as a `ChatRequest` is a 400 like an empty
/// message.
async fn chat(
    State(state): State<ServiceState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let message = match payload {
        Ok(Json(request)) => request.message.unwrap_or_default(),
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Rejected chat request body");
            return bad_request();
        }
    };

    match state.service.recommend(&message).await {
        Ok(reply) => (StatusCode::OK, Json(ChatReply { reply })).into_response(),
        Err(e) if e.is_client_error() => bad_request(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ChatError::new(GENERATION_FAILED)),
        )
            .into_response(),
    }
}

fn bad_request() -> Response {
    (StatusCode::BAD_REQUEST, Json(ChatError::new(MESSAGE_REQUIRED))).into_response()
}

/// GET /api/v1/webtoons
async fn list_webtoons(State(state): State<ServiceState>) -> impl IntoResponse {
    Json(state.catalog.entries().to_vec())
}

//! Unified API router for Webtoon Finder
//!
//! Merges the chat router with the health probe into a single axum `Router`
//! with CORS and request tracing.
//!
//! ## Endpoint Map
//!
//! | Path                | Module  | Description                      |
//! |---------------------|---------|----------------------------------|
//! | `/health`           | api     | Load balancer health probe       |
//! | `/api/chat`         | service | Recommendation round-trip        |
//! | `/api/v1/webtoons`  | service | Catalog listing                  |

use crate::service::{chat_router, ServiceState};
use axum::{
    extract::State,
    http::{header, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete Webtoon Finder HTTP application
pub fn build_app(state: ServiceState, cors_origins: &[String]) -> Router {
    let cors = build_cors(cors_origins);

    let root = Router::new()
        .route("/health", get(health_check))
        .with_state(state.clone());

    Router::new()
        .merge(root)
        .merge(chat_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

// =============================================================================
// Root handlers
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    version: String,
    catalog_size: usize,
}

async fn health_check(State(state): State<ServiceState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_size: state.catalog.len(),
    })
}

// =============================================================================
// CORS
// =============================================================================

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let parsed: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::RecommendationService;
    use crate::test_helpers::{sample_catalog, ScriptedLlm};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn make_state() -> ServiceState {
        let catalog = Arc::new(sample_catalog());
        let service = RecommendationService::from_catalog(
            &catalog,
            Arc::new(ScriptedLlm::replying("[]")),
            0.7,
        )
        .unwrap();
        ServiceState {
            service: Arc::new(service),
            catalog,
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = build_app(make_state(), &[]);
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["catalogSize"], 2);
    }

    #[tokio::test]
    async fn test_chat_route_mounted() {
        let app = build_app(make_state(), &["http://localhost:3000".to_string()]);
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"message":"hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn test_build_cors_with_origins() {
        let _cors = build_cors(&[
            "http://localhost:3000".to_string(),
            "https://webtoon.example.com".to_string(),
        ]);
    }
}

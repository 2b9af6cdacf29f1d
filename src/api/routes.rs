//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{Router, middleware};

use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID middleware (runs first) - generates/propagates request IDs
/// 2. Logging middleware (runs second) - logs requests with request IDs
///
/// # Routes
/// - `/triggers/groups/{group_id}/pings/{ping_id}` - Ping-creation trigger
/// - `/health`, `/health/ready`, `/health/live` - Health probes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/triggers", handlers::triggers::trigger_routes())
        .merge(handlers::health::health_routes())
        // Middleware is applied in reverse order - last added runs first
        // So logging runs after request_id has set the ID
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppResult;
    use crate::models::Group;
    use crate::services::notifier::{
        GroupStore, PingMessage, PingNotifier, PushReport, PushSender, TokenStore,
    };
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct EmptyGroupStore;

    #[async_trait]
    impl GroupStore for EmptyGroupStore {
        async fn get_group(&self, _group_id: &str) -> AppResult<Option<Group>> {
            Ok(None)
        }
    }

    struct EmptyTokenStore;

    #[async_trait]
    impl TokenStore for EmptyTokenStore {
        async fn fetch_tokens(&self, _user_ids: &[String]) -> AppResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    struct NoopSender;

    #[async_trait]
    impl PushSender for NoopSender {
        async fn send_multicast(
            &self,
            _tokens: &[String],
            _message: &PingMessage,
        ) -> AppResult<PushReport> {
            Ok(PushReport::default())
        }

        fn name(&self) -> &'static str {
            "noop"
        }
    }

    fn test_router() -> Router {
        let notifier = PingNotifier::new(
            Arc::new(EmptyGroupStore),
            Arc::new(EmptyTokenStore),
            Arc::new(NoopSender),
        );
        create_router(AppState::with_notifier(notifier))
    }

    #[tokio::test]
    async fn test_health_route_registered() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_response_carries_request_id_header() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_incoming_request_id_is_echoed() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .header("x-request-id", "corr-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers().get("x-request-id").unwrap(),
            "corr-42"
        );
    }

    #[tokio::test]
    async fn test_unknown_route_returns_not_found() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

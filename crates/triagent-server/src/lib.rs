// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server for the Triagent support router, built on axum.
//!
//! Exposes the channel webhooks, channel-management endpoints, and a health
//! probe. State is one explicit composition object passed by reference; no
//! module-level singletons.

pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

use triagent_channels::ChannelManager;
use triagent_config::ServerConfig;
use triagent_core::TriagentError;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The channel registry and dispatcher (owns the orchestrator).
    pub manager: Arc<ChannelManager>,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(manager: Arc<ChannelManager>) -> Self {
        Self {
            manager,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(handlers::get_health))
        .route("/api/v1/webhooks/telegram", post(handlers::telegram_webhook))
        .route("/api/v1/webhooks/email", post(handlers::email_webhook))
        .route(
            "/api/v1/webhooks/channels/status",
            get(handlers::channels_status),
        )
        .route(
            "/api/v1/webhooks/channels/test",
            post(handlers::test_channels),
        )
        .route(
            "/api/v1/webhooks/channels/{channel}/send",
            post(handlers::send_test_message),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds and serves the router until `shutdown` is cancelled.
///
/// Bind failures are the one startup error class that is allowed to be
/// fatal; everything beyond the bind degrades per-request instead.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), TriagentError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TriagentError::Channel {
            message: format!("failed to bind server to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("server listening on {addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| TriagentError::Channel {
            message: format!("server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use triagent_core::types::ChannelKind;
    use triagent_orchestrator::Orchestrator;
    use triagent_test_utils::{MockChannel, MockGateway};

    fn test_state(channels: Vec<MockChannel>) -> AppState {
        let orchestrator = Orchestrator::new(Arc::new(MockGateway::new()));
        let mut manager = ChannelManager::new(orchestrator);
        for channel in channels {
            manager.register(Arc::new(channel));
        }
        AppState::new(Arc::new(manager))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let app = router(test_state(vec![]));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn telegram_webhook_acks_even_for_unparseable_payload() {
        let channel = MockChannel::unparseable(ChannelKind::Telegram);
        let app = router(test_state(vec![channel]));
        let response = app
            .oneshot(json_post(
                "/api/v1/webhooks/telegram",
                serde_json::json!({"update_id": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["ok"], true);
    }

    #[tokio::test]
    async fn email_webhook_acks_with_received_status() {
        let channel = MockChannel::new(
            ChannelKind::Email,
            MockChannel::sample_message(ChannelKind::Email),
        );
        let app = router(test_state(vec![channel]));
        let response = app
            .oneshot(json_post(
                "/api/v1/webhooks/email",
                serde_json::json!({"from": "j@e.com", "text": "help"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "received");
    }

    #[tokio::test]
    async fn channels_status_lists_registered_channels() {
        let channel = MockChannel::new(
            ChannelKind::Telegram,
            MockChannel::sample_message(ChannelKind::Telegram),
        );
        let app = router(test_state(vec![channel]));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/webhooks/channels/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["total_channels"], 1);
        assert_eq!(json["active_channels"][0], "telegram");
    }

    #[tokio::test]
    async fn test_endpoint_reports_completed() {
        let app = router(test_state(vec![]));
        let response = app
            .oneshot(json_post(
                "/api/v1/webhooks/channels/test",
                serde_json::json!({}),
            ))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["status"], "completed");
    }

    #[tokio::test]
    async fn send_endpoint_reports_failed_for_unknown_channel() {
        let app = router(test_state(vec![]));
        let response = app
            .oneshot(json_post(
                "/api/v1/webhooks/channels/slack/send",
                serde_json::json!({"to": "someone"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "failed");
        assert_eq!(json["channel"], "slack");
    }

    #[tokio::test]
    async fn send_endpoint_sends_through_registered_channel() {
        let channel = MockChannel::new(
            ChannelKind::Telegram,
            MockChannel::sample_message(ChannelKind::Telegram),
        );
        let app = router(test_state(vec![channel]));
        let response = app
            .oneshot(json_post(
                "/api/v1/webhooks/channels/telegram/send",
                serde_json::json!({"to": "555", "message": "ping"}),
            ))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["status"], "sent");
    }
}

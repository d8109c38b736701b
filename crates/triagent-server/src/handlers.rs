// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the webhook and channel-management API.
//!
//! Every handler returns 200 with a structured body: failures inside the
//! dispatch path are already values, so the HTTP layer never converts them
//! back into error statuses.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AppState;

/// Response body for the webhook acknowledgement endpoints.
#[derive(Debug, Serialize)]
pub struct TelegramAck {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct EmailAck {
    pub status: &'static str,
}

/// Request body for POST /api/v1/webhooks/channels/{channel}/send.
#[derive(Debug, Deserialize)]
pub struct SendTestRequest {
    pub to: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body for POST /api/v1/webhooks/channels/{channel}/send.
#[derive(Debug, Serialize)]
pub struct SendTestResponse {
    pub status: &'static str,
    pub channel: String,
    pub message: &'static str,
}

/// Response body for GET /api/v1/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// POST /api/v1/webhooks/telegram
///
/// Dispatches a Bot API update through the channel manager. The Bot API
/// only needs an acknowledgement; the dispatch outcome goes to the logs.
pub async fn telegram_webhook(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Json<TelegramAck> {
    let outcome = state.manager.process_message("telegram", &body).await;
    info!(outcome = ?serde_json::to_value(&outcome).ok(), "telegram webhook processed");
    Json(TelegramAck { ok: true })
}

/// POST /api/v1/webhooks/email
///
/// Dispatches an inbound-email provider payload through the channel manager.
pub async fn email_webhook(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Json<EmailAck> {
    let outcome = state.manager.process_message("email", &body).await;
    info!(outcome = ?serde_json::to_value(&outcome).ok(), "email webhook processed");
    Json(EmailAck { status: "received" })
}

/// GET /api/v1/webhooks/channels/status
pub async fn channels_status(State(state): State<AppState>) -> Json<serde_json::Value> {
    let summary = state.manager.get_channel_status().await;
    Json(serde_json::to_value(summary).unwrap_or_default())
}

/// POST /api/v1/webhooks/channels/test
pub async fn test_channels(State(state): State<AppState>) -> Json<serde_json::Value> {
    let results = state.manager.test_all_channels().await;
    Json(serde_json::json!({
        "status": "completed",
        "results": results,
    }))
}

/// POST /api/v1/webhooks/channels/{channel}/send
pub async fn send_test_message(
    State(state): State<AppState>,
    Path(channel): Path<String>,
    Json(body): Json<SendTestRequest>,
) -> Json<SendTestResponse> {
    let sent = state
        .manager
        .send_test_message(&channel, &body.to, body.message.as_deref())
        .await;

    Json(SendTestResponse {
        status: if sent { "sent" } else { "failed" },
        channel,
        message: if sent {
            "Test message sent successfully"
        } else {
            "Failed to send test message"
        },
    })
}

/// GET /api/v1/health
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Triagent crates.
//!
//! Everything here is request-scoped: normalized messages, classification
//! triples, gateway results, and processing envelopes live for the duration
//! of a single inbound message and are never persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The closed set of messaging channels the router understands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Telegram,
    Email,
}

/// Channel-specific fields carried alongside a normalized message.
///
/// Telegram populates the chat fields; email populates the mail fields.
/// Unused fields stay `None` and are omitted from serialized output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// The channel-agnostic message shape consumed by the orchestrator.
///
/// Produced exclusively by a channel adapter's parse operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMessage {
    /// Message text as the customer wrote it.
    pub content: String,
    /// Channel-specific sender identifier (Telegram user id, email address).
    pub sender: String,
    /// Originating channel.
    pub channel: ChannelKind,
    /// Channel-native message identifier, used for reply threading.
    pub message_id: String,
    /// Channel-specific extras.
    #[serde(default)]
    pub metadata: MessageMetadata,
}

/// Message priority assigned by classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Support category assigned by classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Billing,
    Technical,
    General,
}

/// Customer sentiment assigned by classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// The (priority, category, sentiment) triple assigned to an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub priority: Priority,
    pub category: Category,
    pub sentiment: Sentiment,
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            priority: Priority::Medium,
            category: Category::General,
            sentiment: Sentiment::Neutral,
        }
    }
}

/// Which tier of the fallback cascade produced an LLM result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Primary hosted chat-completion API.
    Mistral,
    /// Self-hosted fallback model API.
    Ollama,
    /// Deterministic keyword-rule responder.
    Local,
}

/// Result of a single gateway operation (classification or generation).
///
/// `success == false` means `content` is a best-effort human-readable
/// string, not an authoritative model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResult {
    pub content: String,
    pub model_used: String,
    pub provider: LlmProvider,
    pub tokens_used: u64,
    pub cost_usd: f64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Success envelope returned by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedReply {
    pub success: bool,
    pub ticket_id: String,
    pub classification: Classification,
    pub response: String,
    pub model_used: String,
}

/// Failure envelope returned by the orchestrator.
///
/// `error` is diagnostic only; `fallback_response` is the customer-safe text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingFailure {
    pub success: bool,
    pub error: String,
    pub fallback_response: String,
}

/// Outcome of orchestrating a single normalized message.
///
/// The orchestrator never panics and never returns `Err`: every path yields
/// one of these two envelopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProcessingResult {
    Success(ProcessedReply),
    Failure(ProcessingFailure),
}

impl ProcessingResult {
    pub fn success(
        ticket_id: String,
        classification: Classification,
        response: String,
        model_used: String,
    ) -> Self {
        Self::Success(ProcessedReply {
            success: true,
            ticket_id,
            classification,
            response,
            model_used,
        })
    }

    pub fn failure(error: String, fallback_response: String) -> Self {
        Self::Failure(ProcessingFailure {
            success: false,
            error,
            fallback_response,
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The generated reply text, when present and non-empty.
    pub fn response_text(&self) -> Option<&str> {
        match self {
            Self::Success(reply) if !reply.response.is_empty() => Some(&reply.response),
            _ => None,
        }
    }
}

/// A processed dispatch: the orchestrator result annotated with delivery state.
///
/// `sent` stays `None` when no reply was attempted (empty response text).
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedDispatch {
    #[serde(flatten)]
    pub result: ProcessingResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent: Option<bool>,
}

/// A dispatch rejected before orchestration: unknown channel or unparseable
/// payload. Mirrors the degrade-never-crash policy as a value, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelRejection {
    pub error: String,
    pub channel: String,
    pub processed: bool,
}

impl ChannelRejection {
    pub fn new(error: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            channel: channel.into(),
            processed: false,
        }
    }
}

/// Result of dispatching a raw payload through the channel manager.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DispatchOutcome {
    Processed(ProcessedDispatch),
    Rejected(ChannelRejection),
}

impl DispatchOutcome {
    pub fn rejected(error: impl Into<String>, channel: impl Into<String>) -> Self {
        Self::Rejected(ChannelRejection::new(error, channel))
    }
}

/// Connectivity state reported by a channel probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Connected,
    Error,
}

/// Result of probing a channel's live connectivity.
///
/// Computed on demand; never cached.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelStatus {
    pub status: ConnectionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChannelStatus {
    pub fn connected(detail: serde_json::Value) -> Self {
        Self {
            status: ConnectionState::Connected,
            detail: Some(detail),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ConnectionState::Error,
            detail: None,
            error: Some(message.into()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionState::Connected
    }
}

/// Static description of a channel's capabilities.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelInfo {
    pub name: ChannelKind,
    pub adapter: &'static str,
    pub supports_media: bool,
    pub supports_formatting: bool,
    pub max_message_length: usize,
    pub supported_formats: Vec<&'static str>,
    pub features: Vec<&'static str>,
}

/// Probe + info for one registered channel.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelDetail {
    pub active: bool,
    pub connection: ChannelStatus,
    pub info: ChannelInfo,
}

/// Aggregate status over all registered channels.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelStatusSummary {
    pub total_channels: usize,
    pub active_channels: Vec<String>,
    pub channel_details: BTreeMap<String, ChannelDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_kind_round_trips_through_strings() {
        use std::str::FromStr;

        for kind in [ChannelKind::Telegram, ChannelKind::Email] {
            let s = kind.to_string();
            assert_eq!(ChannelKind::from_str(&s).unwrap(), kind);
        }
        assert!(ChannelKind::from_str("slack").is_err());
    }

    #[test]
    fn classification_deserializes_from_gateway_json() {
        let json = r#"{"priority": "high", "category": "billing", "sentiment": "negative"}"#;
        let c: Classification = serde_json::from_str(json).unwrap();
        assert_eq!(c.priority, Priority::High);
        assert_eq!(c.category, Category::Billing);
        assert_eq!(c.sentiment, Sentiment::Negative);
    }

    #[test]
    fn classification_default_is_medium_general_neutral() {
        let c = Classification::default();
        assert_eq!(c.priority, Priority::Medium);
        assert_eq!(c.category, Category::General);
        assert_eq!(c.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn success_envelope_serializes_flat() {
        let result = ProcessingResult::success(
            "TICKET_20260101_120000".into(),
            Classification::default(),
            "reply text".into(),
            "mistral-small".into(),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["ticket_id"], "TICKET_20260101_120000");
        assert_eq!(json["classification"]["priority"], "medium");
        assert_eq!(json["response"], "reply text");
    }

    #[test]
    fn failure_envelope_serializes_flat() {
        let result = ProcessingResult::failure(
            "generation failed".into(),
            "Thank you for contacting support.".into(),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "generation failed");
        assert!(json.get("ticket_id").is_none());
    }

    #[test]
    fn response_text_empty_response_is_none() {
        let result = ProcessingResult::success(
            "TICKET_X".into(),
            Classification::default(),
            String::new(),
            "m".into(),
        );
        assert!(result.response_text().is_none());
    }

    #[test]
    fn dispatch_outcome_flattens_sent_flag() {
        let outcome = DispatchOutcome::Processed(ProcessedDispatch {
            result: ProcessingResult::success(
                "TICKET_X".into(),
                Classification::default(),
                "hi".into(),
                "m".into(),
            ),
            sent: Some(true),
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["sent"], true);
        assert_eq!(json["ticket_id"], "TICKET_X");
    }

    #[test]
    fn rejection_shape_matches_contract() {
        let outcome = DispatchOutcome::rejected("channel 'slack' not available", "slack");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["channel"], "slack");
        assert_eq!(json["processed"], false);
        assert!(json["error"].as_str().unwrap().contains("slack"));
    }

    #[test]
    fn channel_status_helpers() {
        let ok = ChannelStatus::connected(serde_json::json!({"bot": "triagent_bot"}));
        assert!(ok.is_connected());
        let bad = ChannelStatus::error("timed out");
        assert!(!bad.is_connected());
        assert_eq!(bad.error.as_deref(), Some("timed out"));
    }
}

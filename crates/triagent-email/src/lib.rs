// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Email channel adapter for the Triagent support router.
//!
//! Implements [`SupportChannel`] over SMTP submission (lettre) and
//! IMAP4-over-TLS polling (async-imap + mail-parser). The inbox poller in
//! [`poller`] feeds fetched mail through the same dispatch path used by
//! email webhooks.

pub mod address;
pub mod imap;
pub mod poller;
pub mod smtp;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::error;

use triagent_config::EmailConfig;
use triagent_core::traits::{SendOptions, SupportChannel};
use triagent_core::types::{
    ChannelInfo, ChannelKind, ChannelStatus, MessageMetadata, NormalizedMessage,
};
use triagent_core::TriagentError;

use crate::address::extract_address;
use crate::imap::{FetchedEmail, InboxConfig};
use crate::smtp::Mailer;

/// Subject used when an outbound mail has none (e.g. operator test sends).
const DEFAULT_SUBJECT: &str = "Response from Triagent Support";

/// Email channel adapter implementing [`SupportChannel`].
pub struct EmailChannel {
    mailer: Mailer,
    inbox: InboxConfig,
}

impl EmailChannel {
    /// Creates a new email channel adapter.
    ///
    /// Requires SMTP host, username, and password; the composition layer
    /// treats the error as "channel disabled", not as a startup failure.
    /// The IMAP host defaults to the SMTP host when unset.
    pub fn new(config: EmailConfig) -> Result<Self, TriagentError> {
        let (Some(smtp_host), Some(username), Some(password)) = (
            config.smtp_host.as_deref(),
            config.username.as_deref(),
            config.password.as_deref(),
        ) else {
            return Err(TriagentError::Config(
                "email configuration incomplete: smtp_host, username, and password are required"
                    .into(),
            ));
        };

        let mailer = Mailer::new(smtp_host, config.smtp_port, username, password)?;
        let inbox = InboxConfig {
            host: config.imap_host.as_deref().unwrap_or(smtp_host).to_string(),
            port: config.imap_port,
            username: username.to_string(),
            password: password.to_string(),
        };

        Ok(Self { mailer, inbox })
    }

    /// Fetches unseen inbox messages received since `since`.
    pub async fn fetch_unread_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<FetchedEmail>, TriagentError> {
        imap::fetch_unread_since(&self.inbox, since).await
    }
}

fn non_empty_str<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

#[async_trait]
impl SupportChannel for EmailChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Email
    }

    /// Parses both the poller shape (`from` + `content`) and webhook
    /// provider shapes (`text` or `body`). A payload with no extractable
    /// body yields `None`.
    fn parse_incoming(&self, raw: &Value) -> Option<NormalizedMessage> {
        let from = raw.get("from").and_then(Value::as_str).unwrap_or_default();
        let subject = raw
            .get("subject")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let (content, message_id, metadata) =
            if raw.get("from").is_some() && raw.get("content").is_some() {
                // Poller shape.
                let content = non_empty_str(raw, "content")?.to_string();
                let message_id = raw
                    .get("message_id")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let metadata = MessageMetadata {
                    subject: Some(subject),
                    received_at: raw
                        .get("received_at")
                        .and_then(Value::as_str)
                        .map(String::from),
                    full_from: Some(from.to_string()),
                    ..MessageMetadata::default()
                };
                (content, message_id, metadata)
            } else {
                // Webhook shape, tolerant of provider variants.
                let content = non_empty_str(raw, "text")
                    .or_else(|| non_empty_str(raw, "body"))?
                    .to_string();
                let message_id = non_empty_str(raw, "message_id")
                    .or_else(|| non_empty_str(raw, "id"))
                    .unwrap_or_default()
                    .to_string();
                let metadata = MessageMetadata {
                    subject: Some(subject),
                    provider: Some(
                        raw.get("provider")
                            .and_then(Value::as_str)
                            .unwrap_or("unknown")
                            .to_string(),
                    ),
                    ..MessageMetadata::default()
                };
                (content, message_id, metadata)
            };

        Some(NormalizedMessage {
            content,
            sender: extract_address(from),
            channel: ChannelKind::Email,
            message_id,
            metadata,
        })
    }

    async fn send(&self, to: &str, content: &str, opts: &SendOptions) -> bool {
        let subject = opts.subject.as_deref().unwrap_or(DEFAULT_SUBJECT);
        match self
            .mailer
            .send(to, subject, content, opts.in_reply_to.as_deref())
            .await
        {
            Ok(()) => true,
            Err(e) => {
                error!(to, error = %e, "failed to send email");
                false
            }
        }
    }

    async fn test_connection(&self) -> ChannelStatus {
        let smtp = self.mailer.test_connection().await;
        let imap = imap::test_connection(&self.inbox).await;

        let mut errors = Vec::new();
        let smtp_ok = match smtp {
            Ok(true) => true,
            Ok(false) => {
                errors.push("SMTP server rejected the connection test".to_string());
                false
            }
            Err(e) => {
                errors.push(e.to_string());
                false
            }
        };
        let imap_ok = match imap {
            Ok(()) => true,
            Err(e) => {
                errors.push(e.to_string());
                false
            }
        };

        if smtp_ok && imap_ok {
            ChannelStatus::connected(serde_json::json!({"smtp": true, "imap": true}))
        } else {
            ChannelStatus::error(errors.join("; "))
        }
    }

    fn format_response(&self, text: &str) -> String {
        format!(
            "Dear Customer,\n\n{text}\n\nThank you for contacting Triagent Support. We're here \
             to help you with any questions or concerns you may have.\n\nIf you need immediate \
             assistance, please don't hesitate to reach out to our support team directly.\n\n\
             Best regards,\nTriagent Support Team\n\n---\nThis is an automated reply from the \
             Triagent support system.\nFor urgent matters, please contact our support team \
             directly.\n"
        )
    }

    fn channel_info(&self) -> ChannelInfo {
        ChannelInfo {
            name: ChannelKind::Email,
            adapter: "EmailChannel",
            supports_media: true,
            supports_formatting: true,
            max_message_length: 50_000,
            supported_formats: vec!["plain_text", "html"],
            features: vec!["threading", "attachments", "auto_polling"],
        }
    }
}

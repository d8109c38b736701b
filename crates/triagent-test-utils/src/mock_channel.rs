// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock channel adapter for dispatcher tests.
//!
//! Parses to a pre-configured normalized message, records every outbound
//! send, and reports a scripted connectivity status.

use std::sync::Mutex;

use async_trait::async_trait;

use triagent_core::traits::{SendOptions, SupportChannel};
use triagent_core::types::{
    ChannelInfo, ChannelKind, ChannelStatus, MessageMetadata, NormalizedMessage,
};

/// One recorded outbound send.
#[derive(Debug, Clone, PartialEq)]
pub struct SentRecord {
    pub to: String,
    pub content: String,
    pub opts: SendOptions,
}

/// A mock channel adapter with scripted parse/send/probe behavior.
pub struct MockChannel {
    kind: ChannelKind,
    parse_result: Option<NormalizedMessage>,
    send_ok: bool,
    connected: bool,
    sent: Mutex<Vec<SentRecord>>,
}

impl MockChannel {
    /// A channel that parses every payload to `message` and sends successfully.
    pub fn new(kind: ChannelKind, message: NormalizedMessage) -> Self {
        Self {
            kind,
            parse_result: Some(message),
            send_ok: true,
            connected: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// A channel whose parse always yields `None`.
    pub fn unparseable(kind: ChannelKind) -> Self {
        Self {
            kind,
            parse_result: None,
            send_ok: true,
            connected: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Make every send report failure.
    pub fn failing_sends(mut self) -> Self {
        self.send_ok = false;
        self
    }

    /// Make the connectivity probe report an error.
    pub fn disconnected(mut self) -> Self {
        self.connected = false;
        self
    }

    /// All sends recorded so far.
    pub fn sent_messages(&self) -> Vec<SentRecord> {
        self.sent.lock().expect("sent lock poisoned").clone()
    }

    /// A plain normalized message for the given channel.
    pub fn sample_message(kind: ChannelKind) -> NormalizedMessage {
        NormalizedMessage {
            content: "sample customer message".to_string(),
            sender: "customer-1".to_string(),
            channel: kind,
            message_id: "100".to_string(),
            metadata: MessageMetadata::default(),
        }
    }
}

#[async_trait]
impl SupportChannel for MockChannel {
    fn kind(&self) -> ChannelKind {
        self.kind
    }

    fn parse_incoming(&self, _raw: &serde_json::Value) -> Option<NormalizedMessage> {
        self.parse_result.clone()
    }

    async fn send(&self, to: &str, content: &str, opts: &SendOptions) -> bool {
        self.sent.lock().expect("sent lock poisoned").push(SentRecord {
            to: to.to_string(),
            content: content.to_string(),
            opts: opts.clone(),
        });
        self.send_ok
    }

    async fn test_connection(&self) -> ChannelStatus {
        if self.connected {
            ChannelStatus::connected(serde_json::json!({"mock": true}))
        } else {
            ChannelStatus::error("mock channel offline")
        }
    }

    fn format_response(&self, text: &str) -> String {
        format!("{text} [formatted]")
    }

    fn channel_info(&self) -> ChannelInfo {
        ChannelInfo {
            name: self.kind,
            adapter: "MockChannel",
            supports_media: false,
            supports_formatting: false,
            max_message_length: 1000,
            supported_formats: vec!["plain_text"],
            features: vec![],
        }
    }
}

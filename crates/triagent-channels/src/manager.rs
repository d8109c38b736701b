// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The channel manager: adapter registry plus unified message dispatch.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::Arc;

use tracing::{error, info, warn};

use triagent_core::traits::{SendOptions, SupportChannel};
use triagent_core::types::{
    ChannelDetail, ChannelKind, ChannelStatus, ChannelStatusSummary, DispatchOutcome,
    NormalizedMessage, ProcessedDispatch,
};
use triagent_orchestrator::Orchestrator;

/// Subject used for email replies when the inbound message carried none.
const DEFAULT_REPLY_SUBJECT: &str = "Response from Triagent Support";

/// Registry and dispatcher over the active channel adapters.
///
/// Constructed once at startup and shared behind `Arc`; the registry is
/// read-only afterwards, so concurrent dispatches share nothing mutable.
pub struct ChannelManager {
    channels: HashMap<ChannelKind, Arc<dyn SupportChannel>>,
    orchestrator: Orchestrator,
}

impl ChannelManager {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            channels: HashMap::new(),
            orchestrator,
        }
    }

    /// Registers an adapter under its own channel tag.
    pub fn register(&mut self, channel: Arc<dyn SupportChannel>) {
        info!(channel = %channel.kind(), "channel registered");
        self.channels.insert(channel.kind(), channel);
    }

    /// Names of all registered channels, sorted.
    pub fn available_channels(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels.keys().map(ChannelKind::to_string).collect();
        names.sort();
        names
    }

    /// Looks up an adapter by tag.
    pub fn channel(&self, kind: ChannelKind) -> Option<&Arc<dyn SupportChannel>> {
        self.channels.get(&kind)
    }

    fn resolve(&self, channel_name: &str) -> Option<&Arc<dyn SupportChannel>> {
        ChannelKind::from_str(channel_name)
            .ok()
            .and_then(|kind| self.channels.get(&kind))
    }

    /// Processes one raw inbound payload end to end.
    ///
    /// Unknown channels and unparseable payloads yield a structured
    /// rejection; orchestration results are annotated with the delivery
    /// outcome. This method never returns an error.
    pub async fn process_message(
        &self,
        channel_name: &str,
        raw: &serde_json::Value,
    ) -> DispatchOutcome {
        let Some(channel) = self.resolve(channel_name) else {
            warn!(channel = channel_name, "dispatch to unavailable channel");
            return DispatchOutcome::rejected(
                format!("channel '{channel_name}' not available"),
                channel_name,
            );
        };

        let Some(parsed) = channel.parse_incoming(raw) else {
            warn!(channel = channel_name, "failed to parse incoming payload");
            return DispatchOutcome::rejected("failed to parse incoming message", channel_name);
        };

        let result = self.orchestrator.process_message(&parsed).await;

        let sent = match result.response_text() {
            Some(response) => {
                let (recipient, opts) = send_parameters(&parsed);
                let formatted = channel.format_response(response);
                let ok = channel.send(&recipient, &formatted, &opts).await;
                if ok {
                    info!(channel = channel_name, to = %recipient, "response sent");
                } else {
                    error!(channel = channel_name, to = %recipient, "failed to send response");
                }
                Some(ok)
            }
            None => None,
        };

        DispatchOutcome::Processed(ProcessedDispatch { result, sent })
    }

    /// Probes every registered channel and reports aggregate status.
    pub async fn get_channel_status(&self) -> ChannelStatusSummary {
        let mut active_channels = Vec::new();
        let mut channel_details = BTreeMap::new();

        for (kind, channel) in &self.channels {
            let connection = channel.test_connection().await;
            let active = connection.is_connected();
            if active {
                active_channels.push(kind.to_string());
            }
            channel_details.insert(
                kind.to_string(),
                ChannelDetail {
                    active,
                    connection,
                    info: channel.channel_info(),
                },
            );
        }

        active_channels.sort();
        ChannelStatusSummary {
            total_channels: self.channels.len(),
            active_channels,
            channel_details,
        }
    }

    /// Runs a connectivity probe on every registered channel.
    pub async fn test_all_channels(&self) -> BTreeMap<String, ChannelStatus> {
        let mut results = BTreeMap::new();
        for (kind, channel) in &self.channels {
            let status = channel.test_connection().await;
            info!(channel = %kind, connected = status.is_connected(), "channel probed");
            results.insert(kind.to_string(), status);
        }
        results
    }

    /// Sends a test message through one channel. `false` for unknown channels.
    pub async fn send_test_message(
        &self,
        channel_name: &str,
        to: &str,
        message: Option<&str>,
    ) -> bool {
        let Some(channel) = self.resolve(channel_name) else {
            error!(channel = channel_name, "test message to unavailable channel");
            return false;
        };

        let default_text =
            format!("Test message from the Triagent support system via {channel_name}");
        let text = message.unwrap_or(&default_text);
        channel.send(to, text, &SendOptions::default()).await
    }
}

/// Derives the recipient and channel-specific delivery parameters for a
/// reply. Adding a channel means adding one arm here, nothing else.
fn send_parameters(message: &NormalizedMessage) -> (String, SendOptions) {
    match message.channel {
        ChannelKind::Telegram => {
            // Replies go to the chat, not the sending user: group chats have
            // distinct ids for the two.
            let recipient = message
                .metadata
                .chat_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| message.sender.clone());
            let opts = SendOptions {
                reply_to_message_id: message.message_id.parse::<i32>().ok(),
                ..SendOptions::default()
            };
            (recipient, opts)
        }
        ChannelKind::Email => {
            let subject = match message.metadata.subject.as_deref() {
                Some(s) if !s.is_empty() && !s.starts_with("Re:") => format!("Re: {s}"),
                Some(s) if !s.is_empty() => s.to_string(),
                _ => DEFAULT_REPLY_SUBJECT.to_string(),
            };
            let in_reply_to = if message.message_id.is_empty() {
                None
            } else {
                Some(message.message_id.clone())
            };
            let opts = SendOptions {
                subject: Some(subject),
                in_reply_to,
                ..SendOptions::default()
            };
            (message.sender.clone(), opts)
        }
    }
}

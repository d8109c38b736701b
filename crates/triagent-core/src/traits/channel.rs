// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for messaging platform integrations (Telegram, email).

use async_trait::async_trait;

use crate::types::{ChannelInfo, ChannelKind, ChannelStatus, NormalizedMessage};

/// Channel-specific delivery parameters, derived by the dispatcher.
///
/// Telegram uses `reply_to_message_id`; email uses `subject` and
/// `in_reply_to`. Fields irrelevant to a channel are ignored by it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendOptions {
    pub reply_to_message_id: Option<i32>,
    pub subject: Option<String>,
    pub in_reply_to: Option<String>,
}

/// Adapter translating between a channel's native wire format and the
/// router's normalized message shape.
///
/// The adapter set is closed and enumerable: implementations are registered
/// in the channel manager's map keyed by [`ChannelKind`], and dispatch is an
/// explicit tag lookup, never open-ended discovery.
#[async_trait]
pub trait SupportChannel: Send + Sync + 'static {
    /// Which channel this adapter serves.
    fn kind(&self) -> ChannelKind;

    /// Maps a channel-native payload to a [`NormalizedMessage`].
    ///
    /// Returns `None` (not an error) when the payload lacks the expected
    /// shape, e.g. a Telegram update with no message or an email body-less
    /// webhook.
    fn parse_incoming(&self, raw: &serde_json::Value) -> Option<NormalizedMessage>;

    /// Sends a message through the channel's native API.
    ///
    /// Transport failures are logged and swallowed into `false`; this call
    /// never propagates an error.
    async fn send(&self, to: &str, content: &str, opts: &SendOptions) -> bool;

    /// Performs a lightweight live connectivity probe.
    async fn test_connection(&self) -> ChannelStatus;

    /// Wraps generated text in channel-appropriate presentation.
    fn format_response(&self, text: &str) -> String;

    /// Static description of the channel's capabilities.
    fn channel_info(&self) -> ChannelInfo;
}

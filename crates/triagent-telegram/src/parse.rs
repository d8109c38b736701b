// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook payload parsing for Telegram Bot API updates.

use serde_json::Value;
use teloxide::types::{Update, UpdateKind};

use triagent_core::types::{ChannelKind, MessageMetadata, NormalizedMessage};

/// Maps a Bot API webhook payload to a [`NormalizedMessage`].
///
/// Only `message` updates carrying text are routable. Everything else
/// (edited messages, callback queries, media without text, payloads that
/// are not updates at all) yields `None`, never an error.
pub fn parse_update(raw: &Value) -> Option<NormalizedMessage> {
    let update: Update = serde_json::from_value(raw.clone()).ok()?;
    let UpdateKind::Message(msg) = update.kind else {
        return None;
    };
    let content = msg.text()?.to_string();

    let sender = msg
        .from
        .as_ref()
        .map(|u| u.id.0.to_string())
        .unwrap_or_default();

    // The chat type string comes straight from the wire payload; the enum
    // representation is not needed downstream.
    let chat_type = raw
        .pointer("/message/chat/type")
        .and_then(Value::as_str)
        .map(String::from);

    Some(NormalizedMessage {
        content,
        sender,
        channel: ChannelKind::Telegram,
        message_id: msg.id.0.to_string(),
        metadata: MessageMetadata {
            chat_id: Some(msg.chat.id.0),
            username: msg.from.as_ref().and_then(|u| u.username.clone()),
            first_name: msg.from.as_ref().map(|u| u.first_name.clone()),
            chat_type,
            ..MessageMetadata::default()
        },
    })
}

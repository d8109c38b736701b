// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for the Triagent support router.
//!
//! Implements [`SupportChannel`] over the Bot API via teloxide: webhook
//! payload parsing, `sendMessage` delivery with reply linkage, and a
//! `getMe` connectivity probe.

pub mod format;
pub mod parse;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, ParseMode, ReplyParameters};
use tracing::{error, info};

use triagent_config::TelegramConfig;
use triagent_core::traits::{SendOptions, SupportChannel};
use triagent_core::types::{ChannelInfo, ChannelKind, ChannelStatus, NormalizedMessage};
use triagent_core::TriagentError;

/// Telegram channel adapter implementing [`SupportChannel`].
pub struct TelegramChannel {
    bot: Bot,
}

impl TelegramChannel {
    /// Creates a new Telegram channel adapter.
    ///
    /// Requires `config.bot_token` to be set; the composition layer treats
    /// the error as "channel disabled", not as a startup failure.
    pub fn new(config: TelegramConfig) -> Result<Self, TriagentError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            TriagentError::Config("telegram.bot_token is required for the Telegram channel".into())
        })?;

        if token.is_empty() {
            return Err(TriagentError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        Ok(Self {
            bot: Bot::new(token),
        })
    }
}

#[async_trait]
impl SupportChannel for TelegramChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Telegram
    }

    fn parse_incoming(&self, raw: &serde_json::Value) -> Option<NormalizedMessage> {
        parse::parse_update(raw)
    }

    async fn send(&self, to: &str, content: &str, opts: &SendOptions) -> bool {
        let chat_id = match to.parse::<i64>() {
            Ok(id) => ChatId(id),
            Err(e) => {
                error!(to, error = %e, "invalid Telegram chat id");
                return false;
            }
        };

        let mut request = self
            .bot
            .send_message(chat_id, content)
            .parse_mode(ParseMode::Markdown);
        if let Some(reply_to) = opts.reply_to_message_id {
            request = request.reply_parameters(ReplyParameters::new(MessageId(reply_to)));
        }

        match request.await {
            Ok(_) => {
                info!(chat_id = chat_id.0, "message sent to Telegram chat");
                true
            }
            Err(e) => {
                error!(chat_id = chat_id.0, error = %e, "failed to send Telegram message");
                false
            }
        }
    }

    async fn test_connection(&self) -> ChannelStatus {
        match self.bot.get_me().await {
            Ok(me) => ChannelStatus::connected(serde_json::json!({
                "bot_id": me.user.id.0,
                "username": me.user.username.clone().unwrap_or_default(),
            })),
            Err(e) => ChannelStatus::error(format!("Telegram bot unreachable: {e}")),
        }
    }

    fn format_response(&self, text: &str) -> String {
        format::format_response(text)
    }

    fn channel_info(&self) -> ChannelInfo {
        ChannelInfo {
            name: ChannelKind::Telegram,
            adapter: "TelegramChannel",
            supports_media: true,
            supports_formatting: true,
            max_message_length: 4096,
            supported_formats: vec!["Markdown", "HTML"],
            features: vec!["reply_threading", "inline_keyboards"],
        }
    }
}

// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Triagent support router.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. Credentials are optional: a channel whose
//! credentials are absent is disabled rather than failing startup.

use serde::{Deserialize, Serialize};

/// Top-level Triagent configuration.
///
/// Loaded from a TOML file with `TRIAGENT_` environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriagentConfig {
    /// Service identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// HTTP server bind settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Email (SMTP/IMAP) integration settings.
    #[serde(default)]
    pub email: EmailConfig,

    /// LLM provider settings.
    #[serde(default)]
    pub llm: LlmConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in outbound signatures and test messages.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "triagent".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP server bind configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. `None` disables the Telegram channel.
    #[serde(default)]
    pub bot_token: Option<String>,
}

/// Email integration configuration.
///
/// The channel is enabled only when `smtp_host`, `username`, and `password`
/// are all present.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmailConfig {
    /// SMTP submission host. `None` disables the email channel.
    #[serde(default)]
    pub smtp_host: Option<String>,

    /// SMTP submission port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// IMAP host for inbound polling. Defaults to the SMTP host's provider
    /// convention when unset.
    #[serde(default)]
    pub imap_host: Option<String>,

    /// IMAP-over-TLS port.
    #[serde(default = "default_imap_port")]
    pub imap_port: u16,

    /// Mailbox login, also used as the From address.
    #[serde(default)]
    pub username: Option<String>,

    /// Mailbox password.
    #[serde(default)]
    pub password: Option<String>,

    /// Seconds between inbox polls.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: default_smtp_port(),
            imap_host: None,
            imap_port: default_imap_port(),
            username: None,
            password: None,
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_imap_port() -> u16 {
    993
}

fn default_poll_interval() -> u64 {
    30
}

/// LLM provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// API key for the hosted primary provider. `None` means the primary
    /// call always fails over to the fallback chain.
    #[serde(default)]
    pub mistral_api_key: Option<String>,

    /// Base URL for the hosted primary provider.
    #[serde(default = "default_mistral_base_url")]
    pub mistral_base_url: String,

    /// Base URL for the self-hosted fallback model server.
    #[serde(default = "default_ollama_base_url")]
    pub ollama_base_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            mistral_api_key: None,
            mistral_base_url: default_mistral_base_url(),
            ollama_base_url: default_ollama_base_url(),
        }
    }
}

fn default_mistral_base_url() -> String {
    "https://api.mistral.ai".to_string()
}

fn default_ollama_base_url() -> String {
    "http://ollama:11434".to_string()
}

impl EmailConfig {
    /// True when enough credentials are present to run the channel.
    pub fn is_configured(&self) -> bool {
        self.smtp_host.is_some() && self.username.is_some() && self.password.is_some()
    }

    /// IMAP host, falling back to the SMTP host when unset.
    pub fn imap_host_or_smtp(&self) -> Option<&str> {
        self.imap_host.as_deref().or(self.smtp_host.as_deref())
    }
}

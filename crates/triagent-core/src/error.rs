// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Triagent support router.

use thiserror::Error;

/// The primary error type used across Triagent crates.
///
/// Most boundaries in this system degrade instead of propagating: the LLM
/// gateway, channel sends, and the dispatcher all convert errors into result
/// values. `TriagentError` is what flows *inside* those boundaries and at
/// startup, where failing loudly is still the right call.
#[derive(Debug, Error)]
pub enum TriagentError {
    /// Configuration errors (missing credentials, invalid TOML, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Channel adapter errors (connection failure, transport error, bad payload).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// LLM provider errors (API failure, unexpected response shape).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Requested channel is not registered or its credentials are absent.
    #[error("channel '{name}' not available")]
    ChannelUnavailable { name: String },

    /// Inbound payload did not match the channel's expected shape.
    #[error("failed to parse incoming {channel} message")]
    ParseFailure { channel: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

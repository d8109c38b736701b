// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Triagent support router.
//!
//! Layered loading (defaults, TOML file, `TRIAGENT_` environment variables)
//! built on Figment. Absent channel credentials disable the channel; they
//! never fail startup.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    AgentConfig, EmailConfig, LlmConfig, ServerConfig, TelegramConfig, TriagentConfig,
};

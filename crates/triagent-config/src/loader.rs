// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Merge order: compiled defaults, then `./triagent.toml`, then `TRIAGENT_`
//! environment variables. Channel credentials typically arrive via the
//! environment (`TRIAGENT_TELEGRAM_BOT_TOKEN`, `TRIAGENT_EMAIL_PASSWORD`, ...).

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TriagentConfig;

/// Load configuration from `./triagent.toml` with env var overrides.
pub fn load_config() -> Result<TriagentConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriagentConfig::default()))
        .merge(Toml::file("triagent.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from an inline TOML string (no file lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<TriagentConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriagentConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TriagentConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriagentConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TRIAGENT_TELEGRAM_BOT_TOKEN` must map
/// to `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("TRIAGENT_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: TRIAGENT_EMAIL_SMTP_HOST -> "email_smtp_host"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("server_", "server.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("email_", "email.", 1)
            .replacen("llm_", "llm.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_defaults_from_empty_input() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.agent.name, "triagent");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn toml_sections_override_defaults() {
        let config = load_config_from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [llm]
            mistral_api_key = "key-123"
            ollama_base_url = "http://localhost:11434"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.llm.mistral_api_key.as_deref(), Some("key-123"));
        assert_eq!(config.llm.ollama_base_url, "http://localhost:11434");
    }

    #[test]
    fn env_vars_override_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "triagent.toml",
                r#"
                [telegram]
                bot_token = "from-file"
                "#,
            )?;
            jail.set_env("TRIAGENT_TELEGRAM_BOT_TOKEN", "from-env");
            jail.set_env("TRIAGENT_EMAIL_SMTP_HOST", "smtp.example.com");

            let config = load_config().expect("config should load");
            assert_eq!(config.telegram.bot_token.as_deref(), Some("from-env"));
            assert_eq!(
                config.email.smtp_host.as_deref(),
                Some("smtp.example.com")
            );
            Ok(())
        });
    }

    #[test]
    fn underscore_keys_map_to_sections_not_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TRIAGENT_EMAIL_POLL_INTERVAL_SECS", "5");
            jail.set_env("TRIAGENT_LLM_MISTRAL_API_KEY", "k");

            let config = load_config().expect("config should load");
            assert_eq!(config.email.poll_interval_secs, 5);
            assert_eq!(config.llm.mistral_api_key.as_deref(), Some("k"));
            Ok(())
        });
    }
}

// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `triagent serve` command implementation.
//!
//! Builds the composition object once (gateway, orchestrator, channel
//! adapters, manager), probes the configured channels, then runs the HTTP
//! server and the email inbox poller until a shutdown signal arrives.
//! Channels whose credentials are absent are disabled, not fatal.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use triagent_channels::ChannelManager;
use triagent_config::TriagentConfig;
use triagent_core::TriagentError;
use triagent_email::poller::run_email_poller;
use triagent_email::EmailChannel;
use triagent_llm::LlmGateway;
use triagent_orchestrator::Orchestrator;
use triagent_server::{start_server, AppState};
use triagent_telegram::TelegramChannel;

use crate::shutdown;

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Runs the `triagent serve` command.
pub async fn run_serve(config: TriagentConfig) -> Result<(), TriagentError> {
    init_tracing(&config.agent.log_level);
    info!(name = %config.agent.name, "starting triagent serve");

    let gateway = Arc::new(LlmGateway::new(&config.llm)?);
    if config.llm.mistral_api_key.is_none() {
        warn!("no hosted LLM API key configured; relying on fallback providers");
    }

    let orchestrator = Orchestrator::new(gateway);
    let mut manager = ChannelManager::new(orchestrator);

    match TelegramChannel::new(config.telegram.clone()) {
        Ok(channel) => manager.register(Arc::new(channel)),
        Err(e) => warn!(error = %e, "Telegram channel disabled"),
    }

    let mut email_channel = None;
    match EmailChannel::new(config.email.clone()) {
        Ok(channel) => {
            let channel = Arc::new(channel);
            manager.register(channel.clone());
            email_channel = Some(channel);
        }
        Err(e) => warn!(error = %e, "email channel disabled"),
    }

    let manager = Arc::new(manager);

    // Startup probe: informational only, a dead channel still stays
    // registered and may come back without a restart.
    let probes = manager.test_all_channels().await;
    let active: Vec<&str> = probes
        .iter()
        .filter(|(_, status)| status.is_connected())
        .map(|(name, _)| name.as_str())
        .collect();
    if active.is_empty() {
        warn!("no channels are currently active");
    } else {
        info!(channels = ?active, "active channels");
    }

    let token = shutdown::install_signal_handler();

    let poller_handle = email_channel.map(|channel| {
        info!("email polling service starting");
        tokio::spawn(run_email_poller(
            manager.clone(),
            channel,
            Duration::from_secs(config.email.poll_interval_secs),
            token.clone(),
        ))
    });

    let state = AppState::new(manager);
    let result = start_server(&config.server, state, token.clone()).await;

    // Stop the poller on the way out, whether the server exited cleanly
    // or the bind failed.
    token.cancel();
    if let Some(handle) = poller_handle {
        let _ = handle.await;
        info!("email polling service stopped");
    }

    info!("triagent stopped");
    result
}

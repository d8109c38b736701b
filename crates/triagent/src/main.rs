// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Triagent - AI-assisted multi-channel customer support router.
//!
//! This is the binary entry point.

mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Triagent - AI-assisted multi-channel customer support router.
#[derive(Parser, Debug)]
#[command(name = "triagent", version, about, long_about = None)]
struct Cli {
    /// Path to a configuration file (defaults to ./triagent.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the support router server.
    Serve,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => triagent_config::load_config_from_path(path),
        None => triagent_config::load_config(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("triagent: invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("triagent: {e}");
                std::process::exit(1);
            }
        }
        None => {
            println!("triagent: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        let config = triagent_config::load_config_from_str("")
            .expect("default config should be valid");
        assert_eq!(config.agent.name, "triagent");
        assert_eq!(config.server.port, 8000);
    }
}

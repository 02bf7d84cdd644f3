// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Leadflow - A Telegram bot that tracks real-estate sales leads.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use leadflow_config::LeadflowConfig;

/// Leadflow - A Telegram bot that tracks real-estate sales leads.
#[derive(Parser, Debug)]
#[command(name = "leadflow", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the bot and poll Telegram until interrupted.
    Serve,
    /// Print the effective configuration (secrets redacted).
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => leadflow_config::load_and_validate_path(path),
        None => leadflow_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            leadflow_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("leadflow: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match render_config(&config) {
            Ok(text) => print!("{text}"),
            Err(e) => {
                eprintln!("leadflow: failed to render config: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("leadflow: use --help for available commands");
        }
    }
}

const REDACTED: &str = "********";

/// Renders `config` as TOML with the bot token masked.
fn render_config(config: &LeadflowConfig) -> Result<String, toml::ser::Error> {
    let mut shown = config.clone();
    if shown.telegram.bot_token.is_some() {
        shown.telegram.bot_token = Some(REDACTED.to_string());
    }
    toml::to_string_pretty(&shown)
}

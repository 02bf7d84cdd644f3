// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `leadflow serve` command.

use std::sync::Arc;

use leadflow_agent::{shutdown, EventLoop};
use leadflow_config::LeadflowConfig;
use leadflow_core::{ChannelAdapter, HealthStatus, LeadflowError};
use leadflow_crm::{Dispatcher, LeadStore, ReminderScheduler};
use leadflow_telegram::TelegramChannel;
use tracing::{error, info, warn};

/// Runs the `leadflow serve` command.
///
/// Connects the Telegram channel, wires the lead store, reminder scheduler
/// and dispatcher together, and runs the event loop until a shutdown signal
/// arrives or the channel closes. Lead data lives only in this process.
pub async fn run_serve(config: LeadflowConfig) -> Result<(), LeadflowError> {
    init_tracing(&config.bot.log_level);

    info!(bot_name = config.bot.name.as_str(), "starting leadflow serve");

    let mut telegram = TelegramChannel::new(&config.telegram).map_err(|e| {
        error!(error = %e, "failed to initialize Telegram channel");
        eprintln!(
            "error: Telegram bot token required. Set `telegram.bot_token` in leadflow.toml or LEADFLOW_TELEGRAM_BOT_TOKEN"
        );
        e
    })?;
    telegram.connect().await?;
    let channel: Arc<dyn ChannelAdapter> = Arc::new(telegram);
    check_channel_health(channel.as_ref()).await;

    let store = Arc::new(LeadStore::new());
    let scheduler = ReminderScheduler::new(store.clone(), channel.clone());
    let dispatcher = Dispatcher::new(&config, store, scheduler);

    info!(
        default_delay_secs = config.reminder.default_delay_secs,
        delay_options = ?config.reminder.delay_options_hours,
        "lead engine initialized"
    );

    let cancel = shutdown::install_signal_handler();
    let event_loop = EventLoop::new(channel, dispatcher);
    event_loop.run(cancel).await?;

    info!("leadflow serve shutdown complete");
    Ok(())
}

/// Logs the channel's health after connecting. An unhealthy channel is only
/// warned about: polling retries on its own once the platform is reachable.
async fn check_channel_health(channel: &dyn ChannelAdapter) -> bool {
    match channel.health_check().await {
        Ok(HealthStatus::Healthy) => {
            info!(channel = channel.name(), "channel healthy");
            true
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            warn!(channel = channel.name(), reason = reason.as_str(), "channel unhealthy");
            false
        }
        Err(e) => {
            warn!(channel = channel.name(), error = %e, "channel health check failed");
            false
        }
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("leadflow={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadflow_test_utils::MockChannel;

    #[tokio::test]
    async fn healthy_channel_passes_the_startup_check() {
        let channel = MockChannel::new();
        assert!(check_channel_health(&channel).await);
    }

    #[tokio::test]
    async fn failing_channel_is_reported_unhealthy() {
        let channel = MockChannel::new();
        channel.fail_sends(true);
        assert!(!check_channel_health(&channel).await);
    }
}

// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for the Leadflow lead tracker.
//!
//! Implements [`ChannelAdapter`] for the Telegram Bot API via teloxide,
//! providing long polling, callback-query handling and keyboard rendering.

pub mod handler;
pub mod keyboard;

use async_trait::async_trait;
use leadflow_config::model::TelegramConfig;
use leadflow_core::traits::{ChannelAdapter, PluginAdapter};
use leadflow_core::types::{HealthStatus, InboundEvent, MessageId, OutboundMessage};
use leadflow_core::LeadflowError;
use teloxide::prelude::*;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Telegram channel adapter implementing [`ChannelAdapter`].
///
/// Connects to Telegram via long polling. Text messages and button presses
/// are queued for [`receive`](ChannelAdapter::receive); once polling stops the
/// queue drains and `receive` reports [`LeadflowError::ChannelClosed`].
pub struct TelegramChannel {
    bot: Bot,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<InboundEvent>>,
    inbound_tx: Option<mpsc::Sender<InboundEvent>>,
    polling_handle: Option<tokio::task::JoinHandle<()>>,
    stop: CancellationToken,
}

impl TelegramChannel {
    /// Creates a new Telegram channel adapter.
    ///
    /// Requires `config.bot_token` to be set.
    pub fn new(config: &TelegramConfig) -> Result<Self, LeadflowError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            LeadflowError::Config("telegram.bot_token is required for Telegram adapter".into())
        })?;

        if token.trim().is_empty() {
            return Err(LeadflowError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        let bot = Bot::new(token);
        let (inbound_tx, inbound_rx) = mpsc::channel(100);

        Ok(Self {
            bot,
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx: Some(inbound_tx),
            polling_handle: None,
            stop: CancellationToken::new(),
        })
    }
}

#[async_trait]
impl PluginAdapter for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, LeadflowError> {
        // Check if the bot token is valid by calling getMe.
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), LeadflowError> {
        debug!("Telegram channel shutting down");
        self.stop.cancel();
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for TelegramChannel {
    async fn connect(&mut self) -> Result<(), LeadflowError> {
        if self.polling_handle.is_some() {
            return Ok(()); // Already connected
        }

        let tx = self.inbound_tx.take().ok_or(LeadflowError::ChannelClosed)?;
        let callback_tx = tx.clone();
        let bot = self.bot.clone();
        let stop = self.stop.clone();

        info!("starting Telegram long polling");

        let handle = tokio::spawn(async move {
            let messages = Update::filter_message().endpoint(move |msg: Message| {
                let tx = tx.clone();
                async move {
                    match handler::to_inbound_event(&msg) {
                        Some(event) => {
                            if tx.send(event).await.is_err() {
                                warn!("inbound channel closed, dropping message");
                            }
                        }
                        None => {
                            debug!(msg_id = msg.id.0, "ignoring non-text message");
                        }
                    }
                    respond(())
                }
            });

            let callbacks =
                Update::filter_callback_query().endpoint(move |bot: Bot, query: CallbackQuery| {
                    let tx = callback_tx.clone();
                    async move {
                        // Stop the client-side spinner whatever happens next.
                        if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
                            debug!(error = %e, "failed to answer callback query");
                        }
                        match handler::callback_to_inbound_event(&query) {
                            Some(event) => {
                                if tx.send(event).await.is_err() {
                                    warn!("inbound channel closed, dropping button press");
                                }
                            }
                            None => debug!("ignoring callback query without data"),
                        }
                        respond(())
                    }
                });

            let mut dispatcher = teloxide::dispatching::Dispatcher::builder(
                bot,
                dptree::entry().branch(messages).branch(callbacks),
            )
            .default_handler(|_| async {}) // Silently ignore other updates
            .build();

            tokio::select! {
                _ = dispatcher.dispatch() => {
                    info!("Telegram polling finished");
                }
                _ = stop.cancelled() => {
                    debug!("Telegram polling stopped");
                }
            }
        });

        self.polling_handle = Some(handle);
        Ok(())
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, LeadflowError> {
        let chat_id = handler::chat_id_of(&msg.conversation_id).ok_or_else(|| {
            LeadflowError::Delivery {
                message: format!("invalid chat id: {}", msg.conversation_id),
                source: None,
            }
        })?;

        let mut request = self.bot.send_message(chat_id, msg.text);
        if let Some(markup) = &msg.markup {
            request = request.reply_markup(keyboard::reply_markup(markup));
        }

        let sent = request.await.map_err(|e| LeadflowError::Delivery {
            message: format!("failed to send message: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(MessageId(sent.id.0.to_string()))
    }

    async fn receive(&self) -> Result<InboundEvent, LeadflowError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await.ok_or(LeadflowError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: Option<&str>) -> TelegramConfig {
        TelegramConfig {
            bot_token: token.map(str::to_string),
        }
    }

    #[test]
    fn new_requires_bot_token() {
        assert!(matches!(
            TelegramChannel::new(&config(None)),
            Err(LeadflowError::Config(_))
        ));
    }

    #[test]
    fn new_rejects_blank_token() {
        assert!(TelegramChannel::new(&config(Some(""))).is_err());
        assert!(TelegramChannel::new(&config(Some("   "))).is_err());
    }

    #[test]
    fn new_accepts_valid_token() {
        assert!(TelegramChannel::new(&config(Some("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11"))).is_ok());
    }

    #[test]
    fn plugin_adapter_metadata() {
        let channel = TelegramChannel::new(&config(Some("test:token"))).unwrap();
        assert_eq!(channel.name(), "telegram");
        assert_eq!(channel.version(), semver::Version::new(0, 1, 0));
    }

    #[tokio::test]
    async fn send_rejects_non_numeric_conversation() {
        let channel = TelegramChannel::new(&config(Some("test:token"))).unwrap();
        let msg = OutboundMessage::text("telegram".into(), "hello");
        assert!(matches!(
            channel.send(msg).await,
            Err(LeadflowError::Delivery { .. })
        ));
    }
}

// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event loop for the Leadflow bot.
//!
//! The [`EventLoop`] is the central coordinator that:
//! - Receives events from a channel adapter
//! - Hands each one to the [`Dispatcher`]
//! - Sends the replies back through the channel, in order
//! - Stops pending reminders on shutdown

pub mod shutdown;

use std::sync::Arc;

use leadflow_core::{ChannelAdapter, InboundEvent, LeadflowError};
use leadflow_crm::Dispatcher;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Couples one channel to one dispatcher.
pub struct EventLoop {
    channel: Arc<dyn ChannelAdapter>,
    dispatcher: Dispatcher,
}

impl EventLoop {
    pub fn new(channel: Arc<dyn ChannelAdapter>, dispatcher: Dispatcher) -> Self {
        info!(channel = channel.name(), "event loop initialized");
        Self {
            channel,
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Runs until the channel closes or `cancel` fires, then stops the
    /// reminder scheduler and the channel.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), LeadflowError> {
        info!("event loop running");

        loop {
            tokio::select! {
                event = self.channel.receive() => {
                    match event {
                        Ok(event) => self.handle_event(event).await,
                        Err(LeadflowError::ChannelClosed) => {
                            info!("channel closed, stopping event loop");
                            break;
                        }
                        Err(e) => {
                            error!(error = %e, "channel receive error");
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping event loop");
                    break;
                }
            }
        }

        self.dispatcher.scheduler().shutdown().await;

        if let Err(e) = self.channel.shutdown().await {
            warn!(error = %e, "channel shutdown failed");
        }

        info!("event loop stopped");
        Ok(())
    }

    /// Dispatches one event and delivers every reply. A failed send is
    /// logged and does not stop the remaining replies.
    pub async fn handle_event(&self, event: InboundEvent) {
        let conversation_id = event.conversation_id.clone();
        let replies = self.dispatcher.handle(event);
        debug!(
            conversation_id = %conversation_id,
            replies = replies.len(),
            "event dispatched"
        );

        for reply in replies {
            if let Err(e) = self.channel.send(reply).await {
                error!(
                    conversation_id = %conversation_id,
                    error = %e,
                    "failed to send reply"
                );
            }
        }
    }
}

// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for chat transports (Telegram, test doubles, ...).

use async_trait::async_trait;

use crate::error::LeadflowError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{InboundEvent, MessageId, OutboundMessage};

/// Adapter for a bidirectional chat transport.
///
/// `send` takes `&self` so one connected adapter can be shared between the
/// event loop and the reminder scheduler.
#[async_trait]
pub trait ChannelAdapter: PluginAdapter {
    /// Establishes a connection to the messaging platform.
    async fn connect(&mut self) -> Result<(), LeadflowError>;

    /// Sends a message through the channel.
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, LeadflowError>;

    /// Receives the next inbound event from the channel.
    ///
    /// Returns [`LeadflowError::ChannelClosed`] once no more events can arrive.
    async fn receive(&self) -> Result<InboundEvent, LeadflowError>;
}

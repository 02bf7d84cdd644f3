// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Leadflow lead tracker.

use thiserror::Error;

/// Errors crossing adapter boundaries.
///
/// Engine outcomes (unknown lead, wrong status, malformed payload) never get
/// here: the lead engine answers them with a reply to the user.
#[derive(Debug, Error)]
pub enum LeadflowError {
    /// Configuration errors (missing or blank bot token, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The inbound side of a channel has been closed and will yield no more events.
    #[error("channel closed")]
    ChannelClosed,

    /// The transport failed to deliver an outbound message.
    #[error("delivery failed: {message}")]
    Delivery {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

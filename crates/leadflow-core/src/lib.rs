// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Leadflow lead tracker.
//!
//! This crate provides the error taxonomy, the channel-agnostic inbound and
//! outbound event types, and the adapter traits that chat transports
//! implement. The lead engine only ever talks to a transport through
//! [`ChannelAdapter`].

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LeadflowError;
pub use types::{
    Button, ButtonSet, ConversationId, EventPayload, HealthStatus, InboundEvent, LeadId, Markup,
    MenuLayout, MessageId, OutboundMessage,
};

pub use traits::{ChannelAdapter, PluginAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_error_reports_its_message() {
        let err = LeadflowError::Delivery {
            message: "chat not found".into(),
            source: None,
        };
        assert_eq!(err.to_string(), "delivery failed: chat not found");
        assert_eq!(LeadflowError::ChannelClosed.to_string(), "channel closed");
    }

    #[test]
    fn health_status_variants() {
        let healthy = HealthStatus::Healthy;
        let unhealthy = HealthStatus::Unhealthy("down".into());

        assert_eq!(healthy, HealthStatus::Healthy);
        assert_ne!(unhealthy, healthy);
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_channel_adapter<T: ChannelAdapter>() {}
    }
}

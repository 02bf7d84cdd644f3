// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock channel adapter for deterministic testing.
//!
//! `MockChannel` implements `ChannelAdapter` with injectable inbound events
//! and captured outbound messages for assertion in tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use leadflow_core::traits::adapter::PluginAdapter;
use leadflow_core::traits::channel::ChannelAdapter;
use leadflow_core::types::{HealthStatus, InboundEvent, MessageId, OutboundMessage};
use leadflow_core::LeadflowError;

/// A mock chat channel for testing.
///
/// Provides two queues:
/// - **inbound**: Events injected via `inject()` are returned by `receive()`
/// - **sent**: Messages passed to `send()` are captured and retrievable via `sent_messages()`
///
/// `close()` makes `receive()` report [`LeadflowError::ChannelClosed`] once the
/// queue is drained, and `fail_sends(true)` makes `send()` fail and the health
/// check report unhealthy.
pub struct MockChannel {
    inbound: Arc<Mutex<VecDeque<InboundEvent>>>,
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    notify: Arc<Notify>,
    closed: AtomicBool,
    failing: AtomicBool,
}

impl MockChannel {
    /// Create a new mock channel with empty queues.
    pub fn new() -> Self {
        Self {
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
            notify: Arc::new(Notify::new()),
            closed: AtomicBool::new(false),
            failing: AtomicBool::new(false),
        }
    }

    /// Inject an inbound event into the receive queue.
    pub async fn inject(&self, event: InboundEvent) {
        self.inbound.lock().await.push_back(event);
        self.notify.notify_one();
    }

    /// Stop accepting events; `receive()` fails once the queue is empty.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    /// Make subsequent `send()` calls fail (or succeed again).
    pub fn fail_sends(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Get all messages that were sent through `send()`.
    pub async fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }

    /// Get the count of sent messages.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Clear all sent messages.
    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockChannel {
    fn name(&self) -> &str {
        "mock-channel"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, LeadflowError> {
        if self.failing.load(Ordering::SeqCst) {
            return Ok(HealthStatus::Unhealthy("sends are failing".into()));
        }
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LeadflowError> {
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for MockChannel {
    async fn connect(&mut self) -> Result<(), LeadflowError> {
        Ok(())
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, LeadflowError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(LeadflowError::Delivery {
                message: "mock channel is failing sends".into(),
                source: None,
            });
        }
        let id = format!("mock-msg-{}", uuid::Uuid::new_v4());
        self.sent.lock().await.push(msg);
        Ok(MessageId(id))
    }

    async fn receive(&self) -> Result<InboundEvent, LeadflowError> {
        loop {
            {
                let mut queue = self.inbound.lock().await;
                if let Some(event) = queue.pop_front() {
                    return Ok(event);
                }
                if self.closed.load(Ordering::SeqCst) {
                    return Err(LeadflowError::ChannelClosed);
                }
            }
            // Wait for notification that a new event was injected
            self.notify.notified().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadflow_core::EventPayload;

    #[tokio::test]
    async fn receive_returns_injected_events_in_order() {
        let channel = MockChannel::new();
        channel.inject(InboundEvent::text("1", "first")).await;
        channel.inject(InboundEvent::action("1", "contact:abc123")).await;

        let first = channel.receive().await.unwrap();
        let second = channel.receive().await.unwrap();
        assert_eq!(first.payload, EventPayload::Text("first".into()));
        assert_eq!(second.payload, EventPayload::Action("contact:abc123".into()));
    }

    #[tokio::test]
    async fn send_captures_outbound_messages() {
        let channel = MockChannel::new();
        let msg = OutboundMessage::text("42".into(), "hello");

        let id = channel.send(msg).await.unwrap();
        assert!(id.0.starts_with("mock-msg-"));

        let sent = channel.sent_messages().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].text, "hello");
        assert_eq!(sent[0].conversation_id.0, "42");
    }

    #[tokio::test]
    async fn failing_sends_capture_nothing() {
        let channel = MockChannel::new();
        channel.fail_sends(true);
        let err = channel
            .send(OutboundMessage::text("1".into(), "lost"))
            .await
            .unwrap_err();
        assert!(matches!(err, LeadflowError::Delivery { .. }));
        assert_eq!(channel.sent_count().await, 0);
    }

    #[tokio::test]
    async fn receive_waits_for_injection() {
        let channel = Arc::new(MockChannel::new());
        let channel_clone = channel.clone();

        tokio::spawn(async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
            channel_clone.inject(InboundEvent::text("1", "delayed")).await;
        });

        let received = tokio::time::timeout(tokio::time::Duration::from_secs(2), channel.receive())
            .await
            .expect("receive timed out")
            .unwrap();
        assert_eq!(received.payload, EventPayload::Text("delayed".into()));
    }

    #[tokio::test]
    async fn close_ends_receive_after_drain() {
        let channel = MockChannel::new();
        channel.inject(InboundEvent::text("1", "last")).await;
        channel.close();

        assert!(channel.receive().await.is_ok());
        assert!(matches!(
            channel.receive().await,
            Err(LeadflowError::ChannelClosed)
        ));
    }

    #[tokio::test]
    async fn sent_count_and_clear() {
        let channel = MockChannel::new();
        let msg = OutboundMessage::text("1".into(), "test");
        channel.send(msg.clone()).await.unwrap();
        channel.send(msg).await.unwrap();
        assert_eq!(channel.sent_count().await, 2);

        channel.clear_sent().await;
        assert_eq!(channel.sent_count().await, 0);
    }
}

// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the complete engine (store, reminder scheduler and
//! dispatcher) around a [`MockChannel`]. Replies come back from
//! `send_text()` / `click()`; reminders land in the mock channel.

use std::sync::Arc;
use std::time::Duration;

use leadflow_config::LeadflowConfig;
use leadflow_core::{ChannelAdapter, ConversationId, InboundEvent, LeadId, OutboundMessage};
use leadflow_crm::{Dispatcher, LeadRecord, LeadStore, ReminderScheduler};

use crate::mock_channel::MockChannel;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    config: LeadflowConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            config: LeadflowConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: LeadflowConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the delay between "contact" and the first reminder.
    pub fn with_contact_delay(mut self, delay: Duration) -> Self {
        self.config.reminder.default_delay_secs = delay.as_secs();
        self
    }

    /// Set the offsets offered by the reschedule menu.
    pub fn with_delay_options(mut self, hours: Vec<u32>) -> Self {
        self.config.reminder.delay_options_hours = hours;
        self
    }

    /// Build the harness. Reminders are spawned on the ambient tokio runtime.
    pub fn build(self) -> TestHarness {
        let channel = Arc::new(MockChannel::new());
        let store = Arc::new(LeadStore::new());
        let scheduler = ReminderScheduler::new(
            store.clone(),
            channel.clone() as Arc<dyn ChannelAdapter>,
        );
        let dispatcher = Dispatcher::new(&self.config, store.clone(), scheduler);

        TestHarness {
            dispatcher,
            store,
            channel,
            config: self.config,
        }
    }
}

/// A complete test environment.
pub struct TestHarness {
    /// The engine under test.
    pub dispatcher: Dispatcher,
    /// The store shared by the dispatcher and the scheduler.
    pub store: Arc<LeadStore>,
    /// Where reminders are delivered.
    pub channel: Arc<MockChannel>,
    /// The configuration the engine was built from.
    pub config: LeadflowConfig,
}

impl TestHarness {
    /// Create a new builder.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Send free text from `conversation` and return the replies.
    pub fn send_text(&self, conversation: &str, text: &str) -> Vec<OutboundMessage> {
        self.dispatcher.handle(InboundEvent::text(conversation, text))
    }

    /// Press a button with `payload` in `conversation` and return the replies.
    pub fn click(&self, conversation: &str, payload: &str) -> Vec<OutboundMessage> {
        self.dispatcher.handle(InboundEvent::action(conversation, payload))
    }

    /// Walk the full new-lead form and return the stored record.
    pub fn create_lead(&self, conversation: &str, name: &str, phone: &str, city: &str) -> LeadRecord {
        self.send_text(conversation, "/new");
        self.send_text(conversation, name);
        self.send_text(conversation, phone);
        self.send_text(conversation, city);

        let conv = ConversationId::from(conversation);
        assert!(
            !self.dispatcher.drafts().has_open_session(&conv),
            "lead form did not complete"
        );
        self.store
            .list_by_status(leadflow_crm::LeadStatus::New)
            .into_iter()
            .rev()
            .find(|lead| lead.name == name)
            .expect("created lead not found in store")
    }

    /// Current record for `id`.
    pub fn lead(&self, id: &LeadId) -> LeadRecord {
        self.store.get(id).expect("lead not found")
    }
}

// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deferred follow-up reminders.
//!
//! A reminder is a timer bound to a lead id and a conversation. It captures
//! no status: when it fires it re-reads the live record and only speaks up if
//! the lead is still `Waiting`. Timers are never cancelled individually.
//! Rescheduling adds a second timer, and every timer that still observes
//! `Waiting` delivers, so duplicates after a reschedule are expected.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use leadflow_core::{ChannelAdapter, ConversationId, LeadId, OutboundMessage};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use crate::lead::LeadStatus;
use crate::presenter;
use crate::store::LeadStore;

/// A scheduled check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderJob {
    pub lead_id: LeadId,
    pub conversation_id: ConversationId,
    pub delay: Duration,
    pub due_at: DateTime<Utc>,
}

/// What happened when a reminder fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderOutcome {
    /// The follow-up was handed to the channel.
    Delivered,
    /// The lead moved on; nothing was sent.
    Stale(LeadStatus),
    /// The lead no longer resolves; nothing was sent.
    Missing,
    /// The channel refused the message. Logged, not retried.
    DeliveryFailed,
}

/// Runs reminder timers on the tokio runtime.
///
/// Cloning is cheap and clones share the same timers.
#[derive(Clone)]
pub struct ReminderScheduler {
    store: Arc<LeadStore>,
    channel: Arc<dyn ChannelAdapter>,
    tracker: TaskTracker,
    cancel: CancellationToken,
}

impl ReminderScheduler {
    pub fn new(store: Arc<LeadStore>, channel: Arc<dyn ChannelAdapter>) -> Self {
        Self {
            store,
            channel,
            tracker: TaskTracker::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Starts a timer that fires after `delay`. Must be called within a tokio runtime.
    pub fn schedule(
        &self,
        lead_id: LeadId,
        conversation_id: ConversationId,
        delay: Duration,
    ) -> ReminderJob {
        let due_at = chrono::Duration::from_std(delay)
            .ok()
            .and_then(|d| Utc::now().checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let job = ReminderJob {
            lead_id,
            conversation_id,
            delay,
            due_at,
        };

        debug!(
            lead_id = %job.lead_id,
            conversation_id = %job.conversation_id,
            due_at = %job.due_at,
            "reminder scheduled"
        );

        let scheduler = self.clone();
        let timer = job.clone();
        self.tracker.spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(timer.delay) => {
                    scheduler.fire(&timer).await;
                }
                _ = scheduler.cancel.cancelled() => {
                    debug!(lead_id = %timer.lead_id, "reminder dropped on shutdown");
                }
            }
        });

        job
    }

    /// Checks the live record and sends the follow-up if it is still waiting.
    pub async fn fire(&self, job: &ReminderJob) -> ReminderOutcome {
        let lead = match self.store.get(&job.lead_id) {
            Ok(lead) => lead,
            Err(_) => {
                debug!(lead_id = %job.lead_id, "reminder for unknown lead suppressed");
                return ReminderOutcome::Missing;
            }
        };

        if lead.status != LeadStatus::Waiting {
            debug!(
                lead_id = %job.lead_id,
                status = %lead.status,
                "stale reminder suppressed"
            );
            return ReminderOutcome::Stale(lead.status);
        }

        let msg = OutboundMessage::text(job.conversation_id.clone(), presenter::reminder(&lead));
        match self.channel.send(msg).await {
            Ok(_) => {
                info!(
                    lead_id = %job.lead_id,
                    conversation_id = %job.conversation_id,
                    "reminder delivered"
                );
                ReminderOutcome::Delivered
            }
            Err(e) => {
                warn!(
                    lead_id = %job.lead_id,
                    conversation_id = %job.conversation_id,
                    error = %e,
                    "failed to deliver reminder"
                );
                ReminderOutcome::DeliveryFailed
            }
        }
    }

    /// Number of timers that have not finished yet.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Drops all pending timers and waits for in-flight deliveries.
    pub async fn shutdown(&self) {
        let pending = self.pending();
        self.cancel.cancel();
        self.tracker.close();
        self.tracker.wait().await;
        info!(dropped = pending, "reminder scheduler stopped");
    }
}

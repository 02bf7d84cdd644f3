// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-conversation input sessions for creating a lead step by step.
//!
//! A session walks `AwaitingName -> AwaitingPhone -> AwaitingCity` and, on
//! the last answer, commits the draft to the [`LeadStore`] in one go. While a
//! session is open, every free-text message of that conversation belongs to
//! it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use leadflow_core::ConversationId;
use tracing::{debug, info, warn};

use crate::lead::LeadRecord;
use crate::store::LeadStore;

/// The field a session is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStep {
    AwaitingName,
    AwaitingPhone,
    AwaitingCity,
}

#[derive(Debug, Default)]
struct Draft {
    name: Option<String>,
    phone: Option<String>,
}

#[derive(Debug)]
struct InputSession {
    step: DraftStep,
    draft: Draft,
    started_at: DateTime<Utc>,
}

impl InputSession {
    fn new() -> Self {
        Self {
            step: DraftStep::AwaitingName,
            draft: Draft::default(),
            started_at: Utc::now(),
        }
    }
}

/// Why a session was thrown away instead of advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// No session was open for the conversation (it was completed or
    /// replaced concurrently).
    NoSession,
    /// The session reached its last step with earlier fields missing.
    IncompleteDraft,
}

/// Result of feeding one text message to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftOutcome {
    /// The session now waits for this field.
    NeedMore(DraftStep),
    /// The draft was committed as a new lead; the session is gone.
    Completed(LeadRecord),
    /// The session was discarded; the conversation has no open session.
    Reset(ResetReason),
}

/// Owns the open input sessions, at most one per conversation.
pub struct DraftManager {
    sessions: DashMap<ConversationId, InputSession>,
    store: Arc<LeadStore>,
}

impl DraftManager {
    pub fn new(store: Arc<LeadStore>) -> Self {
        Self {
            sessions: DashMap::new(),
            store,
        }
    }

    /// Opens a fresh session, silently discarding any unfinished one.
    ///
    /// Returns `true` if an earlier draft was discarded.
    pub fn begin(&self, conversation: &ConversationId) -> bool {
        let replaced = self
            .sessions
            .insert(conversation.clone(), InputSession::new());
        if let Some(old) = &replaced {
            debug!(
                conversation_id = %conversation,
                started_at = %old.started_at,
                "discarding unfinished lead draft"
            );
        }
        replaced.is_some()
    }

    pub fn has_open_session(&self, conversation: &ConversationId) -> bool {
        self.sessions.contains_key(conversation)
    }

    /// The step an open session is waiting for.
    pub fn current_step(&self, conversation: &ConversationId) -> Option<DraftStep> {
        self.sessions.get(conversation).map(|s| s.step)
    }

    /// Number of conversations with an open session.
    pub fn open_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Feeds one text message to the conversation's session.
    ///
    /// Blank input re-asks for the current field. The final answer removes
    /// the session from the map before committing, so a draft is committed
    /// at most once even if two messages race.
    pub fn advance(&self, conversation: &ConversationId, text: &str) -> DraftOutcome {
        let Entry::Occupied(mut entry) = self.sessions.entry(conversation.clone()) else {
            return DraftOutcome::Reset(ResetReason::NoSession);
        };

        let text = text.trim();
        if text.is_empty() {
            return DraftOutcome::NeedMore(entry.get().step);
        }

        let step = entry.get().step;
        match step {
            DraftStep::AwaitingName => {
                let session = entry.get_mut();
                session.draft.name = Some(text.to_string());
                session.step = DraftStep::AwaitingPhone;
                DraftOutcome::NeedMore(DraftStep::AwaitingPhone)
            }
            DraftStep::AwaitingPhone => {
                let session = entry.get_mut();
                session.draft.phone = Some(text.to_string());
                session.step = DraftStep::AwaitingCity;
                DraftOutcome::NeedMore(DraftStep::AwaitingCity)
            }
            DraftStep::AwaitingCity => {
                let Draft { name, phone } = entry.remove().draft;
                match (name, phone) {
                    (Some(name), Some(phone)) => {
                        let record = self.store.create(name, phone, text.to_string());
                        info!(
                            conversation_id = %conversation,
                            lead_id = %record.id,
                            "lead draft committed"
                        );
                        DraftOutcome::Completed(record)
                    }
                    _ => {
                        warn!(
                            conversation_id = %conversation,
                            "lead draft reached the last step incomplete, discarding"
                        );
                        DraftOutcome::Reset(ResetReason::IncompleteDraft)
                    }
                }
            }
        }
    }
}

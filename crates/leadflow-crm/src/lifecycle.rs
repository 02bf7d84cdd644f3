// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The lead lifecycle state machine.
//!
//! | From    | Action              | To        | Follow-up                |
//! |---------|---------------------|-----------|--------------------------|
//! | New     | Contact             | Waiting   | reminder after default   |
//! | Waiting | Complete            | Completed |                          |
//! | Waiting | Delete              | Deleted   |                          |
//! | Waiting | Reschedule(hours)   | Waiting   | reminder after `hours`   |
//! | Deleted | Restore             | New       |                          |
//!
//! Anything else is rejected with [`CrmError::InvalidState`] and leaves the
//! record untouched. Follow-ups are returned, not executed: the caller owns
//! the reminder scheduler.

use std::sync::Arc;
use std::time::Duration;

use leadflow_core::LeadId;
use tracing::{info, warn};

use crate::error::CrmError;
use crate::lead::{LeadRecord, LeadStatus};
use crate::store::LeadStore;

/// A status-changing action on one lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadAction {
    Contact,
    Complete,
    Delete,
    Restore,
    Reschedule { hours: u32 },
}

impl LeadAction {
    /// The only status this action may be applied to.
    pub fn source(&self) -> LeadStatus {
        match self {
            LeadAction::Contact => LeadStatus::New,
            LeadAction::Complete | LeadAction::Delete | LeadAction::Reschedule { .. } => {
                LeadStatus::Waiting
            }
            LeadAction::Restore => LeadStatus::Deleted,
        }
    }

    /// The status the lead ends up in.
    pub fn target(&self) -> LeadStatus {
        match self {
            LeadAction::Contact | LeadAction::Reschedule { .. } => LeadStatus::Waiting,
            LeadAction::Complete => LeadStatus::Completed,
            LeadAction::Delete => LeadStatus::Deleted,
            LeadAction::Restore => LeadStatus::New,
        }
    }

    /// Wire name used in action payloads and logs.
    pub fn name(&self) -> &'static str {
        match self {
            LeadAction::Contact => "contact",
            LeadAction::Complete => "done",
            LeadAction::Delete => "delete",
            LeadAction::Restore => "restore",
            LeadAction::Reschedule { .. } => "delay",
        }
    }
}

/// A successfully applied action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub action: LeadAction,
    pub from: LeadStatus,
    /// The record as it is right after the change.
    pub lead: LeadRecord,
    /// Delay of the reminder to schedule, if the action asks for one.
    pub reminder: Option<Duration>,
}

/// Applies [`LeadAction`]s to records in a [`LeadStore`].
pub struct Lifecycle {
    store: Arc<LeadStore>,
    contact_delay: Duration,
}

impl Lifecycle {
    /// `contact_delay` is the reminder delay that follows a `Contact`.
    pub fn new(store: Arc<LeadStore>, contact_delay: Duration) -> Self {
        Self {
            store,
            contact_delay,
        }
    }

    pub fn apply(&self, id: &LeadId, action: LeadAction) -> Result<Transition, CrmError> {
        let from = action.source();
        let lead = self
            .store
            .compare_and_set_status(id, from, action.target(), action.name())
            .inspect_err(|err| {
                if let CrmError::InvalidState { status, .. } = err {
                    warn!(
                        lead_id = %id,
                        status = %status,
                        action = action.name(),
                        "rejected action for lead in unexpected status"
                    );
                }
            })?;

        let reminder = match action {
            LeadAction::Contact => Some(self.contact_delay),
            LeadAction::Reschedule { hours } => Some(Duration::from_secs(u64::from(hours) * 3600)),
            LeadAction::Complete | LeadAction::Delete | LeadAction::Restore => None,
        };

        info!(
            lead_id = %id,
            action = action.name(),
            from = %from,
            to = %lead.status,
            "lead status changed"
        );

        Ok(Transition {
            action,
            from,
            lead,
            reminder,
        })
    }

    /// Returns the live record if it is in `status`.
    ///
    /// Used for requests that only read a lead but are only offered in one
    /// status, such as opening the reschedule menu.
    pub fn require(
        &self,
        id: &LeadId,
        status: LeadStatus,
        action: &'static str,
    ) -> Result<LeadRecord, CrmError> {
        let lead = self.store.get(id)?;
        if lead.status != status {
            return Err(CrmError::InvalidState {
                lead_id: id.clone(),
                status: lead.status,
                action,
            });
        }
        Ok(lead)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    use super::*;

    const ALL_ACTIONS: [LeadAction; 5] = [
        LeadAction::Contact,
        LeadAction::Complete,
        LeadAction::Delete,
        LeadAction::Restore,
        LeadAction::Reschedule { hours: 2 },
    ];

    fn setup() -> (Arc<LeadStore>, Lifecycle) {
        let store = Arc::new(LeadStore::new());
        let lifecycle = Lifecycle::new(store.clone(), Duration::from_secs(3600));
        (store, lifecycle)
    }

    fn seed_in(store: &LeadStore, status: LeadStatus) -> LeadId {
        let id = store
            .create("Client".into(), "555".into(), "Town".into())
            .id;
        store.set_status(&id, status).unwrap();
        id
    }

    #[test]
    fn every_table_row_reaches_its_target_and_nothing_else_moves() {
        for action in ALL_ACTIONS {
            let (store, lifecycle) = setup();
            let bystander = seed_in(&store, action.source());
            let id = seed_in(&store, action.source());

            let transition = lifecycle.apply(&id, action).unwrap();
            assert_eq!(transition.from, action.source());
            assert_eq!(transition.lead.status, action.target());
            assert_eq!(store.get(&id).unwrap().status, action.target());
            assert_eq!(store.get(&bystander).unwrap().status, action.source());
        }
    }

    #[test]
    fn contact_schedules_default_reminder() {
        let (store, lifecycle) = setup();
        let id = seed_in(&store, LeadStatus::New);
        let transition = lifecycle.apply(&id, LeadAction::Contact).unwrap();
        assert_eq!(transition.reminder, Some(Duration::from_secs(3600)));
    }

    #[test]
    fn reschedule_keeps_waiting_and_schedules_requested_delay() {
        let (store, lifecycle) = setup();
        let id = seed_in(&store, LeadStatus::Waiting);
        let transition = lifecycle
            .apply(&id, LeadAction::Reschedule { hours: 48 })
            .unwrap();
        assert_eq!(transition.lead.status, LeadStatus::Waiting);
        assert_eq!(transition.reminder, Some(Duration::from_secs(48 * 3600)));
    }

    #[test]
    fn terminal_transitions_schedule_nothing() {
        for action in [LeadAction::Complete, LeadAction::Delete, LeadAction::Restore] {
            let (store, lifecycle) = setup();
            let id = seed_in(&store, action.source());
            assert_eq!(lifecycle.apply(&id, action).unwrap().reminder, None);
        }
    }

    #[test]
    fn mismatched_pairs_are_rejected_without_mutation() {
        for action in ALL_ACTIONS {
            for status in LeadStatus::iter().filter(|s| *s != action.source()) {
                let (store, lifecycle) = setup();
                let id = seed_in(&store, status);
                let err = lifecycle.apply(&id, action).unwrap_err();
                assert!(matches!(err, CrmError::InvalidState { status: s, .. } if s == status));
                assert_eq!(store.get(&id).unwrap().status, status);
            }
        }
    }

    #[test]
    fn unknown_id_is_not_found() {
        let (store, lifecycle) = setup();
        let known = seed_in(&store, LeadStatus::New);
        let err = lifecycle
            .apply(&LeadId("nope00".into()), LeadAction::Contact)
            .unwrap_err();
        assert_eq!(err, CrmError::NotFound(LeadId("nope00".into())));
        assert_eq!(store.get(&known).unwrap().status, LeadStatus::New);
    }

    #[test]
    fn require_checks_status() {
        let (store, lifecycle) = setup();
        let id = seed_in(&store, LeadStatus::New);
        assert!(lifecycle.require(&id, LeadStatus::New, "remind_menu").is_ok());
        assert!(matches!(
            lifecycle.require(&id, LeadStatus::Waiting, "remind_menu"),
            Err(CrmError::InvalidState { .. })
        ));
    }

    fn arb_action() -> impl Strategy<Value = LeadAction> {
        prop_oneof![
            Just(LeadAction::Contact),
            Just(LeadAction::Complete),
            Just(LeadAction::Delete),
            Just(LeadAction::Restore),
            (1u32..=72).prop_map(|hours| LeadAction::Reschedule { hours }),
        ]
    }

    proptest! {
        #[test]
        fn arbitrary_sequences_follow_the_table(
            steps in prop::collection::vec((0usize..3, arb_action()), 0..40)
        ) {
            let (store, lifecycle) = setup();
            let ids: Vec<LeadId> = (0..3).map(|_| seed_in(&store, LeadStatus::New)).collect();

            for (target, action) in steps {
                let before: Vec<LeadStatus> =
                    ids.iter().map(|id| store.get(id).unwrap().status).collect();
                let result = lifecycle.apply(&ids[target], action);
                let after: Vec<LeadStatus> =
                    ids.iter().map(|id| store.get(id).unwrap().status).collect();

                if before[target] == action.source() {
                    prop_assert!(result.is_ok());
                    prop_assert_eq!(after[target], action.target());
                } else {
                    prop_assert!(result.is_err());
                    prop_assert_eq!(after[target], before[target]);
                }
                for (i, (b, a)) in before.iter().zip(&after).enumerate() {
                    if i != target {
                        prop_assert_eq!(b, a);
                    }
                }
            }
        }
    }
}

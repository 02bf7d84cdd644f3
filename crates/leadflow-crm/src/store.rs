// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory record store.
//!
//! Records are kept in insertion order and are never removed: `Deleted` is a
//! status, not an erase. Memory therefore grows with every committed lead for
//! the lifetime of the process.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use leadflow_core::LeadId;
use tracing::debug;

use crate::error::CrmError;
use crate::lead::{LeadRecord, LeadStatus};

/// Length of generated lead identifiers (hex characters).
const LEAD_ID_LEN: usize = 6;

#[derive(Debug, Default)]
struct Ledger {
    records: Vec<LeadRecord>,
    index: HashMap<LeadId, usize>,
}

impl Ledger {
    fn get_mut(&mut self, id: &LeadId) -> Option<&mut LeadRecord> {
        let pos = *self.index.get(id)?;
        self.records.get_mut(pos)
    }

    fn fresh_id(&self) -> LeadId {
        loop {
            let uuid = uuid::Uuid::new_v4().simple().to_string();
            let id = LeadId(uuid[..LEAD_ID_LEN].to_string());
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }
}

/// Process-wide collection of lead records.
///
/// Every read and write goes through one lock, so a status is never read
/// while it is being overwritten. Readers get cloned snapshots.
#[derive(Debug, Default)]
pub struct LeadStore {
    inner: RwLock<Ledger>,
}

impl LeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-applied record:
    // every mutation is a single field swap, so the poisoned value is usable.
    fn read(&self) -> RwLockReadGuard<'_, Ledger> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Commits a new lead with status `New` and returns it.
    pub fn create(&self, name: String, phone: String, city: String) -> LeadRecord {
        let mut ledger = self.write();
        let id = ledger.fresh_id();
        let record = LeadRecord::new(id.clone(), name, phone, city);
        let pos = ledger.records.len();
        ledger.records.push(record.clone());
        ledger.index.insert(id, pos);
        debug!(lead_id = %record.id, "lead record created");
        record
    }

    /// Looks up the live record.
    pub fn get(&self, id: &LeadId) -> Result<LeadRecord, CrmError> {
        let ledger = self.read();
        ledger
            .index
            .get(id)
            .and_then(|&pos| ledger.records.get(pos))
            .cloned()
            .ok_or_else(|| CrmError::NotFound(id.clone()))
    }

    /// All records in `status`, in insertion order.
    ///
    /// The result is a snapshot: later mutations do not show up in it.
    pub fn list_by_status(&self, status: LeadStatus) -> Vec<LeadRecord> {
        self.read()
            .records
            .iter()
            .filter(|r| r.status == status)
            .cloned()
            .collect()
    }

    /// Overwrites the status unconditionally and returns the previous one.
    pub fn set_status(&self, id: &LeadId, status: LeadStatus) -> Result<LeadStatus, CrmError> {
        let mut ledger = self.write();
        let record = ledger
            .get_mut(id)
            .ok_or_else(|| CrmError::NotFound(id.clone()))?;
        let previous = std::mem::replace(&mut record.status, status);
        record.updated_at = Utc::now();
        Ok(previous)
    }

    /// Moves a record from `from` to `to` only if it is currently in `from`.
    ///
    /// The check and the write happen under the same lock, so two racing
    /// actions on one record cannot both succeed. On mismatch nothing is
    /// changed and the observed status is reported.
    pub fn compare_and_set_status(
        &self,
        id: &LeadId,
        from: LeadStatus,
        to: LeadStatus,
        action: &'static str,
    ) -> Result<LeadRecord, CrmError> {
        let mut ledger = self.write();
        let record = ledger
            .get_mut(id)
            .ok_or_else(|| CrmError::NotFound(id.clone()))?;
        if record.status != from {
            return Err(CrmError::InvalidState {
                lead_id: id.clone(),
                status: record.status,
                action,
            });
        }
        record.status = to;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    /// Number of records ever committed.
    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn seed(store: &LeadStore, name: &str) -> LeadRecord {
        store.create(name.into(), "+1 555 0100".into(), "Austin".into())
    }

    #[test]
    fn create_assigns_short_unique_ids() {
        let store = LeadStore::new();
        let a = seed(&store, "Ann");
        let b = seed(&store, "Bob");
        assert_eq!(a.id.as_str().len(), LEAD_ID_LEN);
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let store = LeadStore::new();
        let err = store.get(&LeadId("ffffff".into())).unwrap_err();
        assert_eq!(err, CrmError::NotFound(LeadId("ffffff".into())));
    }

    #[test]
    fn list_by_status_keeps_insertion_order() {
        let store = LeadStore::new();
        let a = seed(&store, "Ann");
        let b = seed(&store, "Bob");
        let c = seed(&store, "Cid");
        store.set_status(&b.id, LeadStatus::Waiting).unwrap();

        let new: Vec<LeadId> = store
            .list_by_status(LeadStatus::New)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(new, vec![a.id, c.id]);
        assert_eq!(store.list_by_status(LeadStatus::Waiting)[0].id, b.id);
    }

    #[test]
    fn listing_is_a_snapshot() {
        let store = LeadStore::new();
        let a = seed(&store, "Ann");
        let snapshot = store.list_by_status(LeadStatus::New);
        store.set_status(&a.id, LeadStatus::Deleted).unwrap();
        assert_eq!(snapshot[0].status, LeadStatus::New);
        assert!(store.list_by_status(LeadStatus::New).is_empty());
    }

    #[test]
    fn set_status_reports_previous_and_touches_updated_at() {
        let store = LeadStore::new();
        let a = seed(&store, "Ann");
        let previous = store.set_status(&a.id, LeadStatus::Waiting).unwrap();
        assert_eq!(previous, LeadStatus::New);
        let live = store.get(&a.id).unwrap();
        assert_eq!(live.status, LeadStatus::Waiting);
        assert!(live.updated_at >= a.updated_at);
    }

    #[test]
    fn set_status_unknown_id_is_not_found() {
        let store = LeadStore::new();
        assert!(matches!(
            store.set_status(&LeadId("000000".into()), LeadStatus::Deleted),
            Err(CrmError::NotFound(_))
        ));
    }

    #[test]
    fn compare_and_set_rejects_mismatch_without_mutation() {
        let store = LeadStore::new();
        let a = seed(&store, "Ann");
        let err = store
            .compare_and_set_status(&a.id, LeadStatus::Waiting, LeadStatus::Completed, "done")
            .unwrap_err();
        assert_eq!(
            err,
            CrmError::InvalidState {
                lead_id: a.id.clone(),
                status: LeadStatus::New,
                action: "done",
            }
        );
        assert_eq!(store.get(&a.id).unwrap().status, LeadStatus::New);
    }

    #[test]
    fn racing_transitions_succeed_exactly_once() {
        let store = Arc::new(LeadStore::new());
        let a = seed(&store, "Ann");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let id = a.id.clone();
                std::thread::spawn(move || {
                    store
                        .compare_and_set_status(&id, LeadStatus::New, LeadStatus::Waiting, "contact")
                        .is_ok()
                })
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1);
    }
}

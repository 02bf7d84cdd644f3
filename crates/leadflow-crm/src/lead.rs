// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead records and their lifecycle status.

use chrono::{DateTime, Utc};
use leadflow_core::LeadId;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Where a lead currently sits in its lifecycle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum LeadStatus {
    /// Captured, nobody has reached out yet.
    New,
    /// Contacted, waiting for the client to answer.
    Waiting,
    /// Done.
    Completed,
    /// Soft-deleted; can be restored to `New`.
    Deleted,
}

/// A tracked customer inquiry.
///
/// Contact fields are only ever set together, when a draft is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: LeadId,
    pub name: String,
    pub phone: String,
    pub city: String,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeadRecord {
    pub(crate) fn new(id: LeadId, name: String, phone: String, city: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            phone,
            city,
            status: LeadStatus::New,
            created_at: now,
            updated_at: now,
        }
    }
}

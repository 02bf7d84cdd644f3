// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead tracking engine for Leadflow.
//!
//! - [`LeadStore`] keeps lead records in memory, in insertion order.
//! - [`DraftManager`] collects name, phone and city over several messages.
//! - [`Lifecycle`] applies status transitions
//!   (New -> Waiting -> Completed, with a restorable Deleted state).
//! - [`ReminderScheduler`] fires follow-ups that re-check the live status.
//! - [`Dispatcher`] routes inbound events to all of the above.

pub mod action;
pub mod command;
pub mod dispatcher;
pub mod draft;
pub mod error;
pub mod keyboard;
pub mod lead;
pub mod lifecycle;
pub mod presenter;
pub mod reminder;
pub mod store;

pub use action::ActionRequest;
pub use dispatcher::Dispatcher;
pub use draft::{DraftManager, DraftOutcome, DraftStep, ResetReason};
pub use error::CrmError;
pub use lead::{LeadRecord, LeadStatus};
pub use lifecycle::{LeadAction, Lifecycle, Transition};
pub use reminder::{ReminderJob, ReminderOutcome, ReminderScheduler};
pub use store::LeadStore;

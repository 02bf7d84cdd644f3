// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors raised by the lead engine.

use leadflow_core::LeadId;
use thiserror::Error;

use crate::lead::LeadStatus;

/// Why an engine operation left state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrmError {
    /// The referenced lead does not exist.
    #[error("lead not found: {0}")]
    NotFound(LeadId),

    /// The lead is not in the status the action starts from.
    #[error("`{action}` does not apply to lead {lead_id} in status {status}")]
    InvalidState {
        lead_id: LeadId,
        status: LeadStatus,
        action: &'static str,
    },

    /// The action payload could not be parsed.
    #[error("malformed action payload `{0}`")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_message_names_action_and_status() {
        let err = CrmError::InvalidState {
            lead_id: LeadId("abc123".into()),
            status: LeadStatus::Completed,
            action: "contact",
        };
        assert_eq!(
            err.to_string(),
            "`contact` does not apply to lead abc123 in status Completed"
        );
    }
}

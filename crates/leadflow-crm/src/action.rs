// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Button payload codec: `action:leadId[:hours]`.

use std::fmt;
use std::str::FromStr;

use leadflow_core::LeadId;

use crate::error::CrmError;
use crate::lifecycle::LeadAction;

const CONTACT: &str = "contact";
const DONE: &str = "done";
const DELETE: &str = "delete";
const RESTORE: &str = "restore";
const REMIND_MENU: &str = "remind_menu";
const DELAY: &str = "delay";

/// A decoded button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    /// Apply a lifecycle action to a lead.
    Transition { lead_id: LeadId, action: LeadAction },
    /// Show the reschedule options for a waiting lead.
    RescheduleMenu { lead_id: LeadId },
}

impl ActionRequest {
    pub fn lead_id(&self) -> &LeadId {
        match self {
            ActionRequest::Transition { lead_id, .. } | ActionRequest::RescheduleMenu { lead_id } => {
                lead_id
            }
        }
    }

    /// The payload string a button carries to trigger this request.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ActionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionRequest::Transition {
                lead_id,
                action: LeadAction::Reschedule { hours },
            } => write!(f, "{DELAY}:{lead_id}:{hours}"),
            ActionRequest::Transition { lead_id, action } => {
                write!(f, "{}:{lead_id}", action.name())
            }
            ActionRequest::RescheduleMenu { lead_id } => write!(f, "{REMIND_MENU}:{lead_id}"),
        }
    }
}

impl FromStr for ActionRequest {
    type Err = CrmError;

    fn from_str(payload: &str) -> Result<Self, Self::Err> {
        let malformed = || CrmError::Malformed(payload.to_string());
        let mut parts = payload.split(':');

        let verb = parts.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;
        let lead_id = parts
            .next()
            .filter(|s| !s.is_empty())
            .map(LeadId::from)
            .ok_or_else(malformed)?;
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(malformed());
        }

        let transition = |action| ActionRequest::Transition {
            lead_id: lead_id.clone(),
            action,
        };

        let request = match (verb, arg) {
            (CONTACT, None) => transition(LeadAction::Contact),
            (DONE, None) => transition(LeadAction::Complete),
            (DELETE, None) => transition(LeadAction::Delete),
            (RESTORE, None) => transition(LeadAction::Restore),
            (REMIND_MENU, None) => ActionRequest::RescheduleMenu {
                lead_id: lead_id.clone(),
            },
            (DELAY, Some(hours)) => {
                let hours: u32 = hours.parse().map_err(|_| malformed())?;
                if hours == 0 {
                    return Err(malformed());
                }
                transition(LeadAction::Reschedule { hours })
            }
            _ => return Err(malformed()),
        };

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<ActionRequest, CrmError> {
        s.parse()
    }

    #[test]
    fn parses_every_verb() {
        let id = LeadId("a1b2c3".into());
        let cases = [
            ("contact:a1b2c3", LeadAction::Contact),
            ("done:a1b2c3", LeadAction::Complete),
            ("delete:a1b2c3", LeadAction::Delete),
            ("restore:a1b2c3", LeadAction::Restore),
            ("delay:a1b2c3:24", LeadAction::Reschedule { hours: 24 }),
        ];
        for (payload, action) in cases {
            assert_eq!(
                parse(payload).unwrap(),
                ActionRequest::Transition {
                    lead_id: id.clone(),
                    action
                },
                "{payload}"
            );
        }
        assert_eq!(
            parse("remind_menu:a1b2c3").unwrap(),
            ActionRequest::RescheduleMenu { lead_id: id }
        );
    }

    #[test]
    fn encode_matches_wire_format() {
        let id = LeadId("a1b2c3".into());
        let delay = ActionRequest::Transition {
            lead_id: id.clone(),
            action: LeadAction::Reschedule { hours: 8 },
        };
        assert_eq!(delay.encode(), "delay:a1b2c3:8");
        let done = ActionRequest::Transition {
            lead_id: id.clone(),
            action: LeadAction::Complete,
        };
        assert_eq!(done.encode(), "done:a1b2c3");
        assert_eq!(
            ActionRequest::RescheduleMenu { lead_id: id }.encode(),
            "remind_menu:a1b2c3"
        );
    }

    #[test]
    fn rejects_malformed_payloads() {
        for payload in [
            "",
            "contact",
            "contact:",
            ":a1b2c3",
            "delay:a1b2c3",
            "delay:a1b2c3:",
            "delay:a1b2c3:soon",
            "delay:a1b2c3:-2",
            "delay:a1b2c3:0",
            "contact:a1b2c3:5",
            "delay:a1b2c3:1:2",
            "launch:a1b2c3",
        ] {
            assert_eq!(
                parse(payload),
                Err(CrmError::Malformed(payload.to_string())),
                "{payload:?} should be malformed"
            );
        }
    }
}

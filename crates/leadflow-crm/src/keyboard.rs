// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Which buttons a lead offers in each status, and the command menu.

use leadflow_core::{Button, ButtonSet, LeadId, MenuLayout};

use crate::action::ActionRequest;
use crate::command::{MENU_COMPLETED, MENU_DELETED, MENU_NEW_LEAD, MENU_UPCOMING, MENU_WAITING};
use crate::lead::{LeadRecord, LeadStatus};
use crate::lifecycle::LeadAction;

fn transition_button(label: &str, lead_id: &LeadId, action: LeadAction) -> Button {
    let request = ActionRequest::Transition {
        lead_id: lead_id.clone(),
        action,
    };
    Button::new(label, request.encode())
}

/// Action buttons for a lead card. Completed leads offer none.
pub fn lead_actions(lead: &LeadRecord) -> ButtonSet {
    let id = &lead.id;
    let rows = match lead.status {
        LeadStatus::New => vec![vec![transition_button(
            "🚀 Contact client",
            id,
            LeadAction::Contact,
        )]],
        LeadStatus::Waiting => vec![
            vec![
                transition_button("✅ Complete", id, LeadAction::Complete),
                Button::new(
                    "⏰ Reschedule reminder",
                    ActionRequest::RescheduleMenu { lead_id: id.clone() }.encode(),
                ),
            ],
            vec![transition_button("❌ Delete (declined)", id, LeadAction::Delete)],
        ],
        LeadStatus::Deleted => vec![vec![transition_button(
            "♻️ Restore",
            id,
            LeadAction::Restore,
        )]],
        LeadStatus::Completed => Vec::new(),
    };
    ButtonSet { rows }
}

/// The reschedule menu: one button per configured offset.
pub fn reschedule_menu(lead_id: &LeadId, options_hours: &[u32], per_row: usize) -> ButtonSet {
    let rows = options_hours
        .chunks(per_row.max(1))
        .map(|chunk| {
            chunk
                .iter()
                .map(|&hours| {
                    transition_button(
                        &delay_label(hours),
                        lead_id,
                        LeadAction::Reschedule { hours },
                    )
                })
                .collect()
        })
        .collect();
    ButtonSet { rows }
}

fn delay_label(hours: u32) -> String {
    if hours >= 48 && hours % 24 == 0 {
        format!("{} days", hours / 24)
    } else {
        format!("{hours}h")
    }
}

/// The persistent command menu.
pub fn main_menu() -> MenuLayout {
    MenuLayout {
        rows: vec![
            vec![MENU_NEW_LEAD.to_string()],
            vec![MENU_UPCOMING.to_string(), MENU_WAITING.to_string()],
            vec![MENU_COMPLETED.to_string(), MENU_DELETED.to_string()],
        ],
    }
}

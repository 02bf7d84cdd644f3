// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing message texts.

use std::time::Duration;

use crate::draft::DraftStep;
use crate::lead::{LeadRecord, LeadStatus};
use crate::lifecycle::{LeadAction, Transition};

pub fn welcome(bot_name: &str) -> String {
    format!(
        "Welcome to {bot_name}, your real-estate lead tracker.\n\
         Choose an action from the menu below:"
    )
}

pub fn help() -> String {
    "📝 New lead: capture name, phone and city step by step.\n\
     📂 Upcoming: leads nobody has contacted yet.\n\
     ⏳ Waiting: contacted, waiting for the client's answer.\n\
     ✅ Completed / 🗑 Deleted: closed leads (deleted ones can be restored)."
        .to_string()
}

pub fn unrecognized_command() -> String {
    "Sorry, I did not understand that.\nPlease use the menu buttons at the bottom of the screen."
        .to_string()
}

pub fn unrecognized_action() -> String {
    "This button is no longer valid.".to_string()
}

pub fn prompt(step: DraftStep) -> String {
    match step {
        DraftStep::AwaitingName => "Enter the client's full name:",
        DraftStep::AwaitingPhone => "Enter the client's phone number:",
        DraftStep::AwaitingCity => "Enter the city where the client wants to buy property:",
    }
    .to_string()
}

pub fn draft_saved() -> String {
    "✅ Lead saved and added to «Upcoming».\nChoose the next action:".to_string()
}

pub fn draft_reset() -> String {
    "Something went wrong with the form. Please create the lead again.".to_string()
}

pub fn status_label(status: LeadStatus) -> &'static str {
    match status {
        LeadStatus::New => "To contact",
        LeadStatus::Waiting => "Awaiting client reply",
        LeadStatus::Completed => "Done",
        LeadStatus::Deleted => "Deleted",
    }
}

pub fn list_header(status: LeadStatus) -> &'static str {
    match status {
        LeadStatus::New => "Upcoming leads:",
        LeadStatus::Waiting => "Clients we are waiting on:",
        LeadStatus::Completed => "Completed leads:",
        LeadStatus::Deleted => "Deleted leads (can be restored):",
    }
}

pub fn empty_list(status: LeadStatus) -> String {
    format!("{}\n\nThe list is empty.", list_header(status))
}

pub fn lead_card(lead: &LeadRecord) -> String {
    format!(
        "🆔 ID: {}\n👤 Name: {}\n📞 Phone: {}\n📍 City: {}\n📌 Status: {}",
        lead.id,
        lead.name,
        lead.phone,
        lead.city,
        status_label(lead.status)
    )
}

pub fn transition_done(transition: &Transition) -> String {
    match transition.action {
        LeadAction::Contact => {
            let delay = transition.reminder.map(format_delay).unwrap_or_default();
            format!("Status changed to «Contacted, awaiting reply».\nReminder in {delay}.")
        }
        LeadAction::Complete => "Lead marked as completed ✅.".to_string(),
        LeadAction::Delete => "Lead moved to deleted.".to_string(),
        LeadAction::Restore => "Lead restored and back in «Upcoming».".to_string(),
        LeadAction::Reschedule { hours } => format!("⏳ Reminder moved to {hours} h."),
    }
}

pub fn reschedule_prompt() -> String {
    "When should I remind you again?".to_string()
}

pub fn not_found() -> String {
    "Lead not found. It may have been changed.".to_string()
}

pub fn invalid_state(lead: Option<&LeadRecord>) -> String {
    match lead {
        Some(lead) => format!(
            "This lead has already been updated (now: {}).",
            status_label(lead.status)
        ),
        None => "This lead has already been updated.".to_string(),
    }
}

pub fn reminder(lead: &LeadRecord) -> String {
    format!(
        "🔔 REMINDER:\nCall the client back: {} ({}), city {}.",
        lead.name, lead.phone, lead.city
    )
}

/// Human-readable delay, in the largest whole unit.
pub fn format_delay(delay: Duration) -> String {
    let secs = delay.as_secs();
    if secs >= 3600 && secs % 3600 == 0 {
        format!("{} h", secs / 3600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{} min", secs / 60)
    } else {
        format!("{secs} s")
    }
}

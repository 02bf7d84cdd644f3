// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Top-level free-text commands, understood when no draft is open.

use crate::lead::LeadStatus;

pub const MENU_NEW_LEAD: &str = "📝 New lead";
pub const MENU_UPCOMING: &str = "📂 Upcoming";
pub const MENU_WAITING: &str = "⏳ Waiting";
pub const MENU_COMPLETED: &str = "✅ Completed";
pub const MENU_DELETED: &str = "🗑 Deleted";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    NewLead,
    List(LeadStatus),
}

impl Command {
    /// Matches menu labels exactly and slash commands case-insensitively.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let command = match text {
            MENU_NEW_LEAD => Command::NewLead,
            MENU_UPCOMING => Command::List(LeadStatus::New),
            MENU_WAITING => Command::List(LeadStatus::Waiting),
            MENU_COMPLETED => Command::List(LeadStatus::Completed),
            MENU_DELETED => Command::List(LeadStatus::Deleted),
            _ => {
                // Telegram appends the bot name in groups: `/new@leadflow_bot`.
                let slash = text.strip_prefix('/')?;
                let name = slash.split('@').next().unwrap_or(slash);
                match name.to_ascii_lowercase().as_str() {
                    "start" => Command::Start,
                    "help" => Command::Help,
                    "new" => Command::NewLead,
                    "upcoming" => Command::List(LeadStatus::New),
                    "waiting" => Command::List(LeadStatus::Waiting),
                    "completed" => Command::List(LeadStatus::Completed),
                    "deleted" => Command::List(LeadStatus::Deleted),
                    _ => return None,
                }
            }
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_labels_map_to_commands() {
        assert_eq!(Command::parse(MENU_NEW_LEAD), Some(Command::NewLead));
        assert_eq!(
            Command::parse(MENU_UPCOMING),
            Some(Command::List(LeadStatus::New))
        );
        assert_eq!(
            Command::parse(MENU_WAITING),
            Some(Command::List(LeadStatus::Waiting))
        );
        assert_eq!(
            Command::parse(MENU_COMPLETED),
            Some(Command::List(LeadStatus::Completed))
        );
        assert_eq!(
            Command::parse(MENU_DELETED),
            Some(Command::List(LeadStatus::Deleted))
        );
    }

    #[test]
    fn slash_commands_and_bot_suffix() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/HELP"), Some(Command::Help));
        assert_eq!(Command::parse("/new@leadflow_bot"), Some(Command::NewLead));
        assert_eq!(
            Command::parse(" /waiting "),
            Some(Command::List(LeadStatus::Waiting))
        );
    }

    #[test]
    fn anything_else_is_unrecognized() {
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse("/launch"), None);
        assert_eq!(Command::parse("📝"), None);
        assert_eq!(Command::parse(""), None);
    }
}

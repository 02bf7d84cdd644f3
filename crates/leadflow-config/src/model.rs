// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Leadflow lead tracker.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level Leadflow configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LeadflowConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Follow-up reminder settings.
    #[serde(default)]
    pub reminder: ReminderConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name used in logs and the welcome message.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_bot_name() -> String {
    "leadflow".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required by `leadflow serve`.
    #[serde(default)]
    pub bot_token: Option<String>,
}

/// Follow-up reminder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReminderConfig {
    /// Delay before the first reminder after a lead is contacted, in seconds.
    #[serde(default = "default_delay_secs")]
    pub default_delay_secs: u64,

    /// Offsets offered by the reschedule menu, in hours.
    #[serde(default = "default_delay_options_hours")]
    pub delay_options_hours: Vec<u32>,

    /// How many reschedule options are shown per menu row.
    #[serde(default = "default_options_per_row")]
    pub options_per_row: usize,
}

impl ReminderConfig {
    /// The contact reminder delay as a [`Duration`].
    pub fn default_delay(&self) -> Duration {
        Duration::from_secs(self.default_delay_secs)
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            default_delay_secs: default_delay_secs(),
            delay_options_hours: default_delay_options_hours(),
            options_per_row: default_options_per_row(),
        }
    }
}

fn default_delay_secs() -> u64 {
    3600
}

fn default_delay_options_hours() -> Vec<u32> {
    vec![1, 2, 8, 24, 48]
}

fn default_options_per_row() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contact_reminder_of_one_hour() {
        let config = LeadflowConfig::default();
        assert_eq!(config.reminder.default_delay(), Duration::from_secs(3600));
        assert_eq!(config.reminder.delay_options_hours, vec![1, 2, 8, 24, 48]);
        assert_eq!(config.reminder.options_per_row, 3);
        assert_eq!(config.bot.name, "leadflow");
        assert!(config.telegram.bot_token.is_none());
    }

    #[test]
    fn partial_reminder_section_keeps_other_defaults() {
        let config: LeadflowConfig = toml::from_str(
            r#"
[reminder]
default_delay_secs = 60
"#,
        )
        .unwrap();
        assert_eq!(config.reminder.default_delay_secs, 60);
        assert_eq!(config.reminder.delay_options_hours, vec![1, 2, 8, 24, 48]);
    }

    #[test]
    fn unknown_reminder_key_is_rejected() {
        let result = toml::from_str::<LeadflowConfig>(
            r#"
[reminder]
default_delay = 60
"#,
        );
        assert!(result.is_err());
    }
}

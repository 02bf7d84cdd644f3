// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as positive delays and a usable reschedule menu.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::LeadflowConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &LeadflowConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.bot.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "bot.name must not be empty".to_string(),
        });
    }

    let level = config.bot.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "bot.log_level `{}` is not one of {}",
                config.bot.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if let Some(token) = &config.telegram.bot_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "telegram.bot_token must not be empty when set".to_string(),
        });
    }

    if config.reminder.default_delay_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "reminder.default_delay_secs must be greater than 0".to_string(),
        });
    }

    if config.reminder.delay_options_hours.is_empty() {
        errors.push(ConfigError::Validation {
            message: "reminder.delay_options_hours must offer at least one option".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for &hours in &config.reminder.delay_options_hours {
        if hours == 0 {
            errors.push(ConfigError::Validation {
                message: "reminder.delay_options_hours entries must be greater than 0".to_string(),
            });
        } else if !seen.insert(hours) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate reschedule option `{hours}` in reminder.delay_options_hours"),
            });
        }
    }

    if config.reminder.options_per_row == 0 {
        errors.push(ConfigError::Validation {
            message: "reminder.options_per_row must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

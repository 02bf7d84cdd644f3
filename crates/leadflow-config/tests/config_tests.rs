// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Leadflow configuration system.

use leadflow_config::diagnostic::ConfigError;
use leadflow_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_leadflow_config() {
    let toml = r#"
[bot]
name = "estate-desk"
log_level = "debug"

[telegram]
bot_token = "123:ABC"

[reminder]
default_delay_secs = 1800
delay_options_hours = [1, 4, 24]
options_per_row = 2
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.bot.name, "estate-desk");
    assert_eq!(config.bot.log_level, "debug");
    assert_eq!(config.telegram.bot_token.as_deref(), Some("123:ABC"));
    assert_eq!(config.reminder.default_delay_secs, 1800);
    assert_eq!(config.reminder.delay_options_hours, vec![1, 4, 24]);
    assert_eq!(config.reminder.options_per_row, 2);
}

/// An empty document yields the compiled defaults.
#[test]
fn empty_toml_yields_defaults() {
    let config = load_and_validate_str("").expect("defaults should validate");
    assert_eq!(config.bot.name, "leadflow");
    assert_eq!(config.reminder.default_delay_secs, 3600);
}

/// Unknown key produces an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_key_produces_suggestion() {
    let toml = r#"
[telegram]
bot_tken = "abc"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown key");
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion: Some(s), .. }
                if key == "bot_tken" && s == "bot_token"
        )
    });
    assert!(found, "expected UnknownKey with suggestion, got: {errors:?}");
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[anthropic]
api_key = "sk-ant"
"#;
    assert!(load_config_from_str(toml).is_err());
}

/// Wrong value type produces an InvalidType diagnostic.
#[test]
fn wrong_type_produces_invalid_type() {
    let toml = r#"
[reminder]
default_delay_secs = "soon"
"#;
    let errors = load_and_validate_str(toml).expect_err("should reject wrong type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. }))
    );
}

/// Deserializable but semantically invalid values fail validation.
#[test]
fn semantic_errors_are_reported() {
    let toml = r#"
[reminder]
delay_options_hours = []
"#;
    let errors = load_and_validate_str(toml).expect_err("empty menu should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { .. }))
    );
}

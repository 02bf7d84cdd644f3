// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./leadflow.toml` > `~/.config/leadflow/leadflow.toml` > `/etc/leadflow/leadflow.toml`
//! with environment variable overrides via `LEADFLOW_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LeadflowConfig;

/// Local config file name, looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "leadflow.toml";

/// System-wide config file.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/leadflow/leadflow.toml";

/// Top-level sections that environment variables can address.
const CONFIG_SECTIONS: [&str; 3] = ["bot", "telegram", "reminder"];

/// Path of the per-user config file, if a config dir exists on this platform.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("leadflow").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/leadflow/leadflow.toml` (system-wide)
/// 3. `~/.config/leadflow/leadflow.toml` (user XDG config)
/// 4. `./leadflow.toml` (local directory)
/// 5. `LEADFLOW_*` environment variables
pub fn load_config() -> Result<LeadflowConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<LeadflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LeadflowConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LeadflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LeadflowConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LeadflowConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_FILE))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")`: `LEADFLOW_TELEGRAM_BOT_TOKEN`
/// must map to `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("LEADFLOW_").map(|key| {
        // `key` keeps the env var's case with the prefix stripped,
        // e.g. LEADFLOW_TELEGRAM_BOT_TOKEN -> "TELEGRAM_BOT_TOKEN".
        let key_str = key.as_str().to_ascii_lowercase();
        for section in CONFIG_SECTIONS {
            if let Some(rest) = key_str
                .strip_prefix(section)
                .and_then(|r| r.strip_prefix('_'))
            {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("LEADFLOW_TELEGRAM_BOT_TOKEN", "123:ABC");
            jail.set_env("LEADFLOW_REMINDER_DEFAULT_DELAY_SECS", "120");
            jail.set_env("LEADFLOW_BOT_LOG_LEVEL", "debug");

            let config = load_config()?;
            assert_eq!(config.telegram.bot_token.as_deref(), Some("123:ABC"));
            assert_eq!(config.reminder.default_delay_secs, 120);
            assert_eq!(config.bot.log_level, "debug");
            Ok(())
        });
    }

    #[test]
    fn token_env_var_alone_loads() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("LEADFLOW_TELEGRAM_BOT_TOKEN", "123:ABC");

            let config = crate::load_and_validate().map_err(|errors| {
                figment::Error::from(format!("{} config errors", errors.len()))
            })?;
            assert_eq!(config.telegram.bot_token.as_deref(), Some("123:ABC"));
            assert_eq!(config.bot.log_level, "info");
            Ok(())
        });
    }

    #[test]
    fn local_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_FILE,
                r#"
[bot]
name = "estate-desk"

[reminder]
delay_options_hours = [4, 12]
"#,
            )?;

            let config = load_config()?;
            assert_eq!(config.bot.name, "estate-desk");
            assert_eq!(config.reminder.delay_options_hours, vec![4, 12]);
            assert_eq!(config.reminder.default_delay_secs, 3600);
            Ok(())
        });
    }
}

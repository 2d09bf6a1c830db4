// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::PlugstoreConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &PlugstoreConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.log.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if let Some(dir) = &config.store.manifest_dir
        && dir.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "store.manifest_dir must not be empty when set".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for name in &config.store.disabled_plugins {
        if name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "store.disabled_plugins entries must not be empty".to_string(),
            });
        } else if !seen.insert(name) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate plugin `{name}` in store.disabled_plugins"),
            });
        }
    }

    for name in config.flags.keys() {
        if name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "flag names in [flags] must not be empty".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for plugstore.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use plugstore_core::FlagsObject;
use serde::{Deserialize, Serialize};

/// Top-level plugstore configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlugstoreConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Plugin sources and catalog assembly settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Baseline feature flags, flag name to resolved value.
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
}

impl PlugstoreConfig {
    /// The configured flags as a snapshot for the gate evaluator.
    pub fn flags_object(&self) -> FlagsObject {
        FlagsObject::from(self.flags.clone())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Catalog assembly configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory holding `*.toml` plugin manifests, loaded after the built-ins.
    #[serde(default)]
    pub manifest_dir: Option<String>,

    /// Whether the compiled-in plugins are registered.
    #[serde(default = "default_true")]
    pub include_builtin: bool,

    /// Plugins left out of the catalog.
    #[serde(default)]
    pub disabled_plugins: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            manifest_dir: None,
            include_builtin: true,
            disabled_plugins: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

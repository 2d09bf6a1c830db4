// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy, highest precedence first: `./plugstore.toml`,
//! `~/.config/plugstore/plugstore.toml`, then `/etc/plugstore/plugstore.toml`.
//! Environment variables with the `PLUGSTORE_` prefix override all files.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PlugstoreConfig;

pub(crate) const SYSTEM_CONFIG_PATH: &str = "/etc/plugstore/plugstore.toml";
pub(crate) const LOCAL_CONFIG_PATH: &str = "plugstore.toml";

/// Path of the per-user config file, if a config directory is known.
pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("plugstore/plugstore.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/plugstore/plugstore.toml` (system-wide)
/// 3. `~/.config/plugstore/plugstore.toml` (user XDG config)
/// 4. `./plugstore.toml` (local directory)
/// 5. `PLUGSTORE_*` environment variables
pub fn load_config() -> Result<PlugstoreConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PlugstoreConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlugstoreConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PlugstoreConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlugstoreConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PlugstoreConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Environment variable provider mapping `PLUGSTORE_<SECTION>_<KEY>` to `section.key`.
///
/// Only the `log` and `store` sections are reachable from the environment.
/// Env keys arrive lowercased, which would mangle flag names, so `[flags]`
/// is file-only.
fn env_provider() -> Env {
    Env::prefixed("PLUGSTORE_")
        .filter(|key| {
            let key = key.as_str().to_ascii_lowercase();
            key.starts_with("log_") || key.starts_with("store_")
        })
        .map(|key| {
            let mapped = key
                .as_str()
                .to_ascii_lowercase()
                .replacen("log_", "log.", 1)
                .replacen("store_", "store.", 1);
            mapped.into()
        })
}

// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for plugstore.
//!
//! Layered TOML loading (system, user, local, then `PLUGSTORE_*` env vars),
//! strict key checking, semantic validation, and miette diagnostics that
//! point at the offending line.
//!
//! # Usage
//!
//! ```no_run
//! use plugstore_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("builtin plugins: {}", config.store.include_builtin);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError, ConfigSource};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::PlugstoreConfig;

/// Validate a loaded config, or turn the figment failure into diagnostics
/// against whatever sources `sources` yields.
fn finish(
    loaded: Result<PlugstoreConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<ConfigSource>,
) -> Result<PlugstoreConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Load configuration from the standard hierarchy and validate it.
pub fn load_and_validate() -> Result<PlugstoreConfig, Vec<ConfigError>> {
    finish(loader::load_config(), hierarchy_sources)
}

/// Load configuration from one file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<PlugstoreConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        read_source(path).into_iter().collect()
    })
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<PlugstoreConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![ConfigSource::new("<inline>", toml_content)]
    })
}

fn read_source(path: &Path) -> Option<ConfigSource> {
    let content = std::fs::read_to_string(path).ok()?;
    Some(ConfigSource::new(path.display().to_string(), content))
}

/// Re-read every file of the hierarchy that exists, for span lookup.
fn hierarchy_sources() -> Vec<ConfigSource> {
    // figment records the local layer by its absolute path.
    let local = std::env::current_dir()
        .map(|d| d.join(loader::LOCAL_CONFIG_PATH))
        .unwrap_or_else(|_| loader::LOCAL_CONFIG_PATH.into());

    let sources: Vec<ConfigSource> = [
        Some(local),
        loader::user_config_path(),
        Some(loader::SYSTEM_CONFIG_PATH.into()),
    ]
    .into_iter()
    .flatten()
    .filter_map(|path| read_source(&path))
    .collect();

    tracing::debug!(sources = sources.len(), "collected config sources for diagnostics");
    sources
}

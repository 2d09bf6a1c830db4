// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the catalog and the flag snapshot from configuration.

use std::path::Path;

use plugstore_config::PlugstoreConfig;
use plugstore_core::{FlagsObject, PlugstoreError};
use plugstore_plugin::{
    assemble_plugins, builtin_plugins, load_manifest_dir, ActivePlugin, PluginStore,
    TracingInspector,
};

/// Collect the plugins named by the configuration, in registration order.
///
/// Built-ins come first (when enabled), then manifests from `store.manifest_dir`.
pub fn collect_plugins(config: &PlugstoreConfig) -> Result<Vec<ActivePlugin>, PlugstoreError> {
    let manifests = load_manifests(config)?;
    assemble_configured(config, manifests)
}

/// Plugins from the configured manifest directory; empty when none is set.
pub fn load_manifests(config: &PlugstoreConfig) -> Result<Vec<ActivePlugin>, PlugstoreError> {
    match &config.store.manifest_dir {
        Some(dir) => load_manifest_dir(Path::new(dir)),
        None => Ok(Vec::new()),
    }
}

/// Put the built-ins (when enabled) ahead of already-loaded manifest plugins
/// and drop the disabled ones.
pub fn assemble_configured(
    config: &PlugstoreConfig,
    manifests: Vec<ActivePlugin>,
) -> Result<Vec<ActivePlugin>, PlugstoreError> {
    let mut sources = Vec::new();
    if config.store.include_builtin {
        sources.push(builtin_plugins());
    }
    sources.push(manifests);
    assemble_plugins(sources, &config.store.disabled_plugins)
}

/// Build the store for this process.
pub fn build_store(config: &PlugstoreConfig) -> Result<PluginStore, PlugstoreError> {
    let plugins = collect_plugins(config)?;
    Ok(PluginStore::with_inspector(plugins, &TracingInspector))
}

/// Config flags overlaid with `NAME=bool` assignments from the command line.
pub fn resolve_flags(
    config: &PlugstoreConfig,
    assignments: &[String],
) -> Result<FlagsObject, PlugstoreError> {
    let mut flags = config.flags_object();
    for assignment in assignments {
        let (name, value) = FlagsObject::parse_assignment(assignment)?;
        flags.insert(name, value);
    }
    Ok(flags)
}

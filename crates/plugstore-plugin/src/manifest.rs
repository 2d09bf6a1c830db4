// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest parsing from `plugin.toml` files.
//!
//! A manifest registers one plugin and its extensions without compiling it
//! in. Missing flag fields default to empty lists; an `extensions` value that
//! is not an array of tables rejects the whole manifest.

use std::path::Path;
use std::str::FromStr;

use plugstore_core::{ExtensionKind, PlugstoreError};
use serde::Deserialize;

use crate::extension::{Extension, ExtensionFlags, ExtensionProperties};
use crate::plugin::ActivePlugin;

/// The `[plugin]` section of a `plugin.toml` file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PluginSection {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

/// One `[[extensions]]` entry before its properties are typed.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawExtension {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    properties: Option<toml::Table>,
    #[serde(default)]
    flags: Option<ExtensionFlags>,
}

/// Parse a plugin manifest from TOML content.
pub fn parse_plugin_manifest(toml_content: &str) -> Result<ActivePlugin, PlugstoreError> {
    let mut root: toml::Table = toml::from_str(toml_content)
        .map_err(|e| PlugstoreError::manifest(format!("invalid TOML: {e}")))?;

    let section: PluginSection = root
        .remove("plugin")
        .ok_or_else(|| PlugstoreError::manifest("missing [plugin] section"))?
        .try_into()
        .map_err(|e| PlugstoreError::manifest(format!("invalid [plugin] section: {e}")))?;

    if section.name.trim().is_empty() {
        return Err(PlugstoreError::manifest("plugin name must not be empty"));
    }

    let extensions = match root.remove("extensions") {
        None => Vec::new(),
        Some(toml::Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| parse_extension(i, item))
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(PlugstoreError::manifest(format!(
                "`extensions` must be an array of tables, found {}",
                other.type_str()
            )));
        }
    };

    if let Some(key) = root.keys().next() {
        return Err(PlugstoreError::manifest(format!(
            "unknown top-level key `{key}`, expected `plugin` or `extensions`"
        )));
    }

    let mut plugin = ActivePlugin::new(section.name, extensions);
    plugin.description = section.description;
    Ok(plugin)
}

fn parse_extension(index: usize, item: toml::Value) -> Result<Extension, PlugstoreError> {
    if !item.is_table() {
        return Err(PlugstoreError::manifest(format!(
            "extensions[{index}] must be a table, found {}",
            item.type_str()
        )));
    }

    let raw: RawExtension = item
        .try_into()
        .map_err(|e| PlugstoreError::manifest(format!("extensions[{index}]: {e}")))?;

    if ExtensionKind::from_str(&raw.kind).is_err() {
        return Err(PlugstoreError::manifest(format!(
            "extensions[{index}]: unknown extension type `{}`",
            raw.kind
        )));
    }

    let mut tagged = toml::Table::new();
    tagged.insert("type".to_string(), toml::Value::String(raw.kind.clone()));
    tagged.insert(
        "properties".to_string(),
        toml::Value::Table(raw.properties.unwrap_or_default()),
    );
    let properties: ExtensionProperties = toml::Value::Table(tagged).try_into().map_err(|e| {
        PlugstoreError::manifest(format!(
            "extensions[{index}]: invalid properties for `{}`: {e}",
            raw.kind
        ))
    })?;

    Ok(Extension {
        properties,
        flags: raw.flags,
    })
}

/// Parse a single manifest file.
pub fn load_manifest_file(path: &Path) -> Result<ActivePlugin, PlugstoreError> {
    let content = std::fs::read_to_string(path).map_err(|source| PlugstoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_plugin_manifest(&content).map_err(|e| e.with_path(path))
}

/// Load every `*.toml` manifest in a directory, ordered by file name.
pub fn load_manifest_dir(dir: &Path) -> Result<Vec<ActivePlugin>, PlugstoreError> {
    let entries = std::fs::read_dir(dir).map_err(|source| PlugstoreError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PlugstoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut plugins = Vec::with_capacity(paths.len());
    for path in &paths {
        let plugin = load_manifest_file(path)?;
        tracing::debug!(
            path = %path.display(),
            plugin = %plugin.name,
            extensions = plugin.extensions.len(),
            "loaded plugin manifest"
        );
        plugins.push(plugin);
    }
    Ok(plugins)
}

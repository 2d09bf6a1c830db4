// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extension catalog, flag gate evaluator, and plugin manifests.
//!
//! Plugins contribute declarative extensions. The `PluginStore` assembles
//! them once into an immutable, ordered snapshot; the gate evaluator decides
//! per query which extensions are active under the current feature flags.

pub mod catalog;
pub mod extension;
pub mod gating;
pub mod manifest;
pub mod plugin;
pub mod store;

pub use catalog::{assemble_plugins, builtin_plugins, search_plugins};
pub use extension::{Extension, ExtensionFlags, ExtensionProperties, ExtensionWithMetadata, NavItem};
pub use gating::{get_gating_flag_names, is_extension_in_use, missing_gating_flags};
pub use manifest::{load_manifest_dir, load_manifest_file, parse_plugin_manifest};
pub use plugin::ActivePlugin;
pub use store::{
    augment_extension, sanitize_extension, PluginStore, StoreInspector, TracingInspector,
};

// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The extension catalog.
//!
//! `PluginStore` flattens the extensions of every active plugin into one
//! ordered snapshot at construction time. The snapshot is shared behind an
//! `Arc` and never mutated afterwards; flag changes are picked up by passing
//! a fresh `FlagsObject` to each query.

use std::collections::HashSet;
use std::sync::Arc;

use plugstore_core::{ExtensionKind, FlagsObject};

use crate::extension::{Extension, ExtensionFlags, ExtensionProperties, ExtensionWithMetadata};
use crate::plugin::ActivePlugin;

/// Ensure both flag lists exist and hold unique names.
///
/// Missing flags become empty lists. Duplicates are dropped, keeping the
/// first occurrence.
pub fn sanitize_extension(extension: Extension) -> (ExtensionProperties, ExtensionFlags) {
    let flags = extension.flags.unwrap_or_default();
    (
        extension.properties,
        ExtensionFlags {
            required: dedup(flags.required),
            disallowed: dedup(flags.disallowed),
        },
    )
}

/// Tag a sanitized extension with the plugin that declared it.
pub fn augment_extension(
    properties: ExtensionProperties,
    flags: ExtensionFlags,
    plugin: &ActivePlugin,
) -> ExtensionWithMetadata {
    ExtensionWithMetadata::new(properties, flags, plugin.name.clone())
}

fn dedup(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(names.len());
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Hook called once the store has assembled its snapshot.
///
/// Stands in for a process-wide debug handle: callers that want to inspect
/// the catalog pass an inspector explicitly.
pub trait StoreInspector {
    fn on_assembled(&self, extensions: &[ExtensionWithMetadata]);
}

/// Inspector that logs a per-plugin summary at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingInspector;

impl StoreInspector for TracingInspector {
    fn on_assembled(&self, extensions: &[ExtensionWithMetadata]) {
        let mut start = 0;
        while start < extensions.len() {
            let plugin = extensions[start].plugin();
            let count = extensions[start..]
                .iter()
                .take_while(|e| e.plugin() == plugin)
                .count();
            let gated = extensions[start..start + count]
                .iter()
                .filter(|e| !e.flags().is_empty())
                .count();
            tracing::debug!(plugin, extensions = count, gated, "plugin extensions assembled");
            start += count;
        }
    }
}

/// Immutable catalog of all extensions contributed by the active plugins.
#[derive(Debug, Clone)]
pub struct PluginStore {
    extensions: Arc<[ExtensionWithMetadata]>,
    plugins: Arc<[String]>,
    descriptions: Arc<[Option<String>]>,
}

impl PluginStore {
    /// Assemble the catalog.
    ///
    /// Extensions keep plugin order, then declaration order within each
    /// plugin. Consumers that apply first-match-wins (route matching) rely on
    /// this order.
    pub fn new(plugins: Vec<ActivePlugin>) -> Self {
        let plugin_names: Vec<String> = plugins.iter().map(|p| p.name.clone()).collect();
        let descriptions: Vec<Option<String>> =
            plugins.iter().map(|p| p.description.clone()).collect();

        let mut extensions = Vec::with_capacity(plugins.iter().map(|p| p.extensions.len()).sum());
        for mut plugin in plugins {
            let declared = std::mem::take(&mut plugin.extensions);
            for extension in declared {
                let (properties, flags) = sanitize_extension(extension);
                extensions.push(augment_extension(properties, flags, &plugin));
            }
        }

        tracing::info!(
            plugins = plugin_names.len(),
            extensions = extensions.len(),
            "plugin store assembled"
        );

        Self {
            extensions: extensions.into(),
            plugins: plugin_names.into(),
            descriptions: descriptions.into(),
        }
    }

    /// Assemble the catalog and hand the snapshot to an inspector.
    pub fn with_inspector(plugins: Vec<ActivePlugin>, inspector: &dyn StoreInspector) -> Self {
        let store = Self::new(plugins);
        inspector.on_assembled(&store.extensions);
        store
    }

    /// Every extension regardless of flag state, in catalog order.
    pub fn get_all_extensions(&self) -> &[ExtensionWithMetadata] {
        &self.extensions
    }

    /// Extensions of one kind, in catalog order.
    pub fn extensions_of_kind(
        &self,
        kind: ExtensionKind,
    ) -> impl Iterator<Item = &ExtensionWithMetadata> + '_ {
        self.extensions.iter().filter(move |e| e.kind() == kind)
    }

    /// Extensions active under the given flags, in catalog order.
    pub fn active_extensions<'a>(
        &'a self,
        flags: &'a FlagsObject,
    ) -> impl Iterator<Item = &'a ExtensionWithMetadata> + 'a {
        self.extensions.iter().filter(move |e| e.is_in_use(flags))
    }

    /// Names of the plugins the store was built from, in order.
    pub fn plugin_names(&self) -> &[String] {
        &self.plugins
    }

    /// Description a plugin was registered with, if any.
    pub fn plugin_description(&self, name: &str) -> Option<&str> {
        let index = self.plugins.iter().position(|p| p == name)?;
        self.descriptions[index].as_deref()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::{PvcCreatePropProps, RoutePageProps};
    use std::cell::Cell;

    fn route(path: &str) -> Extension {
        Extension::new(ExtensionProperties::RoutePage(RoutePageProps {
            path: vec![path.to_string()],
            exact: true,
            required: None,
        }))
    }

    fn pvc_prop(label: &str) -> Extension {
        Extension::new(ExtensionProperties::PvcCreateProp(PvcCreatePropProps {
            label: label.to_string(),
            path: "~new/form".to_string(),
        }))
    }

    #[test]
    fn sanitize_defaults_missing_flags() {
        let (_, flags) = sanitize_extension(route("/a"));
        assert!(flags.required.is_empty());
        assert!(flags.disallowed.is_empty());
    }

    #[test]
    fn sanitize_dedups_keeping_first_occurrence() {
        let ext = route("/a").gated(ExtensionFlags {
            required: vec!["B".into(), "A".into(), "B".into()],
            disallowed: vec!["C".into(), "C".into()],
        });
        let (_, flags) = sanitize_extension(ext);
        assert_eq!(flags.required, vec!["B", "A"]);
        assert_eq!(flags.disallowed, vec!["C"]);
    }

    #[test]
    fn descriptions_follow_plugin_names() {
        let store = PluginStore::new(vec![
            ActivePlugin::new("a", vec![]).with_description("first"),
            ActivePlugin::new("b", vec![route("/b")]),
        ]);
        assert_eq!(store.plugin_description("a"), Some("first"));
        assert_eq!(store.plugin_description("b"), None);
        assert_eq!(store.plugin_description("missing"), None);
    }

    #[test]
    fn augment_tags_extension_with_declaring_plugin() {
        let plugin = ActivePlugin::new("knative-plugin", vec![route("/event-source")]);
        let (properties, flags) = sanitize_extension(plugin.extensions[0].clone());
        let ext = augment_extension(properties, flags, &plugin);
        assert_eq!(ext.plugin(), "knative-plugin");
        assert_eq!(ext.properties().as_route().unwrap().path, vec!["/event-source"]);
        assert!(ext.flags().is_empty());
    }

    #[test]
    fn store_preserves_plugin_then_declaration_order() {
        let store = PluginStore::new(vec![
            ActivePlugin::new("A", vec![route("/x1"), route("/x2")]),
            ActivePlugin::new("B", vec![route("/x3")]),
        ]);
        let all = store.get_all_extensions();
        let paths: Vec<&str> = all
            .iter()
            .map(|e| e.properties().as_route().unwrap().path[0].as_str())
            .collect();
        assert_eq!(paths, vec!["/x1", "/x2", "/x3"]);
        let owners: Vec<&str> = all.iter().map(|e| e.plugin()).collect();
        assert_eq!(owners, vec!["A", "A", "B"]);
        assert_eq!(store.plugin_names(), &["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn get_all_extensions_returns_same_snapshot() {
        let store = PluginStore::new(vec![ActivePlugin::new("A", vec![route("/x")])]);
        let first = store.get_all_extensions();
        let second = store.get_all_extensions();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, second);

        let cloned = store.clone();
        assert!(std::ptr::eq(first, cloned.get_all_extensions()));
    }

    #[test]
    fn extensions_of_kind_filters() {
        let store = PluginStore::new(vec![ActivePlugin::new(
            "console",
            vec![route("/a"), pvc_prop("With Form"), route("/b")],
        )]);
        assert_eq!(store.extensions_of_kind(ExtensionKind::RoutePage).count(), 2);
        assert_eq!(store.extensions_of_kind(ExtensionKind::PvcCreateProp).count(), 1);
        assert_eq!(store.extensions_of_kind(ExtensionKind::AddAction).count(), 0);
    }

    #[test]
    fn active_extensions_reflect_new_flags_without_rebuild() {
        let store = PluginStore::new(vec![ActivePlugin::new(
            "console",
            vec![
                route("/always"),
                route("/openshift").gated(ExtensionFlags::required(&["OPENSHIFT"])),
            ],
        )]);
        let mut flags = FlagsObject::new();
        assert_eq!(store.active_extensions(&flags).count(), 1);
        flags.insert("OPENSHIFT", true);
        assert_eq!(store.active_extensions(&flags).count(), 2);
    }

    #[test]
    fn empty_store() {
        let store = PluginStore::new(vec![]);
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.plugin_names().is_empty());
    }

    struct CountingInspector(Cell<usize>);

    impl StoreInspector for CountingInspector {
        fn on_assembled(&self, extensions: &[ExtensionWithMetadata]) {
            self.0.set(self.0.get() + extensions.len());
        }
    }

    #[test]
    fn inspector_sees_assembled_snapshot_once() {
        let inspector = CountingInspector(Cell::new(0));
        let store = PluginStore::with_inspector(
            vec![
                ActivePlugin::new("A", vec![route("/a")]),
                ActivePlugin::new("B", vec![route("/b"), route("/c")]),
            ],
            &inspector,
        );
        assert_eq!(inspector.0.get(), 3);
        assert_eq!(store.len(), 3);
    }

    #[test]
    #[tracing_test::traced_test]
    fn tracing_inspector_logs_each_plugin() {
        PluginStore::with_inspector(
            vec![
                ActivePlugin::new("console", vec![route("/a")]),
                ActivePlugin::new(
                    "knative",
                    vec![route("/b").gated(ExtensionFlags::required(&["KNATIVE_EVENTING"]))],
                ),
            ],
            &TracingInspector,
        );
        assert!(logs_contain("plugin store assembled"));
        assert!(logs_contain("plugin=\"console\""));
        assert!(logs_contain("plugin=\"knative\""));
        assert!(logs_contain("gated=1"));
    }

    #[test]
    fn store_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PluginStore>();
    }
}

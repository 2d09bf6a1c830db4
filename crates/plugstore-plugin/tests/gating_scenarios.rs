// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gating scenarios against the built-in plugins and hand-built stores.

use plugstore_core::{ExtensionKind, FlagsObject};
use plugstore_plugin::catalog::{
    FLAG_KNATIVE_EVENTING, FLAG_KNATIVE_SERVING_SERVICE, FLAG_OPENSHIFT,
};
use plugstore_plugin::extension::RoutePageProps;
use plugstore_plugin::{
    builtin_plugins, get_gating_flag_names, missing_gating_flags, ActivePlugin, Extension,
    ExtensionFlags, ExtensionProperties, PluginStore,
};

fn route_store(flags: ExtensionFlags) -> PluginStore {
    PluginStore::new(vec![ActivePlugin::new(
        "console",
        vec![Extension::new(ExtensionProperties::RoutePage(RoutePageProps {
            path: vec!["/".to_string()],
            exact: false,
            required: None,
        }))
        .gated(flags)],
    )])
}

#[test]
fn required_openshift_route() {
    let store = route_store(ExtensionFlags::required(&["OPENSHIFT"]));
    let ext = &store.get_all_extensions()[0];
    assert!(ext.is_in_use(&FlagsObject::new().with("OPENSHIFT", true)));
    assert!(!ext.is_in_use(&FlagsObject::new().with("OPENSHIFT", false)));
    assert!(!ext.is_in_use(&FlagsObject::new()));
}

#[test]
fn disallowed_service_catalog() {
    let store = route_store(ExtensionFlags::disallowed(&["SERVICE_CATALOG"]));
    let ext = &store.get_all_extensions()[0];
    assert!(ext.is_in_use(&FlagsObject::new().with("SERVICE_CATALOG", false)));
    assert!(!ext.is_in_use(&FlagsObject::new()));
}

#[test]
fn builtin_nav_switches_between_projects_and_namespaces() {
    let store = PluginStore::new(builtin_plugins());
    let nav_names = |flags: &FlagsObject| -> Vec<String> {
        store
            .active_extensions(flags)
            .filter(|e| e.kind().is_nav_item() && e.plugin() == "console")
            .filter_map(|e| e.properties().as_nav_item().map(|n| n.name().to_string()))
            .collect()
    };

    let openshift = FlagsObject::new().with(FLAG_OPENSHIFT, true);
    assert_eq!(nav_names(&openshift), vec!["Projects", "Search"]);

    let kubernetes = FlagsObject::new().with(FLAG_OPENSHIFT, false);
    assert_eq!(nav_names(&kubernetes), vec!["Namespaces", "Search"]);

    // Detection still pending: neither variant shows.
    assert_eq!(nav_names(&FlagsObject::new()), vec!["Search"]);
}

#[test]
fn knative_extensions_follow_detection() {
    let store = PluginStore::new(builtin_plugins());
    let mut flags = FlagsObject::new();

    let add_actions = |flags: &FlagsObject| {
        store
            .active_extensions(flags)
            .filter(|e| e.kind() == ExtensionKind::AddAction)
            .count()
    };
    assert_eq!(add_actions(&flags), 0);

    flags.insert(FLAG_KNATIVE_EVENTING, true);
    assert_eq!(add_actions(&flags), 1);

    let service_nav = store
        .extensions_of_kind(ExtensionKind::ResourceNsNavItem)
        .find(|e| e.flags().required == vec![FLAG_KNATIVE_SERVING_SERVICE.to_string()])
        .unwrap();
    assert!(!service_nav.is_in_use(&flags));
    flags.insert(FLAG_KNATIVE_SERVING_SERVICE, true);
    assert!(service_nav.is_in_use(&flags));
}

#[test]
fn gating_names_for_builtins() {
    let store = PluginStore::new(builtin_plugins());
    let names = get_gating_flag_names(store.get_all_extensions());
    assert_eq!(names[0], FLAG_OPENSHIFT);
    assert_eq!(names.iter().filter(|n| *n == FLAG_OPENSHIFT).count(), 1);
    assert!(names.contains(&FLAG_KNATIVE_EVENTING.to_string()));

    let flags = FlagsObject::new().with(FLAG_OPENSHIFT, true);
    let missing = missing_gating_flags(store.get_all_extensions(), &flags);
    assert!(!missing.contains(&FLAG_OPENSHIFT.to_string()));
    assert_eq!(missing.len(), names.len() - 1);
}

#[test]
fn first_matching_route_wins_in_catalog_order() {
    let route = |path: &str| {
        Extension::new(ExtensionProperties::RoutePage(RoutePageProps {
            path: vec![path.to_string()],
            exact: false,
            required: None,
        }))
    };
    let store = PluginStore::new(vec![
        ActivePlugin::new("first", vec![route("/event-source")]),
        ActivePlugin::new("second", vec![route("/event-source")]),
    ]);
    let flags = FlagsObject::new();
    let winner = store
        .active_extensions(&flags)
        .find(|e| {
            e.properties()
                .as_route()
                .is_some_and(|r| r.path.iter().any(|p| p == "/event-source"))
        })
        .unwrap();
    assert_eq!(winner.plugin(), "first");
}

// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in plugin registration list.
//!
//! Returns the plugins compiled into the binary as plain values, in a fixed
//! order, and merges them with manifest-loaded plugins before the store is
//! built. No loading happens by name at runtime.

use std::collections::HashSet;

use plugstore_core::PlugstoreError;

use crate::extension::{
    AddActionProps, Extension, ExtensionFlags, ExtensionProperties, GlobalConfigProps,
    HrefNavItemProps, ModelDefinitionProps, ModelFeatureFlagProps, ModelRef, OverviewCrdProps,
    PvcCreatePropProps, ResourceNavItemProps, ResourcePageProps, RoutePageProps,
    YamlTemplateProps,
};
use crate::plugin::ActivePlugin;

pub const FLAG_OPENSHIFT: &str = "OPENSHIFT";
pub const FLAG_CAN_LIST_NS: &str = "CAN_LIST_NS";
pub const FLAG_KNATIVE_SERVING: &str = "KNATIVE_SERVING";
pub const FLAG_KNATIVE_SERVING_SERVICE: &str = "KNATIVE_SERVING_SERVICE";
pub const FLAG_KNATIVE_SERVING_REVISION: &str = "KNATIVE_SERVING_REVISION";
pub const FLAG_KNATIVE_SERVING_ROUTE: &str = "KNATIVE_SERVING_ROUTE";
pub const FLAG_KNATIVE_EVENTING: &str = "KNATIVE_EVENTING";

fn knative_model(group: &str, kind: &str, plural: &str) -> ModelRef {
    ModelRef {
        group: Some(group.to_string()),
        version: "v1".to_string(),
        kind: kind.to_string(),
        label_plural: Some(plural.to_string()),
    }
}

fn console_plugin() -> ActivePlugin {
    let pvc = ModelRef {
        group: None,
        version: "v1".to_string(),
        kind: "PersistentVolumeClaim".to_string(),
        label_plural: Some("PersistentVolumeClaims".to_string()),
    };
    ActivePlugin::new(
        "console",
        vec![
            Extension::new(ExtensionProperties::HrefNavItem(HrefNavItemProps {
                section: "Home".to_string(),
                name: "Projects".to_string(),
                href: "/k8s/cluster/projects".to_string(),
                active_path: None,
                starts_with: vec![],
            }))
            .gated(ExtensionFlags::required(&[FLAG_OPENSHIFT])),
            Extension::new(ExtensionProperties::ResourceClusterNavItem(
                ResourceNavItemProps {
                    section: "Home".to_string(),
                    name: "Namespaces".to_string(),
                    resource: "namespaces".to_string(),
                },
            ))
            .gated(ExtensionFlags::disallowed(&[FLAG_OPENSHIFT])),
            Extension::new(ExtensionProperties::HrefNavItem(HrefNavItemProps {
                section: "Home".to_string(),
                name: "Search".to_string(),
                href: "/search".to_string(),
                active_path: Some("/search/".to_string()),
                starts_with: vec!["search".to_string()],
            })),
            Extension::new(ExtensionProperties::PvcCreateProp(PvcCreatePropProps {
                label: "With Form".to_string(),
                path: "~new/form".to_string(),
            })),
            Extension::new(ExtensionProperties::YamlTemplate(YamlTemplateProps {
                model: pvc,
                template: "apiVersion: v1\nkind: PersistentVolumeClaim\nmetadata:\n  name: example\n"
                    .to_string(),
                name: None,
            })),
        ],
    )
    .with_description("Core console navigation and storage actions")
}

fn knative_plugin() -> ActivePlugin {
    let serving = knative_model("operator.knative.dev", "KnativeServing", "Knative Servings");
    let eventing = knative_model("operator.knative.dev", "KnativeEventing", "Knative Eventings");
    let service = knative_model("serving.knative.dev", "Service", "Services");
    let revision = knative_model("serving.knative.dev", "Revision", "Revisions");
    let route = knative_model("serving.knative.dev", "Route", "Routes");

    let feature_flag = |model: &ModelRef, flag: &str| {
        Extension::new(ExtensionProperties::ModelFeatureFlag(ModelFeatureFlagProps {
            model: model.clone(),
            flag: flag.to_string(),
        }))
    };
    let nav_item = |model: &ModelRef, flag: &str| {
        Extension::new(ExtensionProperties::ResourceNsNavItem(ResourceNavItemProps {
            section: "Serverless".to_string(),
            name: model.label_plural.clone().unwrap_or_else(|| model.kind.clone()),
            resource: model.reference(),
        }))
        .gated(ExtensionFlags::required(&[flag]))
    };
    let list_page = |model: &ModelRef| {
        Extension::new(ExtensionProperties::ResourceListPage(ResourcePageProps {
            model: model.clone(),
        }))
    };

    ActivePlugin::new(
        "knative-plugin",
        vec![
            Extension::new(ExtensionProperties::ModelDefinition(ModelDefinitionProps {
                models: vec![
                    serving.clone(),
                    eventing.clone(),
                    service.clone(),
                    revision.clone(),
                    route.clone(),
                ],
            })),
            feature_flag(&serving, FLAG_KNATIVE_SERVING),
            feature_flag(&eventing, FLAG_KNATIVE_EVENTING),
            feature_flag(&service, FLAG_KNATIVE_SERVING_SERVICE),
            feature_flag(&revision, FLAG_KNATIVE_SERVING_REVISION),
            feature_flag(&route, FLAG_KNATIVE_SERVING_ROUTE),
            Extension::new(ExtensionProperties::GlobalConfig(GlobalConfigProps {
                kind: "KnativeServing".to_string(),
                name: "knative-serving".to_string(),
                namespace: "knative-serving".to_string(),
                uid: "knative-serving".to_string(),
                model: serving.clone(),
                required: Some(FLAG_KNATIVE_SERVING.to_string()),
            })),
            nav_item(&service, FLAG_KNATIVE_SERVING_SERVICE),
            nav_item(&revision, FLAG_KNATIVE_SERVING_REVISION),
            nav_item(&route, FLAG_KNATIVE_SERVING_ROUTE),
            Extension::new(ExtensionProperties::OverviewCrd(OverviewCrdProps {
                resources: vec![revision.reference()],
                required: Some(FLAG_KNATIVE_SERVING_REVISION.to_string()),
            })),
            list_page(&revision),
            list_page(&service),
            list_page(&route),
            Extension::new(ExtensionProperties::RoutePage(RoutePageProps {
                path: vec!["/event-source".to_string()],
                exact: true,
                required: Some(FLAG_KNATIVE_EVENTING.to_string()),
            })),
            Extension::new(ExtensionProperties::RoutePage(RoutePageProps {
                path: vec![
                    "/event-source/all-namespaces".to_string(),
                    "/event-source/ns/:ns".to_string(),
                ],
                exact: true,
                required: Some(FLAG_KNATIVE_EVENTING.to_string()),
            })),
            Extension::new(ExtensionProperties::YamlTemplate(YamlTemplateProps {
                model: service.clone(),
                template: "apiVersion: serving.knative.dev/v1\nkind: Service\nmetadata:\n  name: sample\n"
                    .to_string(),
                name: Some("default".to_string()),
            })),
            Extension::new(ExtensionProperties::AddAction(AddActionProps {
                id: "knative-event-source".to_string(),
                url: "/event-source".to_string(),
                label: "Event Source".to_string(),
                description: "Create an event source to register interest in a class of events from a particular system".to_string(),
                icon: None,
            }))
            .gated(ExtensionFlags::required(&[FLAG_KNATIVE_EVENTING])),
        ],
    )
    .with_description("Knative Serving and Eventing resources")
}

/// Returns the plugins compiled into the binary, in registration order.
pub fn builtin_plugins() -> Vec<ActivePlugin> {
    vec![console_plugin(), knative_plugin()]
}

/// Search the built-in plugins by name (case-insensitive).
///
/// If query is empty, returns all plugins.
pub fn search_plugins(query: &str) -> Vec<ActivePlugin> {
    if query.is_empty() {
        return builtin_plugins();
    }
    let query_lower = query.to_lowercase();
    builtin_plugins()
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&query_lower))
        .collect()
}

/// Combine plugin sources into the ordered list the store is built from.
///
/// Sources are concatenated in the given order, then plugins named in
/// `disabled` are dropped. Two plugins sharing a name is an error since the
/// name is the provenance key of every extension.
pub fn assemble_plugins(
    sources: Vec<Vec<ActivePlugin>>,
    disabled: &[String],
) -> Result<Vec<ActivePlugin>, PlugstoreError> {
    let mut seen = HashSet::new();
    let mut plugins = Vec::new();
    for plugin in sources.into_iter().flatten() {
        if !seen.insert(plugin.name.clone()) {
            return Err(PlugstoreError::manifest(format!(
                "duplicate plugin name `{}`",
                plugin.name
            )));
        }
        if disabled.iter().any(|d| d == &plugin.name) {
            tracing::info!(plugin = %plugin.name, "plugin disabled by configuration");
            continue;
        }
        plugins.push(plugin);
    }
    Ok(plugins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugstore_core::ExtensionKind;

    #[test]
    fn builtin_plugins_in_fixed_order() {
        let names: Vec<String> = builtin_plugins().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["console", "knative-plugin"]);
    }

    #[test]
    fn knative_declares_a_flag_per_model() {
        let knative = builtin_plugins().remove(1);
        let flags: Vec<&str> = knative
            .extensions
            .iter()
            .filter_map(|e| e.properties.as_model_feature_flag())
            .map(|p| p.flag.as_str())
            .collect();
        assert_eq!(
            flags,
            vec![
                FLAG_KNATIVE_SERVING,
                FLAG_KNATIVE_EVENTING,
                FLAG_KNATIVE_SERVING_SERVICE,
                FLAG_KNATIVE_SERVING_REVISION,
                FLAG_KNATIVE_SERVING_ROUTE,
            ]
        );
    }

    #[test]
    fn knative_nav_items_use_model_references() {
        let knative = builtin_plugins().remove(1);
        let nav = knative
            .extensions
            .iter()
            .find(|e| e.kind() == ExtensionKind::ResourceNsNavItem)
            .unwrap();
        let view = nav.properties.as_nav_item().unwrap();
        assert_eq!(view.section(), "Serverless");
        assert_eq!(view.name(), "Services");
        assert!(matches!(
            view,
            crate::extension::NavItem::ResourceNs(p) if p.resource == "serving.knative.dev~v1~Service"
        ));
    }

    #[test]
    fn search_plugins_case_insensitive() {
        let results = search_plugins("KNATIVE");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "knative-plugin");
    }

    #[test]
    fn search_plugins_empty_returns_all() {
        assert_eq!(search_plugins("").len(), 2);
        assert!(search_plugins("xyz_nonexistent").is_empty());
    }

    #[test]
    fn assemble_keeps_source_order_and_drops_disabled() {
        let extra = vec![ActivePlugin::new("extra", vec![])];
        let plugins =
            assemble_plugins(vec![builtin_plugins(), extra], &["knative-plugin".to_string()])
                .unwrap();
        let names: Vec<&str> = plugins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["console", "extra"]);
    }

    #[test]
    fn assemble_rejects_duplicate_names() {
        let dup = vec![ActivePlugin::new("console", vec![])];
        let err = assemble_plugins(vec![builtin_plugins(), dup], &[]).unwrap_err();
        assert!(err.to_string().contains("duplicate plugin name `console`"));
    }
}

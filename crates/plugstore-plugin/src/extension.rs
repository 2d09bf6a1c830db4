// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extension declarations and their per-kind properties.
//!
//! An extension is one declarative unit of contributed behavior: a route, a
//! nav item, a model definition, and so on. Its properties form a closed
//! tagged union so consumers match on the variant they care about instead of
//! probing an untyped bag.

use plugstore_core::ExtensionKind;
use plugstore_core::FlagsObject;
use serde::{Deserialize, Serialize};

use crate::gating::is_extension_in_use;

/// Reference to a Kubernetes resource model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRef {
    /// API group; `None` for the core group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub version: String,
    pub kind: String,
    /// Plural display label (e.g. "Services").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_plural: Option<String>,
}

impl ModelRef {
    /// Model reference string: `group~version~kind`, or just `kind` for the core group.
    pub fn reference(&self) -> String {
        match &self.group {
            Some(group) if !group.is_empty() => {
                format!("{group}~{}~{}", self.version, self.kind)
            }
            _ => self.kind.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDefinitionProps {
    pub models: Vec<ModelRef>,
}

/// Detects a flag from the presence of a model on the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFeatureFlagProps {
    pub model: ModelRef,
    /// Name of the flag set once the model is detected.
    pub flag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrefNavItemProps {
    pub section: String,
    pub name: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub starts_with: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNavItemProps {
    pub section: String,
    pub name: String,
    /// Model reference of the listed resource.
    pub resource: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePageProps {
    pub path: Vec<String>,
    #[serde(default)]
    pub exact: bool,
    /// Flag the router itself checks before matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePageProps {
    pub model: ModelRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YamlTemplateProps {
    pub model: ModelRef,
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddActionProps {
    pub id: String,
    pub url: String,
    pub label: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfigProps {
    pub kind: String,
    pub name: String,
    pub namespace: String,
    pub uid: String,
    pub model: ModelRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PvcCreatePropProps {
    pub label: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewCrdProps {
    pub resources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
}

/// Kind-specific properties of an extension.
///
/// Serialized adjacently tagged: `type = "Page/Route"` plus a `properties` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties")]
pub enum ExtensionProperties {
    #[serde(rename = "ModelDefinition")]
    ModelDefinition(ModelDefinitionProps),
    #[serde(rename = "FeatureFlag/Model")]
    ModelFeatureFlag(ModelFeatureFlagProps),
    #[serde(rename = "NavItem/Href")]
    HrefNavItem(HrefNavItemProps),
    #[serde(rename = "NavItem/ResourceNS")]
    ResourceNsNavItem(ResourceNavItemProps),
    #[serde(rename = "NavItem/ResourceCluster")]
    ResourceClusterNavItem(ResourceNavItemProps),
    #[serde(rename = "Page/Route")]
    RoutePage(RoutePageProps),
    #[serde(rename = "Page/Resource/List")]
    ResourceListPage(ResourcePageProps),
    #[serde(rename = "Page/Resource/Details")]
    ResourceDetailsPage(ResourcePageProps),
    #[serde(rename = "YAMLTemplate")]
    YamlTemplate(YamlTemplateProps),
    #[serde(rename = "AddAction")]
    AddAction(AddActionProps),
    #[serde(rename = "GlobalConfig")]
    GlobalConfig(GlobalConfigProps),
    #[serde(rename = "PVCCreateProp")]
    PvcCreateProp(PvcCreatePropProps),
    #[serde(rename = "Overview/CRD")]
    OverviewCrd(OverviewCrdProps),
}

/// Borrowed view over any of the navigation item variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem<'a> {
    Href(&'a HrefNavItemProps),
    ResourceNs(&'a ResourceNavItemProps),
    ResourceCluster(&'a ResourceNavItemProps),
}

impl NavItem<'_> {
    /// Navigation section the item belongs to.
    pub fn section(&self) -> &str {
        match self {
            NavItem::Href(p) => &p.section,
            NavItem::ResourceNs(p) | NavItem::ResourceCluster(p) => &p.section,
        }
    }

    /// Display name of the item.
    pub fn name(&self) -> &str {
        match self {
            NavItem::Href(p) => &p.name,
            NavItem::ResourceNs(p) | NavItem::ResourceCluster(p) => &p.name,
        }
    }
}

impl ExtensionProperties {
    /// The kind tag of this variant.
    pub fn kind(&self) -> ExtensionKind {
        match self {
            ExtensionProperties::ModelDefinition(_) => ExtensionKind::ModelDefinition,
            ExtensionProperties::ModelFeatureFlag(_) => ExtensionKind::ModelFeatureFlag,
            ExtensionProperties::HrefNavItem(_) => ExtensionKind::HrefNavItem,
            ExtensionProperties::ResourceNsNavItem(_) => ExtensionKind::ResourceNsNavItem,
            ExtensionProperties::ResourceClusterNavItem(_) => {
                ExtensionKind::ResourceClusterNavItem
            }
            ExtensionProperties::RoutePage(_) => ExtensionKind::RoutePage,
            ExtensionProperties::ResourceListPage(_) => ExtensionKind::ResourceListPage,
            ExtensionProperties::ResourceDetailsPage(_) => ExtensionKind::ResourceDetailsPage,
            ExtensionProperties::YamlTemplate(_) => ExtensionKind::YamlTemplate,
            ExtensionProperties::AddAction(_) => ExtensionKind::AddAction,
            ExtensionProperties::GlobalConfig(_) => ExtensionKind::GlobalConfig,
            ExtensionProperties::PvcCreateProp(_) => ExtensionKind::PvcCreateProp,
            ExtensionProperties::OverviewCrd(_) => ExtensionKind::OverviewCrd,
        }
    }

    pub fn as_route(&self) -> Option<&RoutePageProps> {
        match self {
            ExtensionProperties::RoutePage(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_nav_item(&self) -> Option<NavItem<'_>> {
        match self {
            ExtensionProperties::HrefNavItem(p) => Some(NavItem::Href(p)),
            ExtensionProperties::ResourceNsNavItem(p) => Some(NavItem::ResourceNs(p)),
            ExtensionProperties::ResourceClusterNavItem(p) => Some(NavItem::ResourceCluster(p)),
            _ => None,
        }
    }

    pub fn as_model_feature_flag(&self) -> Option<&ModelFeatureFlagProps> {
        match self {
            ExtensionProperties::ModelFeatureFlag(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_model_definition(&self) -> Option<&ModelDefinitionProps> {
        match self {
            ExtensionProperties::ModelDefinition(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_add_action(&self) -> Option<&AddActionProps> {
        match self {
            ExtensionProperties::AddAction(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_yaml_template(&self) -> Option<&YamlTemplateProps> {
        match self {
            ExtensionProperties::YamlTemplate(p) => Some(p),
            _ => None,
        }
    }
}

/// Flag conditions gating an extension.
///
/// After sanitizing, both lists hold unique names in first-seen order.
/// Either list may be omitted; any other key is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionFlags {
    /// Flags that must all be `true`.
    #[serde(default)]
    pub required: Vec<String>,
    /// Flags that must all be `false`.
    #[serde(default)]
    pub disallowed: Vec<String>,
}

impl ExtensionFlags {
    pub fn required(names: &[&str]) -> Self {
        Self {
            required: names.iter().map(|s| s.to_string()).collect(),
            disallowed: Vec::new(),
        }
    }

    pub fn disallowed(names: &[&str]) -> Self {
        Self {
            required: Vec::new(),
            disallowed: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Returns true if no flag condition applies.
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.disallowed.is_empty()
    }
}

/// A raw extension as declared by a plugin, before sanitizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub properties: ExtensionProperties,
    /// `None` when the declaration carried no flags at all.
    pub flags: Option<ExtensionFlags>,
}

impl Extension {
    /// Declare an extension without flag conditions.
    pub fn new(properties: ExtensionProperties) -> Self {
        Self {
            properties,
            flags: None,
        }
    }

    /// Attach flag conditions.
    pub fn gated(mut self, flags: ExtensionFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    pub fn kind(&self) -> ExtensionKind {
        self.properties.kind()
    }
}

/// An extension after sanitizing, tagged with the plugin that declared it.
///
/// Fields are private; the record cannot change once the store assembled it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionWithMetadata {
    #[serde(flatten)]
    properties: ExtensionProperties,
    flags: ExtensionFlags,
    plugin: String,
}

impl ExtensionWithMetadata {
    pub(crate) fn new(properties: ExtensionProperties, flags: ExtensionFlags, plugin: String) -> Self {
        Self {
            properties,
            flags,
            plugin,
        }
    }

    pub fn properties(&self) -> &ExtensionProperties {
        &self.properties
    }

    pub fn flags(&self) -> &ExtensionFlags {
        &self.flags
    }

    /// Name of the plugin that contributed this extension.
    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    pub fn kind(&self) -> ExtensionKind {
        self.properties.kind()
    }

    /// Whether the extension is active under the given flag snapshot.
    pub fn is_in_use(&self, flags: &FlagsObject) -> bool {
        is_extension_in_use(&self.flags, flags)
    }
}

// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the catalog, the gate evaluator, and the CLI.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::PlugstoreError;

/// Identifies the kind of capability an extension contributes.
///
/// The string form is the tag used in plugin manifests (e.g. `Page/Route`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum ExtensionKind {
    #[strum(serialize = "ModelDefinition")]
    #[serde(rename = "ModelDefinition")]
    ModelDefinition,
    #[strum(serialize = "FeatureFlag/Model")]
    #[serde(rename = "FeatureFlag/Model")]
    ModelFeatureFlag,
    #[strum(serialize = "NavItem/Href")]
    #[serde(rename = "NavItem/Href")]
    HrefNavItem,
    #[strum(serialize = "NavItem/ResourceNS")]
    #[serde(rename = "NavItem/ResourceNS")]
    ResourceNsNavItem,
    #[strum(serialize = "NavItem/ResourceCluster")]
    #[serde(rename = "NavItem/ResourceCluster")]
    ResourceClusterNavItem,
    #[strum(serialize = "Page/Route")]
    #[serde(rename = "Page/Route")]
    RoutePage,
    #[strum(serialize = "Page/Resource/List")]
    #[serde(rename = "Page/Resource/List")]
    ResourceListPage,
    #[strum(serialize = "Page/Resource/Details")]
    #[serde(rename = "Page/Resource/Details")]
    ResourceDetailsPage,
    #[strum(serialize = "YAMLTemplate")]
    #[serde(rename = "YAMLTemplate")]
    YamlTemplate,
    #[strum(serialize = "AddAction")]
    #[serde(rename = "AddAction")]
    AddAction,
    #[strum(serialize = "GlobalConfig")]
    #[serde(rename = "GlobalConfig")]
    GlobalConfig,
    #[strum(serialize = "PVCCreateProp")]
    #[serde(rename = "PVCCreateProp")]
    PvcCreateProp,
    #[strum(serialize = "Overview/CRD")]
    #[serde(rename = "Overview/CRD")]
    OverviewCrd,
}

impl ExtensionKind {
    /// Returns true for the three navigation item kinds.
    pub fn is_nav_item(self) -> bool {
        matches!(
            self,
            ExtensionKind::HrefNavItem
                | ExtensionKind::ResourceNsNavItem
                | ExtensionKind::ResourceClusterNavItem
        )
    }

    /// Returns true for route and resource page kinds.
    pub fn is_page(self) -> bool {
        matches!(
            self,
            ExtensionKind::RoutePage
                | ExtensionKind::ResourceListPage
                | ExtensionKind::ResourceDetailsPage
        )
    }
}

/// Snapshot of the session's feature flags.
///
/// Maps a flag name to its resolved value. A flag that has not been resolved
/// yet is simply absent, which is not the same as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagsObject(BTreeMap<String, bool>);

impl FlagsObject {
    /// Create an empty snapshot (every flag unresolved).
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a flag. `None` means the flag is unresolved.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    /// Returns true if the flag has been resolved to either value.
    pub fn is_resolved(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Set a flag, returning its previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: bool) -> Option<bool> {
        self.0.insert(name.into(), value)
    }

    /// Builder-style variant of [`FlagsObject::insert`].
    pub fn with(mut self, name: impl Into<String>, value: bool) -> Self {
        self.insert(name, value);
        self
    }

    /// Overlay `other` on top of `self`; values in `other` win.
    pub fn merge(&mut self, other: &FlagsObject) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), *value);
        }
    }

    /// Parse a `NAME=true|false` assignment as given on the command line.
    pub fn parse_assignment(input: &str) -> Result<(String, bool), PlugstoreError> {
        let (name, value) = input
            .split_once('=')
            .ok_or_else(|| PlugstoreError::InvalidFlag(input.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(PlugstoreError::InvalidFlag(input.to_string()));
        }
        let value = match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" => false,
            _ => return Err(PlugstoreError::InvalidFlag(input.to_string())),
        };
        Ok((name.to_string(), value))
    }

    /// Iterate over resolved flags in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of resolved flags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no flag is resolved.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for FlagsObject {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<BTreeMap<String, bool>> for FlagsObject {
    fn from(map: BTreeMap<String, bool>) -> Self {
        Self(map)
    }
}

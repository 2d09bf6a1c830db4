// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named bundles of extensions contributed by one plugin module.

use crate::extension::Extension;

/// A plugin and the extensions it declares, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePlugin {
    /// Unique plugin name, kept on every extension for provenance.
    pub name: String,
    /// One-line summary shown by `plugstore plugins`.
    pub description: Option<String>,
    pub extensions: Vec<Extension>,
}

impl ActivePlugin {
    pub fn new(name: impl Into<String>, extensions: Vec<Extension>) -> Self {
        Self {
            name: name.into(),
            description: None,
            extensions,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

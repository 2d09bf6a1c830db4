// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for plugstore.
//!
//! Provides the error type, the feature flag snapshot consumed by the gate
//! evaluator, and the tag enum naming every extension kind.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PlugstoreError;
pub use types::{ExtensionKind, FlagsObject};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn extension_kind_display_round_trips() {
        for kind in ExtensionKind::iter() {
            let s = kind.to_string();
            let parsed = ExtensionKind::from_str(&s).expect("should parse back");
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn extension_kind_uses_manifest_tags() {
        assert_eq!(ExtensionKind::RoutePage.to_string(), "Page/Route");
        assert_eq!(
            ExtensionKind::from_str("NavItem/ResourceNS").unwrap(),
            ExtensionKind::ResourceNsNavItem
        );
        let json = serde_json::to_string(&ExtensionKind::ModelFeatureFlag).unwrap();
        assert_eq!(json, "\"FeatureFlag/Model\"");
    }

    #[test]
    fn extension_kind_groups() {
        assert!(ExtensionKind::HrefNavItem.is_nav_item());
        assert!(!ExtensionKind::RoutePage.is_nav_item());
        assert!(ExtensionKind::ResourceDetailsPage.is_page());
        assert!(!ExtensionKind::AddAction.is_page());
    }

    #[test]
    fn flags_absent_is_not_false() {
        let flags = FlagsObject::new().with("OPENSHIFT", false);
        assert_eq!(flags.get("OPENSHIFT"), Some(false));
        assert_eq!(flags.get("SERVICE_CATALOG"), None);
        assert!(flags.is_resolved("OPENSHIFT"));
        assert!(!flags.is_resolved("SERVICE_CATALOG"));
    }

    #[test]
    fn flags_merge_overrides() {
        let mut base: FlagsObject = [("A", true), ("B", false)].into_iter().collect();
        let overlay = FlagsObject::new().with("B", true).with("C", false);
        base.merge(&overlay);
        assert_eq!(base.get("A"), Some(true));
        assert_eq!(base.get("B"), Some(true));
        assert_eq!(base.get("C"), Some(false));
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn parse_flag_assignment() {
        assert_eq!(
            FlagsObject::parse_assignment("OPENSHIFT=true").unwrap(),
            ("OPENSHIFT".to_string(), true)
        );
        assert_eq!(
            FlagsObject::parse_assignment(" KNATIVE = off ").unwrap(),
            ("KNATIVE".to_string(), false)
        );
        assert!(FlagsObject::parse_assignment("OPENSHIFT").is_err());
        assert!(FlagsObject::parse_assignment("=true").is_err());
        assert!(FlagsObject::parse_assignment("X=maybe").is_err());
    }

    #[test]
    fn manifest_error_gains_path() {
        let err = PlugstoreError::manifest("extensions must be an array").with_path("a/b.toml");
        let msg = err.to_string();
        assert!(msg.contains("a/b.toml"), "got: {msg}");
        assert!(msg.contains("extensions must be an array"));
    }

    #[test]
    fn check_failure_is_not_a_config_error() {
        let msg = PlugstoreError::CheckFailed { failed: 2 }.to_string();
        assert_eq!(msg, "2 check(s) failed");
    }

    #[test]
    fn flags_deserialize_from_json_map() {
        let flags: FlagsObject = serde_json::from_str(r#"{"OPENSHIFT": true}"#).unwrap();
        assert_eq!(flags.get("OPENSHIFT"), Some(true));
    }
}

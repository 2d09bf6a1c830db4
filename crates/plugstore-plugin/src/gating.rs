// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flag gate evaluator.
//!
//! An extension is in use when every required flag is resolved to `true`
//! and every disallowed flag is resolved to `false`. An unresolved flag
//! satisfies neither condition, so incomplete flag state keeps gated
//! extensions inactive.

use std::collections::HashSet;

use plugstore_core::FlagsObject;

use crate::extension::{ExtensionFlags, ExtensionWithMetadata};

/// Decide whether an extension with the given flag conditions is active.
pub fn is_extension_in_use(conditions: &ExtensionFlags, flags: &FlagsObject) -> bool {
    conditions
        .required
        .iter()
        .all(|name| flags.get(name) == Some(true))
        && conditions
            .disallowed
            .iter()
            .all(|name| flags.get(name) == Some(false))
}

/// Every flag name referenced by the given extensions, without duplicates.
///
/// Names appear in first-seen order: all required names of each extension,
/// then its disallowed names.
pub fn get_gating_flag_names<'a, I>(extensions: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ExtensionWithMetadata>,
{
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for ext in extensions {
        let flags = ext.flags();
        for name in flags.required.iter().chain(flags.disallowed.iter()) {
            if seen.insert(name.as_str()) {
                names.push(name.clone());
            }
        }
    }
    names
}

/// Gating flag names that the snapshot has not resolved yet.
pub fn missing_gating_flags<'a, I>(extensions: I, flags: &FlagsObject) -> Vec<String>
where
    I: IntoIterator<Item = &'a ExtensionWithMetadata>,
{
    get_gating_flag_names(extensions)
        .into_iter()
        .filter(|name| !flags.is_resolved(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(required: &[&str], disallowed: &[&str]) -> ExtensionFlags {
        ExtensionFlags {
            required: required.iter().map(|s| s.to_string()).collect(),
            disallowed: disallowed.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn required_flag_table() {
        let c = conditions(&["OPENSHIFT"], &[]);
        assert!(is_extension_in_use(&c, &FlagsObject::new().with("OPENSHIFT", true)));
        assert!(!is_extension_in_use(&c, &FlagsObject::new().with("OPENSHIFT", false)));
        assert!(!is_extension_in_use(&c, &FlagsObject::new()));
    }

    #[test]
    fn disallowed_flag_table() {
        let c = conditions(&[], &["SERVICE_CATALOG"]);
        assert!(is_extension_in_use(
            &c,
            &FlagsObject::new().with("SERVICE_CATALOG", false)
        ));
        assert!(!is_extension_in_use(
            &c,
            &FlagsObject::new().with("SERVICE_CATALOG", true)
        ));
        // Unresolved fails the strict `false` check.
        assert!(!is_extension_in_use(&c, &FlagsObject::new()));
    }

    #[test]
    fn empty_conditions_always_active() {
        let c = ExtensionFlags::default();
        assert!(is_extension_in_use(&c, &FlagsObject::new()));
        assert!(is_extension_in_use(&c, &FlagsObject::new().with("ANY", false)));
    }

    #[test]
    fn mixed_conditions_need_both() {
        let c = conditions(&["OPENSHIFT", "KNATIVE_SERVING"], &["CAN_LIST_NS"]);
        let all_good = FlagsObject::new()
            .with("OPENSHIFT", true)
            .with("KNATIVE_SERVING", true)
            .with("CAN_LIST_NS", false);
        assert!(is_extension_in_use(&c, &all_good));

        let one_required_missing = FlagsObject::new()
            .with("OPENSHIFT", true)
            .with("CAN_LIST_NS", false);
        assert!(!is_extension_in_use(&c, &one_required_missing));

        let disallowed_set = all_good.clone().with("CAN_LIST_NS", true);
        assert!(!is_extension_in_use(&c, &disallowed_set));
    }
}

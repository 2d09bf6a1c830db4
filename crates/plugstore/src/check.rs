// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `plugstore check` command implementation.
//!
//! Verifies that the configured plugin sources assemble into a catalog and
//! reports gating flags the configuration leaves unresolved.

use std::io::IsTerminal;

use plugstore_config::PlugstoreConfig;
use plugstore_core::PlugstoreError;
use plugstore_plugin::{missing_gating_flags, ActivePlugin, PluginStore};

use crate::session::{assemble_configured, load_manifests};

/// Status of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    fn new(name: &'static str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name,
            status,
            message: message.into(),
        }
    }
}

fn check_manifests(config: &PlugstoreConfig) -> (CheckResult, Option<Vec<ActivePlugin>>) {
    let Some(dir) = config.store.manifest_dir.as_deref() else {
        let result =
            CheckResult::new("manifests", CheckStatus::Pass, "no manifest directory configured");
        return (result, Some(Vec::new()));
    };
    match load_manifests(config) {
        Ok(plugins) => (
            CheckResult::new(
                "manifests",
                CheckStatus::Pass,
                format!("{} plugin(s) in {dir}", plugins.len()),
            ),
            Some(plugins),
        ),
        Err(e) => (
            CheckResult::new("manifests", CheckStatus::Fail, e.to_string()),
            None,
        ),
    }
}

fn check_catalog(
    config: &PlugstoreConfig,
    manifests: Vec<ActivePlugin>,
) -> (CheckResult, Option<PluginStore>) {
    match assemble_configured(config, manifests) {
        Ok(plugins) => {
            let store = PluginStore::new(plugins);
            let status = if store.is_empty() {
                CheckStatus::Warn
            } else {
                CheckStatus::Pass
            };
            let result = CheckResult::new(
                "catalog",
                status,
                format!(
                    "{} extension(s) from {} plugin(s)",
                    store.len(),
                    store.plugin_names().len()
                ),
            );
            (result, Some(store))
        }
        Err(e) => (
            CheckResult::new("catalog", CheckStatus::Fail, e.to_string()),
            None,
        ),
    }
}

fn check_flags(config: &PlugstoreConfig, store: &PluginStore) -> CheckResult {
    let missing = missing_gating_flags(store.get_all_extensions(), &config.flags_object());
    if missing.is_empty() {
        CheckResult::new("flags", CheckStatus::Pass, "all gating flags resolved")
    } else {
        CheckResult::new(
            "flags",
            CheckStatus::Warn,
            format!("unresolved: {}", missing.join(", ")),
        )
    }
}

/// Run every check against the configuration, in display order.
///
/// The manifest directory is read once; later checks reuse what it loaded
/// and are skipped when an earlier one fails.
pub fn run_checks(config: &PlugstoreConfig) -> Vec<CheckResult> {
    // Reaching this point means the config already loaded and validated.
    let mut results = vec![CheckResult::new(
        "config",
        CheckStatus::Pass,
        "loaded and validated",
    )];

    let (manifests, plugins) = check_manifests(config);
    results.push(manifests);
    let Some(plugins) = plugins else {
        return results;
    };

    let (catalog, store) = check_catalog(config, plugins);
    results.push(catalog);
    if let Some(store) = store {
        results.push(check_flags(config, &store));
    }
    results
}

/// Run the `plugstore check` command.
///
/// Fails when any check fails; warnings are printed but do not fail.
pub fn run_check(config: &PlugstoreConfig, plain: bool) -> Result<(), PlugstoreError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let results = run_checks(config);

    println!();
    println!("  plugstore check");
    println!("  {}", "-".repeat(50));

    for result in &results {
        let symbol = match (result.status, use_color) {
            (CheckStatus::Pass, true) => {
                use colored::Colorize;
                "✓".green().to_string()
            }
            (CheckStatus::Warn, true) => {
                use colored::Colorize;
                "!".yellow().to_string()
            }
            (CheckStatus::Fail, true) => {
                use colored::Colorize;
                "✗".red().to_string()
            }
            (CheckStatus::Pass, false) => "[OK]  ".to_string(),
            (CheckStatus::Warn, false) => "[WARN]".to_string(),
            (CheckStatus::Fail, false) => "[FAIL]".to_string(),
        };
        println!("    {symbol} {:<12} {}", result.name, result.message);
    }

    let failed = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();
    println!();
    if failed > 0 {
        return Err(PlugstoreError::CheckFailed { failed });
    }
    Ok(())
}

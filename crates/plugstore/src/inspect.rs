// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `plugstore list`, `active`, `gating-flags`, and `plugins` commands.
//!
//! Each command reads the assembled store; `--json` prints structured output
//! for scripting, otherwise a table is printed (colored on a TTY unless
//! `--plain`).

use std::io::IsTerminal;
use std::str::FromStr;

use plugstore_core::{ExtensionKind, FlagsObject, PlugstoreError};
use plugstore_plugin::{
    get_gating_flag_names, missing_gating_flags, ExtensionProperties, ExtensionWithMetadata,
    PluginStore,
};
use serde::Serialize;

/// One extension as printed by `list` and `active`.
#[derive(Debug, Serialize)]
pub struct ExtensionRow {
    pub plugin: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub summary: String,
    pub required: Vec<String>,
    pub disallowed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl ExtensionRow {
    fn new(ext: &ExtensionWithMetadata, flags: Option<&FlagsObject>) -> Self {
        Self {
            plugin: ext.plugin().to_string(),
            kind: ext.kind().to_string(),
            summary: summarize(ext.properties()),
            required: ext.flags().required.clone(),
            disallowed: ext.flags().disallowed.clone(),
            active: flags.map(|f| ext.is_in_use(f)),
        }
    }
}

/// Short human-readable description of an extension's properties.
pub fn summarize(properties: &ExtensionProperties) -> String {
    match properties {
        ExtensionProperties::ModelDefinition(p) => format!("{} models", p.models.len()),
        ExtensionProperties::ModelFeatureFlag(p) => {
            format!("{} -> {}", p.model.reference(), p.flag)
        }
        ExtensionProperties::HrefNavItem(p) => format!("{} / {} ({})", p.section, p.name, p.href),
        ExtensionProperties::ResourceNsNavItem(p) | ExtensionProperties::ResourceClusterNavItem(p) => {
            format!("{} / {} ({})", p.section, p.name, p.resource)
        }
        ExtensionProperties::RoutePage(p) => p.path.join(", "),
        ExtensionProperties::ResourceListPage(p) | ExtensionProperties::ResourceDetailsPage(p) => {
            p.model.reference()
        }
        ExtensionProperties::YamlTemplate(p) => match &p.name {
            Some(name) => format!("{} ({name})", p.model.reference()),
            None => p.model.reference(),
        },
        ExtensionProperties::AddAction(p) => format!("{} ({})", p.label, p.url),
        ExtensionProperties::GlobalConfig(p) => format!("{}/{}", p.namespace, p.name),
        ExtensionProperties::PvcCreateProp(p) => format!("{} ({})", p.label, p.path),
        ExtensionProperties::OverviewCrd(p) => p.resources.join(", "),
    }
}

/// Parse a `--kind` argument into its tag.
pub fn parse_kind(kind: &str) -> Result<ExtensionKind, PlugstoreError> {
    ExtensionKind::from_str(kind).map_err(|_| {
        PlugstoreError::Config(format!("unknown extension type `{kind}`"))
    })
}

fn matching<'a>(
    store: &'a PluginStore,
    kind: Option<ExtensionKind>,
    plugin: Option<&'a str>,
) -> impl Iterator<Item = &'a ExtensionWithMetadata> + 'a {
    store.get_all_extensions().iter().filter(move |e| {
        kind.is_none_or(|k| e.kind() == k) && plugin.is_none_or(|p| e.plugin() == p)
    })
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
    );
}

fn print_rows(title: &str, rows: &[ExtensionRow], use_color: bool) {
    println!();
    println!("  {title}");
    println!("  {}", "-".repeat(60));
    for row in rows {
        let gate = format_gate(&row.required, &row.disallowed);
        let marker = match (row.active, use_color) {
            (Some(true), true) => {
                use colored::Colorize;
                "✓".green().to_string()
            }
            (Some(false), true) => {
                use colored::Colorize;
                "✗".red().to_string()
            }
            (Some(true), false) => "[ON] ".to_string(),
            (Some(false), false) => "[OFF]".to_string(),
            (None, _) => " ".to_string(),
        };
        println!(
            "  {marker} {:<16} {:<24} {}{gate}",
            row.plugin, row.kind, row.summary
        );
    }
    println!();
}

fn format_gate(required: &[String], disallowed: &[String]) -> String {
    let mut parts = Vec::new();
    if !required.is_empty() {
        parts.push(format!("+{}", required.join(" +")));
    }
    if !disallowed.is_empty() {
        parts.push(format!("-{}", disallowed.join(" -")));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("  [{}]", parts.join(" "))
    }
}

fn use_color(plain: bool) -> bool {
    !plain && std::io::stdout().is_terminal()
}

/// Rows for every extension matching the filters, without activation state.
pub fn list_rows(
    store: &PluginStore,
    kind: Option<ExtensionKind>,
    plugin: Option<&str>,
) -> Vec<ExtensionRow> {
    matching(store, kind, plugin)
        .map(|e| ExtensionRow::new(e, None))
        .collect()
}

/// Rows for every extension matching the filters, with activation state.
pub fn active_rows(
    store: &PluginStore,
    flags: &FlagsObject,
    kind: Option<ExtensionKind>,
    only_active: bool,
) -> Vec<ExtensionRow> {
    matching(store, kind, None)
        .filter(|e| !only_active || e.is_in_use(flags))
        .map(|e| ExtensionRow::new(e, Some(flags)))
        .collect()
}

/// Run `plugstore list`.
pub fn run_list(
    store: &PluginStore,
    kind: Option<&str>,
    plugin: Option<&str>,
    json: bool,
    plain: bool,
) -> Result<(), PlugstoreError> {
    let kind = kind.map(parse_kind).transpose()?;
    let rows = list_rows(store, kind, plugin);
    if json {
        print_json(&rows);
    } else {
        print_rows(&format!("{} extensions", rows.len()), &rows, use_color(plain));
    }
    Ok(())
}

/// Run `plugstore active`.
pub fn run_active(
    store: &PluginStore,
    flags: &FlagsObject,
    kind: Option<&str>,
    all: bool,
    json: bool,
    plain: bool,
) -> Result<(), PlugstoreError> {
    let kind = kind.map(parse_kind).transpose()?;
    let rows = active_rows(store, flags, kind, !all);
    tracing::debug!(flags = flags.len(), rows = rows.len(), "evaluated extension gates");
    if json {
        print_json(&rows);
    } else {
        let active = rows.iter().filter(|r| r.active == Some(true)).count();
        print_rows(
            &format!("{active} of {} extensions active", store.len()),
            &rows,
            use_color(plain),
        );
    }
    Ok(())
}

/// Gating flag names with their current resolution.
#[derive(Debug, Serialize)]
pub struct GatingFlag {
    pub name: String,
    pub value: Option<bool>,
}

pub fn gating_flags(store: &PluginStore, flags: &FlagsObject, missing_only: bool) -> Vec<GatingFlag> {
    let names = if missing_only {
        missing_gating_flags(store.get_all_extensions(), flags)
    } else {
        get_gating_flag_names(store.get_all_extensions())
    };
    names
        .into_iter()
        .map(|name| GatingFlag {
            value: flags.get(&name),
            name,
        })
        .collect()
}

/// Run `plugstore gating-flags`.
pub fn run_gating_flags(
    store: &PluginStore,
    flags: &FlagsObject,
    missing_only: bool,
    json: bool,
) -> Result<(), PlugstoreError> {
    let entries = gating_flags(store, flags, missing_only);
    if json {
        print_json(&entries);
    } else {
        for entry in &entries {
            match entry.value {
                Some(v) => println!("{} = {v}", entry.name),
                None => println!("{} (unresolved)", entry.name),
            }
        }
    }
    Ok(())
}

/// Per-plugin summary for `plugstore plugins`.
#[derive(Debug, Serialize)]
pub struct PluginSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub extensions: usize,
    pub gated: usize,
}

pub fn plugin_summaries(store: &PluginStore, query: Option<&str>) -> Vec<PluginSummary> {
    let query = query.map(str::to_lowercase);
    store
        .plugin_names()
        .iter()
        .filter(|name| {
            query
                .as_deref()
                .is_none_or(|q| name.to_lowercase().contains(q))
        })
        .map(|name| {
            let owned: Vec<&ExtensionWithMetadata> = store
                .get_all_extensions()
                .iter()
                .filter(|e| e.plugin() == name)
                .collect();
            PluginSummary {
                name: name.clone(),
                description: store.plugin_description(name).map(str::to_string),
                extensions: owned.len(),
                gated: owned.iter().filter(|e| !e.flags().is_empty()).count(),
            }
        })
        .collect()
}

/// Run `plugstore plugins`.
pub fn run_plugins(store: &PluginStore, query: Option<&str>, json: bool) -> Result<(), PlugstoreError> {
    let summaries = plugin_summaries(store, query);
    if json {
        print_json(&summaries);
    } else {
        for s in &summaries {
            println!("{:<24} {:>3} extensions ({} gated)", s.name, s.extensions, s.gated);
            if let Some(description) = &s.description {
                println!("    {description}");
            }
        }
    }
    Ok(())
}

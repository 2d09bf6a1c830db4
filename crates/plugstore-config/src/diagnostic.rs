// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns figment extraction failures into miette diagnostics.
//!
//! Unknown keys and type mismatches are located in the TOML text they came
//! from so the rendered report can underline them; unknown keys also get a
//! "did you mean" hint picked by Jaro-Winkler similarity.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Similarity a known key needs before it is offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// The text of one TOML layer, kept so diagnostics can point into it.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// File path, or `<inline>` for string input.
    pub name: String,
    pub content: String,
}

impl ConfigSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(code(plugstore::config::unknown_key), help("{}", unknown_key_help(suggestion.as_deref(), valid_keys)))]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        /// Keys accepted in the same table, comma-separated.
        valid_keys: String,
        #[label("not a recognized key here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("wrong type for `{key}`: found {found}")]
    #[diagnostic(code(plugstore::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        found: String,
        expected: String,
        #[label("wrong type")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value parsed but failed a semantic check.
    #[error("validation error: {message}")]
    #[diagnostic(code(plugstore::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(plugstore::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None if valid_keys.is_empty() => "remove this key".to_string(),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert every error carried by a `figment::Error` into a diagnostic.
pub fn figment_to_config_errors(err: figment::Error, sources: &[ConfigSource]) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let (span, src) = locate(&error, &error.path, field, sources);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, expected),
                    valid_keys: expected.join(", "),
                    span,
                    src,
                }
            }
            Kind::InvalidType(found, expected) => {
                let (table, key) = match error.path.split_last() {
                    Some((last, parents)) => (parents, last.as_str()),
                    None => (&[][..], ""),
                };
                let (span, src) = if key.is_empty() {
                    (None, None)
                } else {
                    locate(&error, table, key, sources)
                };
                ConfigError::InvalidType {
                    key: error.path.join("."),
                    found: found.to_string(),
                    expected: expected.to_string(),
                    span,
                    src,
                }
            }
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// Pick the source the error came from and find `key` under `table` in it.
fn locate(
    error: &figment::error::Error,
    table: &[String],
    key: &str,
    sources: &[ConfigSource],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let file = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // figment records files by resolved path and strings not at all; a
    // single source is unambiguous either way.
    let source = file
        .and_then(|path| sources.iter().find(|s| s.name == path))
        .or(match sources {
            [only] => Some(only),
            _ => None,
        });

    source
        .and_then(|s| {
            let offset = find_key_offset(&s.content, table, key)?;
            Some((
                Some(SourceSpan::new(offset.into(), key.len())),
                Some(NamedSource::new(&s.name, s.content.clone())),
            ))
        })
        .unwrap_or((None, None))
}

/// Byte offset of `key` inside the `[table]` section of some TOML text.
///
/// Only the first element of `table` is used to find the header; an empty
/// path searches from the top of the document.
pub fn find_key_offset(content: &str, table: &[String], key: &str) -> Option<usize> {
    let start = match table.first() {
        None => 0,
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header)? + header.len()
        }
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        let is_key = trimmed
            .strip_prefix(key)
            .is_some_and(|rest| rest.starts_with([' ', '\t', '=']));
        if is_key {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }
    None
}

/// Closest valid key to `unknown`, if any clears the similarity threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Print diagnostics to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut out = String::new();
        match handler.render_report(&mut out, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{out}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORE_KEYS: &[&str] = &["manifest_dir", "include_builtin", "disabled_plugins"];

    #[test]
    fn suggests_closest_key() {
        assert_eq!(
            suggest_key("manifest_dri", STORE_KEYS).as_deref(),
            Some("manifest_dir")
        );
        assert_eq!(suggest_key("levle", &["level"]).as_deref(), Some("level"));
        assert_eq!(suggest_key("disabled", STORE_KEYS).as_deref(), Some("disabled_plugins"));
    }

    #[test]
    fn no_suggestion_for_distant_key() {
        assert_eq!(suggest_key("zzzzzz", STORE_KEYS), None);
        assert_eq!(suggest_key("anything", &[]), None);
    }

    #[test]
    fn offset_is_found_inside_section() {
        let content = "[log]\nlevel = \"info\"\n\n[store]\nmanifest_dri = \"/x\"\n";
        let o = find_key_offset(content, &["store".to_string()], "manifest_dri").unwrap();
        assert_eq!(&content[o..o + 12], "manifest_dri");
    }

    #[test]
    fn offset_skips_key_prefixes() {
        // `level_x` must not match `level`.
        let content = "[log]\nlevel_x = 1\n  level = \"debug\"\n";
        let o = find_key_offset(content, &["log".to_string()], "level").unwrap();
        assert_eq!(&content[o..o + 5], "level");
        assert_eq!(o, content.find("  level").unwrap() + 2);
    }

    #[test]
    fn offset_handles_crlf() {
        let content = "[store]\r\nfoo = 1\r\nmanifest_dri = \"/x\"\r\n";
        let o = find_key_offset(content, &["store".to_string()], "manifest_dri").unwrap();
        assert_eq!(&content[o..o + 12], "manifest_dri");
    }

    #[test]
    fn missing_section_has_no_offset() {
        assert_eq!(
            find_key_offset("[log]\nlevel = 1\n", &["store".to_string()], "level"),
            None
        );
    }

    #[test]
    fn help_text_mentions_suggestion() {
        assert_eq!(
            unknown_key_help(Some("level"), "level"),
            "did you mean `level`? Valid keys: level"
        );
        assert_eq!(unknown_key_help(None, ""), "remove this key");
    }
}

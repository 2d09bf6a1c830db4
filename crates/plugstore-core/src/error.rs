// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for plugstore.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across the plugstore crates.
#[derive(Debug, Error)]
pub enum PlugstoreError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// A plugin manifest is structurally invalid.
    #[error("invalid plugin manifest {}: {message}", path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<inline>".to_string()))]
    Manifest {
        path: Option<PathBuf>,
        message: String,
    },

    /// Reading a manifest file or directory failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A flag assignment could not be parsed (expected `NAME=true|false`).
    #[error("invalid flag assignment `{0}`, expected NAME=true|false")]
    InvalidFlag(String),

    /// One or more `plugstore check` diagnostics failed.
    #[error("{failed} check(s) failed")]
    CheckFailed { failed: usize },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PlugstoreError {
    /// Build a manifest error that is not tied to a file.
    pub fn manifest(message: impl Into<String>) -> Self {
        PlugstoreError::Manifest {
            path: None,
            message: message.into(),
        }
    }

    /// Attach a file path to a manifest error. Other variants pass through.
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            PlugstoreError::Manifest { path: None, message } => PlugstoreError::Manifest {
                path: Some(file.into()),
                message,
            },
            other => other,
        }
    }
}

// SPDX-FileCopyrightText: 2026 Plugstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugstore - inspect a plugin extension catalog and its feature-flag gating.
//!
//! This is the binary entry point.

mod check;
mod inspect;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use plugstore_config::PlugstoreConfig;
use plugstore_core::PlugstoreError;

/// Plugstore - inspect a plugin extension catalog and its feature-flag gating.
#[derive(Parser, Debug)]
#[command(name = "plugstore", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the default hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List every extension in the catalog.
    List {
        /// Only show extensions of this type (e.g. "Page/Route").
        #[arg(long)]
        kind: Option<String>,
        /// Only show extensions contributed by this plugin.
        #[arg(long)]
        plugin: Option<String>,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show which extensions are active under the current flags.
    Active {
        /// Override a flag, NAME=true|false (repeatable).
        #[arg(long = "flag", value_name = "NAME=BOOL")]
        flags: Vec<String>,
        /// Only show extensions of this type.
        #[arg(long)]
        kind: Option<String>,
        /// Include inactive extensions.
        #[arg(long)]
        all: bool,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List the flag names that gate at least one extension.
    GatingFlags {
        /// Only show flags with no resolved value.
        #[arg(long)]
        missing: bool,
        /// Override a flag, NAME=true|false (repeatable).
        #[arg(long = "flag", value_name = "NAME=BOOL")]
        flags: Vec<String>,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List registered plugins.
    Plugins {
        /// Case-insensitive name filter.
        query: Option<String>,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Validate configuration and plugin manifests.
    Check,
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => plugstore_config::load_and_validate_path(path),
        None => plugstore_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            plugstore_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    let Some(command) = cli.command else {
        println!("plugstore: use --help for available commands");
        return;
    };

    if let Err(e) = run(command, &config, cli.plain) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &PlugstoreConfig, plain: bool) -> Result<(), PlugstoreError> {
    match command {
        Commands::List { kind, plugin, json } => {
            let store = session::build_store(config)?;
            inspect::run_list(&store, kind.as_deref(), plugin.as_deref(), json, plain)
        }
        Commands::Active {
            flags,
            kind,
            all,
            json,
        } => {
            let flags = session::resolve_flags(config, &flags)?;
            let store = session::build_store(config)?;
            inspect::run_active(&store, &flags, kind.as_deref(), all, json, plain)
        }
        Commands::GatingFlags {
            missing,
            flags,
            json,
        } => {
            let flags = session::resolve_flags(config, &flags)?;
            let store = session::build_store(config)?;
            inspect::run_gating_flags(&store, &flags, missing, json)
        }
        Commands::Plugins { query, json } => {
            let store = session::build_store(config)?;
            inspect::run_plugins(&store, query.as_deref(), json)
        }
        Commands::Check => check::run_check(config, plain),
    }
}

/// Initialize the tracing subscriber on stderr so stdout stays parseable.
///
/// `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "plugstore={log_level},plugstore_plugin={log_level},plugstore_config={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_flags() {
        let cli = Cli::try_parse_from([
            "plugstore",
            "active",
            "--flag",
            "OPENSHIFT=true",
            "--flag",
            "KNATIVE_EVENTING=false",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Active { flags, json, .. }) => {
                assert_eq!(flags, vec!["OPENSHIFT=true", "KNATIVE_EVENTING=false"]);
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["plugstore", "check", "--config", "/tmp/p.toml", "--plain"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/p.toml")));
        assert!(cli.plain);
        assert!(matches!(cli.command, Some(Commands::Check)));
    }

    #[test]
    fn gating_flags_subcommand_name() {
        let cli = Cli::try_parse_from(["plugstore", "gating-flags", "--missing"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::GatingFlags { missing: true, .. })
        ));
    }

    #[test]
    fn run_list_on_defaults() {
        let config = PlugstoreConfig::default();
        assert!(run(
            Commands::List {
                kind: Some("Page/Route".to_string()),
                plugin: None,
                json: true,
            },
            &config,
            true,
        )
        .is_ok());
    }

    #[test]
    fn run_rejects_bad_flag_assignment() {
        let config = PlugstoreConfig::default();
        let err = run(
            Commands::Active {
                flags: vec!["OPENSHIFT=maybe".to_string()],
                kind: None,
                all: false,
                json: true,
            },
            &config,
            true,
        )
        .unwrap_err();
        assert!(matches!(err, PlugstoreError::InvalidFlag(_)));
    }
}

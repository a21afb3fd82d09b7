//! Command-line interface for proptree.
//!
//! # Available Commands
//!
//! - `tree` - Build a property tree from a path list (or from annotations)
//!   and print it, its key index, or a single key lookup
//! - `extract` - Print the values found at one depth of a nested JSON mapping
//! - `properties` - Summarise the property paths of GeoJSON annotations
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only log errors
//! - `--config` - Path to a custom config file
//!
//! # Example
//!
//! ```bash
//! proptree tree paths.txt --ignore prop3,sub_prop3
//! proptree --verbose properties annotations.json --format json
//! proptree extract metadata.json --depth 2
//! ```

mod common;
mod extract;
mod properties;
mod tree;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::ProptreeConfig;

/// Runtime configuration for CLI execution.
///
/// Built from the global flags and handed to the command explicitly, so
/// tests can drive [`Cli::execute_with_config`] without touching the process
/// environment.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is unset (`"debug"`, `"warn"`, ...).
    pub log_level: Option<String>,

    /// Config file to load instead of the default location.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the stderr tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence over [`log_level`](Self::log_level).
    /// Calling this more than once is harmless; later calls are ignored.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("warn"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Top-level command-line interface.
#[derive(Parser)]
#[command(
    name = "proptree",
    about = "Browse nested annotation properties as trees",
    version,
    long_about = "proptree turns nested annotation property paths into keyed trees for tree-select widgets, and extracts nested metadata values."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug) logging on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a custom config file
    ///
    /// Overrides `PROPTREE_CONFIG_PATH` and `~/.proptree/config.toml`.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and display a property tree.
    ///
    /// See [`tree::TreeCommand`] for options.
    Tree(tree::TreeCommand),

    /// Extract the values at one depth of a nested JSON mapping.
    ///
    /// See [`extract::ExtractCommand`] for options.
    Extract(extract::ExtractCommand),

    /// Summarise the properties of GeoJSON annotations.
    ///
    /// See [`properties::PropertiesCommand`] for options.
    Properties(properties::PropertiesCommand),
}

impl Cli {
    /// Execute with the configuration derived from the parsed flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let settings = ProptreeConfig::load_with_optional(config.config_path.clone()).await?;

        match self.command {
            Commands::Tree(cmd) => cmd.execute(&settings).await,
            Commands::Extract(cmd) => cmd.execute().await,
            Commands::Properties(cmd) => cmd.execute(&settings).await,
        }
    }
}

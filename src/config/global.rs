//! User-level configuration.
//!
//! **Location:**
//! - Unix/macOS: `~/.proptree/config.toml`
//! - Windows: `%LOCALAPPDATA%\proptree\config.toml`
//!
//! The location can be overridden using the `PROPTREE_CONFIG_PATH` environment
//! variable or the `--config` flag. A missing file means defaults.
//!
//! ```toml
//! delimiter = " --> "
//! root_title = "Features"
//! ignore = ["_id", "bbox"]
//! nested_depth = 4
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::core::ProptreeError;
use crate::path::{DEFAULT_DELIMITER, PathSegmenter};
use crate::properties::{DEFAULT_NESTED_DEPTH, SummaryOptions};
use crate::tree::{DEFAULT_ROOT_TITLE, TreeBuilder};

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "PROPTREE_CONFIG_PATH";

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProptreeConfig {
    /// Delimiter between path segments when paths are rendered.
    pub delimiter: String,
    /// Label of the synthetic tree root.
    pub root_title: String,
    /// Segment labels (for trees) and property names or paths (for
    /// summaries) to leave out.
    pub ignore: Vec<String>,
    /// Maximum depth when flattening nested properties.
    pub nested_depth: usize,
}

impl Default for ProptreeConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            root_title: DEFAULT_ROOT_TITLE.to_string(),
            ignore: Vec::new(),
            nested_depth: DEFAULT_NESTED_DEPTH,
        }
    }
}

impl ProptreeConfig {
    /// Load from `path` if given, else from `PROPTREE_CONFIG_PATH`, else
    /// from the default location. A file that does not exist yields the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, is not valid
    /// TOML, or holds an invalid delimiter.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => match std::env::var_os(CONFIG_PATH_ENV) {
                Some(env_path) => PathBuf::from(env_path),
                None => Self::default_path()?,
            },
        };

        if path.exists() {
            Self::load_from(&path).await
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// holds an invalid delimiter.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse TOML content and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ProptreeError::TomlError`] for malformed TOML and
    /// [`ProptreeError::ConfigError`] for a blank delimiter.
    pub fn parse(content: &str) -> std::result::Result<Self, ProptreeError> {
        let config: Self = toml::from_str(content)?;
        config.segmenter()?;
        Ok(config)
    }

    /// Default config file location.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be
    /// determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("proptree")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".proptree")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Segmenter for the configured delimiter.
    ///
    /// # Errors
    ///
    /// Returns [`ProptreeError::ConfigError`] for a blank delimiter.
    pub fn segmenter(&self) -> std::result::Result<PathSegmenter, ProptreeError> {
        PathSegmenter::new(self.delimiter.clone())
    }

    /// Tree builder carrying the configured delimiter, root title and
    /// ignore list, plus `extra_ignore`.
    ///
    /// # Errors
    ///
    /// Returns [`ProptreeError::ConfigError`] for a blank delimiter.
    pub fn tree_builder(
        &self,
        extra_ignore: &[String],
    ) -> std::result::Result<TreeBuilder, ProptreeError> {
        Ok(TreeBuilder::new()
            .with_segmenter(self.segmenter()?)
            .with_root_title(self.root_title.clone())
            .with_ignore(self.ignore.iter().chain(extra_ignore).cloned()))
    }

    /// Summary options from the configuration, plus `extra_ignore`.
    ///
    /// # Errors
    ///
    /// Returns [`ProptreeError::ConfigError`] for a blank delimiter.
    pub fn summary_options(
        &self,
        extra_ignore: &[String],
    ) -> std::result::Result<SummaryOptions, ProptreeError> {
        Ok(SummaryOptions {
            ignore: self.ignore.iter().chain(extra_ignore).cloned().collect(),
            nested_depth: self.nested_depth,
            segmenter: self.segmenter()?,
        })
    }
}

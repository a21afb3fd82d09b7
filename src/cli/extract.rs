//! Extract nested metadata values at one depth.
//!
//! ```bash
//! proptree extract metadata.json --depth 2
//! proptree extract metadata.json -d 0 --format text
//! ```
//!
//! Depth 0 lists the top-level values, depth 1 the values one mapping
//! further in, and so on. Values are printed in key order.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use super::common::read_json;
use crate::nested::{NestedDepthExtractor, PropValue};

#[derive(Args, Debug)]
pub struct ExtractCommand {
    /// JSON file holding a nested object
    input: PathBuf,

    /// Nesting depth to extract (0 = top-level values)
    #[arg(short = 'd', long)]
    depth: usize,

    /// Output format (json, text)
    #[arg(short = 'f', long, default_value = "json")]
    format: String,
}

impl ExtractCommand {
    pub async fn execute(self) -> Result<()> {
        self.validate_arguments()?;

        let data = PropValue::from(read_json(&self.input).await?);
        let extractor = NestedDepthExtractor::new(&data)
            .with_context(|| format!("Cannot extract values from {}", self.input.display()))?;

        let values: Vec<serde_json::Value> =
            extractor.at_depth(self.depth).map(PropValue::to_json).collect();
        debug!(depth = self.depth, count = values.len(), "Extracted values");

        for line in self.render(&values)? {
            println!("{line}");
        }
        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "json" | "text" => Ok(()),
            _ => Err(anyhow::anyhow!(
                "Invalid format '{}'. Valid formats are: json, text",
                self.format
            )),
        }
    }

    fn render(&self, values: &[serde_json::Value]) -> Result<Vec<String>> {
        if self.format == "json" {
            return Ok(vec![serde_json::to_string_pretty(values)?]);
        }

        // Strings print bare, everything else as compact JSON.
        Ok(values
            .iter()
            .map(|value| match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect())
    }
}

//! Summarise the properties of GeoJSON annotations.
//!
//! ```bash
//! proptree properties annotations.json
//! proptree properties annotations.json --ignore _id --nested-depth 2 --format json
//! ```
//!
//! The input is one feature collection or an array of them. The text output
//! lists each property path with a short description of its values; the
//! JSON output is the full [`PropertySummary`].

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::{annotation_list, read_json, split_ignore};
use crate::config::ProptreeConfig;
use crate::properties::{NumericStats, PropertyStats, PropertySummary};

#[derive(Args, Debug)]
pub struct PropertiesCommand {
    /// GeoJSON file: a feature collection or an array of them
    input: PathBuf,

    /// Property names or paths to leave out (comma-separated or repeated)
    #[arg(short = 'i', long)]
    ignore: Vec<String>,

    /// Maximum nesting depth of flattened paths (overrides `nested_depth`)
    #[arg(long)]
    nested_depth: Option<usize>,

    /// Output format (text, json)
    #[arg(short = 'f', long, default_value = "text")]
    format: String,
}

impl PropertiesCommand {
    pub async fn execute(self, config: &ProptreeConfig) -> Result<()> {
        self.validate_arguments()?;

        let mut options = config.summary_options(&split_ignore(&self.ignore))?;
        if let Some(depth) = self.nested_depth {
            options.nested_depth = depth;
        }

        let annotations = annotation_list(read_json(&self.input).await?);
        let summary = PropertySummary::from_annotations(&annotations, &options)
            .with_context(|| format!("Failed to read annotations from {}", self.input.display()))?;

        if self.format == "json" {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }

        if !summary.annotation_names.is_empty() {
            println!("{}", summary.annotation_names.join(", ").bold());
        }
        if summary.paths.is_empty() {
            println!("{}", "No properties found".yellow());
            return Ok(());
        }
        for path in &summary.paths {
            match summary.stats.get(path) {
                Some(stats) => println!("{} {}", path.cyan(), describe(stats).bright_black()),
                None => println!("{}", path.cyan()),
            }
        }
        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "text" | "json" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid format '{}'. Valid formats are: text, json",
                    self.format
                ));
            }
        }

        if self.nested_depth == Some(0) {
            return Err(anyhow::anyhow!("Nested depth must be at least 1"));
        }

        Ok(())
    }
}

fn describe(stats: &PropertyStats) -> String {
    match stats {
        PropertyStats::Numeric(NumericStats {
            min, max, distinct, ..
        }) => format!("(numeric, {min} to {max}, {distinct} distinct)"),
        PropertyStats::Categorical { unique, .. } if unique.len() <= 5 => {
            format!("(categorical: {})", unique.join(", "))
        }
        PropertyStats::Categorical { distinct, .. } => format!("(categorical, {distinct} values)"),
    }
}

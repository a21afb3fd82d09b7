//! Display property trees.
//!
//! The `tree` command reads a flat list of property paths, merges them into a
//! keyed tree and prints it, similar to `cargo tree`.
//!
//! # Examples
//!
//! Display the tree of a path list, hiding two labels:
//! ```bash
//! proptree tree paths.txt --ignore prop3,sub_prop3
//! ```
//!
//! Build the tree from the properties of GeoJSON annotations:
//! ```bash
//! proptree tree annotations.json --geojson
//! ```
//!
//! Translate a selected key back into its property path:
//! ```bash
//! proptree tree paths.txt --lookup 0-1-0
//! ```
//!
//! # Output Format
//!
//! ## Tree Format (Default)
//! ```text
//! Features (0)
//! ├── prop5 (0-0)
//! │   ├── sub_prop1 (0-0-0)
//! │   │   ├── sub_sub_prop1 (0-0-0-0)
//! │   │   └── sub_sub_prop2 (0-0-0-1)
//! │   └── sub_prop2 (0-0-1)
//! ├── prop4 (0-1)
//! │   ├── sub_prop1 (0-1-0)
//! │   └── sub_prop2 (0-1-1)
//! ├── prop1 (0-2)
//! └── prop2 (0-3)
//! ```
//!
//! ## JSON Format
//! `{"tree": {"title": .., "key": .., "children": [..]}, "keys": {"0-0": "prop5", ..}}`

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

use super::common::{annotation_list, path_lines, read_input, split_ignore};
use crate::config::ProptreeConfig;
use crate::core::ProptreeError;
use crate::properties::PropertySummary;
use crate::tree::{KeyIndex, NodeRef, PropertyTree, TreeBuilder};

/// Command to build and display a property tree.
#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Input file: one path per line, a JSON array of path strings, or
    /// GeoJSON annotations with `--geojson`
    input: PathBuf,

    /// Segment labels that must not create nodes (comma-separated or repeated)
    ///
    /// Merged with the `ignore` list of the config file.
    #[arg(short = 'i', long)]
    ignore: Vec<String>,

    /// Label of the tree root (overrides `root_title` from the config)
    #[arg(short = 't', long)]
    title: Option<String>,

    /// Read GeoJSON annotations and build the tree from their property paths
    #[arg(long)]
    geojson: bool,

    /// Output format (tree, json, text)
    #[arg(short = 'f', long, default_value = "tree")]
    format: String,

    /// Maximum depth to display (unlimited if not specified)
    #[arg(short = 'd', long)]
    depth: Option<usize>,

    /// Print only the property path recorded for this key
    #[arg(long, conflicts_with = "key_for")]
    lookup: Option<String>,

    /// Print only the key generated for this property path
    #[arg(long)]
    key_for: Option<String>,
}

impl TreeCommand {
    pub async fn execute(self, config: &ProptreeConfig) -> Result<()> {
        self.validate_arguments()?;

        let builder = self.tree_builder(config)?;
        let (tree, index) = self.build(&builder, config).await?;

        if let Some(key) = &self.lookup {
            println!("{}", index.resolve(key)?);
            return Ok(());
        }

        if let Some(path) = &self.key_for {
            let key = index
                .key_for(path)
                .or_else(|| builder.locate(&tree, path).map(|node| node.key()))
                .ok_or_else(|| {
                    ProptreeError::invalid_input(format!("no node was generated for path '{path}'"))
                })?;
            println!("{key}");
            return Ok(());
        }

        match self.format.as_str() {
            "json" => self.output_json(&tree, &index)?,
            "text" => self.output_text(&tree),
            _ => self.output_tree(&tree),
        }

        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "tree" | "json" | "text" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid format '{}'. Valid formats are: tree, json, text",
                    self.format
                ));
            }
        }

        if self.depth == Some(0) {
            return Err(anyhow::anyhow!("Depth must be at least 1"));
        }

        Ok(())
    }

    fn tree_builder(&self, config: &ProptreeConfig) -> Result<TreeBuilder> {
        let mut builder = config.tree_builder(&split_ignore(&self.ignore))?;
        if let Some(title) = &self.title {
            builder = builder.with_root_title(title.clone());
        }
        Ok(builder)
    }

    async fn build(
        &self,
        builder: &TreeBuilder,
        config: &ProptreeConfig,
    ) -> Result<(PropertyTree, KeyIndex)> {
        let content = read_input(&self.input).await?;

        if self.geojson {
            let value: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON in {}", self.input.display()))?;
            let options = config.summary_options(&split_ignore(&self.ignore))?;
            let summary = PropertySummary::from_annotations(&annotation_list(value), &options)
                .with_context(|| format!("Failed to read annotations from {}", self.input.display()))?;
            debug!(paths = summary.paths.len(), "Building tree from annotation properties");
            return Ok(builder.build_from_strings(&summary.paths));
        }

        if content.trim_start().starts_with('[') {
            let value: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON in {}", self.input.display()))?;
            return builder
                .build_from_json(&value)
                .with_context(|| format!("Invalid path list in {}", self.input.display()));
        }

        Ok(builder.build_from_strings(&path_lines(&content)))
    }

    fn output_tree(&self, tree: &PropertyTree) {
        let root = tree.root();
        println!(
            "{} {}",
            root.label().cyan().bold(),
            format!("({})", root.key()).bright_black()
        );

        if tree.is_empty() {
            println!("{}", "(no properties)".bright_black());
            return;
        }

        let count = root.child_count();
        for (i, child) in root.children().enumerate() {
            self.print_node(child, "", i == count - 1, 0);
        }
    }

    fn print_node(&self, node: NodeRef<'_>, prefix: &str, is_last: bool, current_depth: usize) {
        if let Some(max_depth) = self.depth
            && current_depth >= max_depth
        {
            return;
        }

        let connector = if is_last { "└── " } else { "├── " };
        println!(
            "{}{}{} {}",
            prefix,
            connector,
            node.label().cyan(),
            format!("({})", node.key()).bright_black()
        );

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };

        let count = node.child_count();
        for (i, child) in node.children().enumerate() {
            self.print_node(child, &child_prefix, i == count - 1, current_depth + 1);
        }
    }

    fn output_json(&self, tree: &PropertyTree, index: &KeyIndex) -> Result<()> {
        let json = serde_json::json!({
            "tree": self.node_to_json(tree.root(), 0),
            "keys": index,
        });

        println!("{}", serde_json::to_string_pretty(&json)?);
        Ok(())
    }

    fn node_to_json(&self, node: NodeRef<'_>, depth: usize) -> serde_json::Value {
        // The root sits at depth 0 and its children at depth 1.
        let children: Vec<serde_json::Value> = match self.depth {
            Some(max_depth) if depth >= max_depth => vec![],
            _ => node
                .children()
                .map(|child| self.node_to_json(child, depth + 1))
                .collect(),
        };

        serde_json::json!({
            "title": node.label(),
            "key": node.key(),
            "children": children,
        })
    }

    fn output_text(&self, tree: &PropertyTree) {
        let root = tree.root();
        println!("{} ({})", root.label(), root.key());
        for child in root.children() {
            self.print_text_node(child, 1);
        }
    }

    fn print_text_node(&self, node: NodeRef<'_>, depth: usize) {
        if let Some(max_depth) = self.depth
            && depth > max_depth
        {
            return;
        }

        println!("{}{} ({})", "  ".repeat(depth), node.label(), node.key());
        for child in node.children() {
            self.print_text_node(child, depth + 1);
        }
    }
}

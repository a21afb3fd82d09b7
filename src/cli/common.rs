//! Input helpers shared by the commands.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

use crate::core::ProptreeError;

/// Read a whole input file.
pub async fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ProptreeError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Read and decode a JSON input file.
pub async fn read_json(path: &Path) -> Result<serde_json::Value> {
    let content = read_input(path).await?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

/// Treat a JSON value as a list of annotations: an array is taken as is,
/// anything else as a single annotation.
pub fn annotation_list(value: serde_json::Value) -> Vec<serde_json::Value> {
    match value {
        serde_json::Value::Array(items) => items,
        other => vec![other],
    }
}

/// One path per line; blank lines are skipped and trailing `\r` removed.
pub fn path_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Split comma-separated `--ignore` values into labels.
pub fn split_ignore(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

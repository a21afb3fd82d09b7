//! Property path parsing.
//!
//! Nested annotation metadata is addressed by strings such as
//! `"prop5 --> sub_prop1 --> sub_sub_prop1"`. [`PathSegmenter`] turns such a
//! string into a [`PropertyPath`], an ordered list of opaque segments, and
//! renders paths back with the same delimiter.
//!
//! # Examples
//!
//! ```rust
//! use proptree_cli::path::PathSegmenter;
//!
//! let segmenter = PathSegmenter::default();
//! let path = segmenter.split("prop5 --> sub_prop1");
//! assert_eq!(path.segments(), ["prop5", "sub_prop1"]);
//! assert_eq!(segmenter.join(&path), "prop5 --> sub_prop1");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{ProptreeError, Result};

/// Delimiter placed between segments when a path is rendered.
pub const DEFAULT_DELIMITER: &str = " --> ";

/// An ordered sequence of path segments.
///
/// Segments are compared by exact string equality; two paths with an equal
/// segment prefix share ancestry in a property tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyPath(Vec<String>);

impl PropertyPath {
    /// Build a path from already separated segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// The segments in order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments (the path's depth).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first `len` segments joined with `delimiter`.
    pub fn prefix_string(&self, len: usize, delimiter: &str) -> String {
        self.0[..len.min(self.0.len())].join(delimiter)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(DEFAULT_DELIMITER))
    }
}

impl From<Vec<String>> for PropertyPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

/// Splits path strings into segments and joins them back.
///
/// A string is treated as a path when it contains the *arrow token*, the
/// delimiter with surrounding whitespace removed (`-->` by default). Paths are
/// split on the full delimiter and each segment is trimmed. A string without
/// the token is kept verbatim as a single segment, including the empty
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegmenter {
    delimiter: String,
    token: String,
}

impl Default for PathSegmenter {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            token: DEFAULT_DELIMITER.trim().to_string(),
        }
    }
}

impl PathSegmenter {
    /// Create a segmenter for a custom delimiter.
    ///
    /// # Errors
    ///
    /// Returns [`ProptreeError::ConfigError`] when the delimiter is empty or
    /// consists only of whitespace.
    pub fn new(delimiter: impl Into<String>) -> Result<Self> {
        let delimiter = delimiter.into();
        let token = delimiter.trim().to_string();
        if token.is_empty() {
            return Err(ProptreeError::ConfigError {
                message: format!("path delimiter {delimiter:?} must contain a non-whitespace token"),
            });
        }
        Ok(Self { delimiter, token })
    }

    /// The delimiter used when joining.
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Split a raw path string into segments.
    ///
    /// Strings containing the bare token (`-->`) are split on the full
    /// delimiter, so `a-->b` stays a single segment.
    pub fn split(&self, raw: &str) -> PropertyPath {
        if raw.contains(self.token.as_str()) {
            PropertyPath(
                raw.split(self.delimiter.as_str())
                    .map(|segment| segment.trim().to_string())
                    .collect(),
            )
        } else {
            PropertyPath(vec![raw.to_string()])
        }
    }

    /// Split every string of a collection, keeping input order.
    pub fn split_all<I, S>(&self, raw: I) -> Vec<PropertyPath>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter().map(|r| self.split(r.as_ref())).collect()
    }

    /// Render a path with this segmenter's delimiter.
    pub fn join(&self, path: &PropertyPath) -> String {
        path.0.join(&self.delimiter)
    }
}

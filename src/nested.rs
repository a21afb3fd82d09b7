//! Nested metadata values.
//!
//! Annotation properties are arbitrarily nested JSON objects. [`PropValue`]
//! models them as a sum type, either a mapping or a leaf, so every walk below
//! is an exhaustive `match` instead of a runtime type check.
//!
//! Two walks are provided:
//! - [`NestedDepthExtractor`] lazily yields every value sitting at one nesting
//!   level.
//! - [`flatten_properties`] turns a nested mapping into `(path, leaf)` pairs,
//!   which is how property path lists are produced in the first place.
//!
//! Mappings keep the key order of the source document, so both walks visit
//! keys in the order they were written.

use serde::Serialize;
use indexmap::IndexMap;
use std::collections::HashSet;

use crate::core::{ProptreeError, Result};
use crate::path::PathSegmenter;

/// Ordered mapping of property names to values.
pub type PropMap = IndexMap<String, PropValue>;

/// A metadata value: a nested mapping or anything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    /// A JSON object
    Mapping(PropMap),
    /// Any non-object JSON value (number, string, bool, null, array)
    Leaf(serde_json::Value),
}

impl PropValue {
    pub fn as_mapping(&self) -> Option<&PropMap> {
        match self {
            PropValue::Mapping(map) => Some(map),
            PropValue::Leaf(_) => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, PropValue::Mapping(_))
    }

    /// Convert back into a plain JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            PropValue::Mapping(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            PropValue::Leaf(value) => value.clone(),
        }
    }
}

impl From<serde_json::Value> for PropValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => {
                PropValue::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            other => PropValue::Leaf(other),
        }
    }
}

impl From<PropMap> for PropValue {
    fn from(map: PropMap) -> Self {
        PropValue::Mapping(map)
    }
}

/// Yields the values found at a given nesting depth of a mapping.
///
/// Depth 0 is the top-level mapping's own values, depth 1 the values of the
/// mappings found there, and so on. Leaves above the target depth end their
/// branch; mappings at the target depth are yielded whole and not entered.
///
/// ```rust
/// use proptree_cli::nested::{NestedDepthExtractor, PropValue};
/// use serde_json::json;
///
/// let data = PropValue::from(json!({
///     "main_prop": {"sub_prop1": 1, "sub_prop2": {"sub_subprop1": 2}}
/// }));
/// let extractor = NestedDepthExtractor::new(&data)?;
///
/// let depth2: Vec<_> = extractor.at_depth(2).map(PropValue::to_json).collect();
/// assert_eq!(depth2, [json!(2)]);
/// # Ok::<(), proptree_cli::core::ProptreeError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NestedDepthExtractor<'a> {
    root: &'a PropMap,
}

impl<'a> NestedDepthExtractor<'a> {
    /// Wrap a value for extraction.
    ///
    /// # Errors
    ///
    /// Returns [`ProptreeError::InvalidInput`] unless `data` is a mapping.
    pub fn new(data: &'a PropValue) -> Result<Self> {
        match data {
            PropValue::Mapping(root) => Ok(Self { root }),
            PropValue::Leaf(value) => Err(ProptreeError::invalid_input(format!(
                "depth extraction needs a mapping, got {value}"
            ))),
        }
    }

    pub fn from_map(root: &'a PropMap) -> Self {
        Self { root }
    }

    /// Start a fresh walk returning the values at `depth`.
    pub fn at_depth(&self, depth: usize) -> DepthValues<'a> {
        DepthValues {
            stack: vec![(self.root.values(), 0)],
            target: depth,
        }
    }
}

/// Lazy iterator returned by [`NestedDepthExtractor::at_depth`].
#[derive(Debug, Clone)]
pub struct DepthValues<'a> {
    stack: Vec<(indexmap::map::Values<'a, String, PropValue>, usize)>,
    target: usize,
}

impl<'a> Iterator for DepthValues<'a> {
    type Item = &'a PropValue;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (values, level) = self.stack.last_mut()?;
            let level = *level;
            match values.next() {
                None => {
                    self.stack.pop();
                }
                Some(value) if level == self.target => return Some(value),
                Some(PropValue::Mapping(map)) => self.stack.push((map.values(), level + 1)),
                Some(PropValue::Leaf(_)) => {}
            }
        }
    }
}

/// Convenience wrapper collecting [`NestedDepthExtractor::at_depth`].
///
/// # Errors
///
/// Returns [`ProptreeError::InvalidInput`] unless `data` is a mapping.
pub fn extract_at_depth(data: &PropValue, depth: usize) -> Result<Vec<&PropValue>> {
    Ok(NestedDepthExtractor::new(data)?.at_depth(depth).collect())
}

/// Flatten a nested mapping into `(path, leaf)` pairs.
///
/// Only leaves whose path has at most `max_depth` segments are kept. Mappings
/// themselves are never emitted, so an empty mapping contributes nothing.
/// Paths are rendered with `segmenter`'s delimiter and each path appears once.
///
/// ```rust
/// use proptree_cli::nested::{flatten_properties, PropValue};
/// use proptree_cli::path::PathSegmenter;
/// use serde_json::json;
///
/// let data = PropValue::from(json!({"cell": {"area": 10, "shape": {"round": 0.4}}}));
/// let flat = flatten_properties(data.as_mapping().unwrap(), 2, &PathSegmenter::default());
/// assert_eq!(flat.len(), 1);
/// assert_eq!(flat[0].0, "cell --> area");
/// ```
pub fn flatten_properties(
    map: &PropMap,
    max_depth: usize,
    segmenter: &PathSegmenter,
) -> Vec<(String, PropValue)> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut prefix = Vec::new();
    flatten_into(map, max_depth, segmenter, &mut prefix, &mut seen, &mut out);
    out
}

fn flatten_into(
    map: &PropMap,
    remaining: usize,
    segmenter: &PathSegmenter,
    prefix: &mut Vec<String>,
    seen: &mut HashSet<String>,
    out: &mut Vec<(String, PropValue)>,
) {
    if remaining == 0 {
        return;
    }
    for (key, value) in map {
        prefix.push(key.clone());
        match value {
            PropValue::Mapping(inner) => {
                flatten_into(inner, remaining - 1, segmenter, prefix, seen, out);
            }
            PropValue::Leaf(_) => {
                let path = prefix.join(segmenter.delimiter());
                if seen.insert(path.clone()) {
                    out.push((path, value.clone()));
                }
            }
        }
        prefix.pop();
    }
}

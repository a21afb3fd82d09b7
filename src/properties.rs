//! Property summaries for annotation feature collections.
//!
//! Slide annotations arrive as GeoJSON-like feature collections:
//!
//! ```json
//! {
//!   "type": "FeatureCollection",
//!   "properties": {"name": "glomeruli"},
//!   "features": [
//!     {"type": "Feature", "geometry": {}, "properties": {
//!       "area": 1520.5,
//!       "cell_types": {"podocyte": 0.4, "mesangial": 0.6}
//!     }}
//!   ]
//! }
//! ```
//!
//! [`PropertySummary::from_annotations`] collects every property path present
//! on any feature (nested mappings flattened as `cell_types --> podocyte`),
//! together with per-path value statistics. The sorted path list is what a
//! [`TreeBuilder`](crate::tree::TreeBuilder) turns into a browsable tree.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;

use crate::core::{ProptreeError, Result};
use crate::nested::{PropMap, PropValue, flatten_properties};
use crate::path::PathSegmenter;

/// Default maximum nesting depth for flattened properties.
pub const DEFAULT_NESTED_DEPTH: usize = 4;

/// Options for [`PropertySummary::from_annotations`].
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    /// Property names or full paths to leave out.
    pub ignore: HashSet<String>,
    /// Maximum number of segments of a flattened path.
    pub nested_depth: usize,
    pub segmenter: PathSegmenter,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            ignore: HashSet::new(),
            nested_depth: DEFAULT_NESTED_DEPTH,
            segmenter: PathSegmenter::default(),
        }
    }
}

/// Range and distinct-value count of a numeric property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    /// Number of distinct values seen
    pub distinct: usize,
    #[serde(skip)]
    seen: BTreeSet<u64>,
}

impl NumericStats {
    /// Stats holding a single observation.
    pub fn new(value: f64) -> Self {
        Self {
            min: value,
            max: value,
            distinct: 1,
            seen: BTreeSet::from([value.to_bits()]),
        }
    }

    /// Fold another value in.
    pub fn record(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        if self.seen.insert(value.to_bits()) {
            self.distinct += 1;
        }
    }
}

/// Statistics for the values observed under one property path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PropertyStats {
    Numeric(NumericStats),
    Categorical {
        /// Distinct values in first-seen order
        unique: Vec<String>,
        distinct: usize,
    },
}

impl PropertyStats {
    fn categorical(value: &str) -> Self {
        PropertyStats::Categorical {
            unique: vec![value.to_string()],
            distinct: 1,
        }
    }

    /// Fold another observation in. Returns `false` when the value's kind
    /// does not match the stats kind.
    fn observe(&mut self, value: &serde_json::Value) -> bool {
        match (self, value) {
            (PropertyStats::Numeric(stats), serde_json::Value::Number(n)) => {
                let Some(v) = n.as_f64() else {
                    return false;
                };
                stats.record(v);
                true
            }
            (PropertyStats::Categorical { unique, distinct }, serde_json::Value::String(s)) => {
                if !unique.iter().any(|u| u == s) {
                    unique.push(s.clone());
                    *distinct += 1;
                }
                true
            }
            _ => false,
        }
    }

    fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => {
                n.as_f64().map(|v| PropertyStats::Numeric(NumericStats::new(v)))
            }
            serde_json::Value::String(s) => Some(Self::categorical(s)),
            _ => None,
        }
    }

    pub fn distinct(&self) -> usize {
        match self {
            PropertyStats::Numeric(stats) => stats.distinct,
            PropertyStats::Categorical { distinct, .. } => *distinct,
        }
    }
}

/// Summary of the properties available across a set of annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertySummary {
    /// Sorted, de-duplicated property paths
    pub paths: Vec<String>,
    /// `properties.name` of each annotation that has one, in input order
    pub annotation_names: Vec<String>,
    /// Statistics per path (numbers and strings only)
    pub stats: BTreeMap<String, PropertyStats>,
}

impl PropertySummary {
    /// Summarise annotations given as JSON values.
    ///
    /// # Errors
    ///
    /// Returns [`ProptreeError::InvalidInput`] when an annotation is not an
    /// object, lacks a `features` array, or holds a feature whose
    /// `properties` member is present but not an object.
    pub fn from_annotations(
        annotations: &[serde_json::Value],
        options: &SummaryOptions,
    ) -> Result<Self> {
        let mut summary = PropertySummary::default();
        let mut paths = BTreeSet::new();
        let mut feature_count = 0usize;

        for (i, annotation) in annotations.iter().enumerate() {
            let object = annotation.as_object().ok_or_else(|| {
                ProptreeError::invalid_input(format!("annotation {i} is not a JSON object"))
            })?;

            if let Some(name) = object
                .get("properties")
                .and_then(|p| p.get("name"))
                .and_then(serde_json::Value::as_str)
            {
                summary.annotation_names.push(name.to_string());
            }

            let features = object
                .get("features")
                .and_then(serde_json::Value::as_array)
                .ok_or_else(|| {
                    ProptreeError::invalid_input(format!("annotation {i} has no \"features\" array"))
                })?;

            for (j, feature) in features.iter().enumerate() {
                feature_count += 1;
                let properties = match feature.get("properties") {
                    None | Some(serde_json::Value::Null) => continue,
                    Some(serde_json::Value::Object(props)) => props,
                    Some(_) => {
                        return Err(ProptreeError::invalid_input(format!(
                            "feature {j} of annotation {i} has non-object properties"
                        )));
                    }
                };

                for (name, value) in properties {
                    if options.ignore.contains(name) {
                        continue;
                    }
                    summary.collect(name, value, options, &mut paths);
                }
            }
        }

        summary.paths = paths.into_iter().collect();

        debug!(
            annotations = annotations.len(),
            features = feature_count,
            paths = summary.paths.len(),
            "Summarised annotation properties"
        );

        Ok(summary)
    }

    fn collect(
        &mut self,
        name: &str,
        value: &serde_json::Value,
        options: &SummaryOptions,
        paths: &mut BTreeSet<String>,
    ) {
        match PropValue::from(value.clone()) {
            PropValue::Mapping(inner) => {
                let wrapped = PropMap::from([(name.to_string(), PropValue::Mapping(inner))]);
                for (path, leaf) in
                    flatten_properties(&wrapped, options.nested_depth, &options.segmenter)
                {
                    if let PropValue::Leaf(leaf) = leaf {
                        self.record(path, &leaf, options, paths);
                    }
                }
            }
            PropValue::Leaf(leaf) => self.record(name.to_string(), &leaf, options, paths),
        }
    }

    fn record(
        &mut self,
        path: String,
        value: &serde_json::Value,
        options: &SummaryOptions,
        paths: &mut BTreeSet<String>,
    ) {
        if options.ignore.contains(&path) {
            return;
        }

        match self.stats.get_mut(&path) {
            Some(stats) => {
                if !stats.observe(value) {
                    debug!(path = %path, value = %value, "Value kind differs from earlier values");
                }
            }
            None => {
                if let Some(stats) = PropertyStats::from_value(value) {
                    self.stats.insert(path.clone(), stats);
                }
            }
        }

        paths.insert(path);
    }
}

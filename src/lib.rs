//! proptree - hierarchical indexing of nested annotation properties
//!
//! Slide annotations carry arbitrarily nested metadata on every feature.
//! proptree flattens that metadata into property paths such as
//! `cell_types --> podocyte`, merges the paths into a tree suitable for
//! tree-select widgets, and gives every node a positional key that maps back
//! to the path it was created for.
//!
//! # Core Modules
//!
//! - [`path`] - Splitting and joining delimited property paths
//! - [`tree`] - Arena tree, deterministic keys and the key index
//! - [`nested`] - Nested value type, depth extraction and flattening
//! - [`properties`] - Property path and value summaries of annotations
//!
//! ## Supporting Modules
//! - [`cli`] - Command-line interface
//! - [`config`] - User configuration (`~/.proptree/config.toml`)
//! - [`core`] - Error types and user-facing error formatting
//!
//! # Key Scheme
//!
//! The root carries key `0`. The n-th child (0-based) of a node keyed `k`
//! is keyed `k-n`:
//!
//! ```text
//! Features (0)
//! ├── prop4 (0-0)
//! │   ├── sub_prop1 (0-0-0)
//! │   └── sub_prop2 (0-0-1)
//! └── prop1 (0-1)
//! ```
//!
//! Paths are inserted deepest first (stable for equal lengths), so a given
//! path list always produces the same keys.
//!
//! # Example
//!
//! ```rust
//! use proptree_cli::tree::TreeBuilder;
//!
//! let (tree, index) = TreeBuilder::new().build_from_strings(&[
//!     "prop1",
//!     "prop4 --> sub_prop1",
//!     "prop4 --> sub_prop2",
//! ]);
//!
//! assert_eq!(tree.root().child_labels(), ["prop4", "prop1"]);
//! assert_eq!(index.get("0-0-1"), Some("prop4 --> sub_prop2"));
//! ```
//!
//! # Configuration
//!
//! ```toml
//! # ~/.proptree/config.toml
//! delimiter = " --> "
//! root_title = "Features"
//! ignore = ["_id"]
//! nested_depth = 4
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod nested;
pub mod path;
pub mod properties;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

//! Integration test suite for proptree
//!
//! End-to-end tests driving the `proptree` binary.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **tree**: Tree rendering, key lookups and input formats
//! - **extract**: Depth extraction from nested JSON
//! - **properties**: Annotation property summaries
//! - **config**: Config file and global flag handling

#[path = "../common/mod.rs"]
mod common;

mod config;
mod properties;
mod tree;

//! Configuration management for proptree
//!
//! A single user-level TOML file ([`ProptreeConfig`]) holds the settings
//! shared by every command: the path delimiter, the tree root title, the
//! ignore list and the flattening depth.
//!
//! # Configuration Priority
//!
//! 1. Command-line flags (`--ignore`, `--title`, `--nested-depth`)
//! 2. `--config <file>`
//! 3. `PROPTREE_CONFIG_PATH`
//! 4. `~/.proptree/config.toml`
//! 5. Default values
//!
//! Ignore lists from the file and from flags are merged rather than replaced.

mod global;

pub use global::{CONFIG_PATH_ENV, ProptreeConfig};

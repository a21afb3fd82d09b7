//! Test utilities for proptree
//!
//! Logging setup plus the sample data the tests share: the reference path
//! list and a small annotation collection.
//!
//! ```rust,no_run
//! use proptree_cli::test_utils::{init_test_logging, reference_paths};
//! use proptree_cli::tree::TreeBuilder;
//!
//! init_test_logging(None);
//! let (tree, _) = TreeBuilder::new().build_from_strings(&reference_paths());
//! assert_eq!(tree.root().child_count(), 5);
//! ```

pub mod fixtures;

pub use fixtures::{reference_annotation, reference_ignore, reference_paths};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, tests run without a subscriber.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

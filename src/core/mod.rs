//! Core types for proptree
//!
//! Holds the error types shared by every module:
//! - [`ProptreeError`] - enumerated failure modes of the library
//! - [`ErrorContext`] - user-facing wrapper with suggestions and details
//! - [`user_friendly_error`] - converts any `anyhow::Error` for CLI display

pub mod error;

pub use error::{ErrorContext, ProptreeError, Result, user_friendly_error};

//! Error handling for proptree
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`ProptreeError`]) for library callers
//! 2. **User-friendly messages** ([`ErrorContext`]) with suggestions for CLI users
//!
//! Library functions return [`Result`], the CLI layers `anyhow` context on top
//! and converts the final error with [`user_friendly_error`] before printing.
//!
//! # Examples
//!
//! ```rust,no_run
//! use proptree_cli::core::{ErrorContext, ProptreeError, user_friendly_error};
//!
//! let error = ProptreeError::UnknownKey { key: "0-9".to_string() };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // coloured output on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Result alias used by the library modules.
pub type Result<T> = std::result::Result<T, ProptreeError>;

/// The main error type for proptree operations.
///
/// Ignored segments and branches that are too shallow for a depth query are
/// normal control flow and never surface as errors.
#[derive(Error, Debug)]
pub enum ProptreeError {
    /// Input had the wrong shape for the operation.
    ///
    /// Raised for non-string path entries, non-mapping extraction roots and
    /// annotations without a `features` array.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input
        reason: String,
    },

    /// A tree key was requested that the key index does not contain.
    #[error("Key '{key}' is not present in the key index")]
    UnknownKey {
        /// The key that was looked up
        key: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// An input file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was expected to exist
        path: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON decoding or encoding error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl ProptreeError {
    /// Shorthand for [`ProptreeError::InvalidInput`].
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Error wrapper carrying a suggestion and details for terminal display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ProptreeError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details.
    #[must_use]
    pub const fn new(error: ProptreeError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow,
    /// suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with suggestions.
///
/// The error chain is walked so that a [`ProptreeError`] wrapped in `anyhow`
/// context is still recognised. Anything else is reported as invalid input
/// carrying the full chain as details.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(err) = cause.downcast_ref::<ProptreeError>() {
            return create_error_context(err, &error);
        }
        if let Some(io_error) = cause.downcast_ref::<std::io::Error>()
            && io_error.kind() == std::io::ErrorKind::NotFound
        {
            return ErrorContext::new(ProptreeError::FileNotFound {
                path: "unknown".to_string(),
            })
            .with_details(format!("{error:#}"))
            .with_suggestion("Check that the input file exists and the path is correct");
        }
        if let Some(json_error) = cause.downcast_ref::<serde_json::Error>() {
            return ErrorContext::new(ProptreeError::invalid_input(json_error.to_string()))
                .with_details(format!("{error:#}"))
                .with_suggestion("Check that the input file contains valid JSON");
        }
    }

    ErrorContext::new(ProptreeError::invalid_input(error.to_string()))
        .with_details(format!("{error:#}"))
}

fn create_error_context(error: &ProptreeError, chain: &anyhow::Error) -> ErrorContext {
    // Re-create the variant so the context owns it; io/json sources are
    // reduced to their message.
    let owned = match error {
        ProptreeError::InvalidInput { reason } => ProptreeError::invalid_input(reason.clone()),
        ProptreeError::UnknownKey { key } => ProptreeError::UnknownKey { key: key.clone() },
        ProptreeError::ConfigError { message } => ProptreeError::ConfigError {
            message: message.clone(),
        },
        ProptreeError::FileNotFound { path } => ProptreeError::FileNotFound { path: path.clone() },
        other => ProptreeError::invalid_input(other.to_string()),
    };

    let ctx = ErrorContext::new(owned);
    let ctx = if chain.chain().count() > 1 {
        ctx.with_details(format!("{chain:#}"))
    } else {
        ctx
    };

    match error {
        ProptreeError::InvalidInput { .. } => ctx.with_suggestion(
            "Property lists must contain only strings and extraction input must be a JSON object",
        ),
        ProptreeError::UnknownKey { .. } => {
            ctx.with_suggestion("Run 'proptree tree <FILE> --format json' to list the generated keys")
        }
        ProptreeError::ConfigError { .. } => ctx.with_suggestion(
            "Check the configuration file (default ~/.proptree/config.toml or PROPTREE_CONFIG_PATH)",
        ),
        ProptreeError::FileNotFound { .. } => {
            ctx.with_suggestion("Check that the input file exists and the path is correct")
        }
        ProptreeError::TomlError(_) => {
            ctx.with_suggestion("Check the TOML syntax in your configuration file")
        }
        _ => ctx,
    }
}

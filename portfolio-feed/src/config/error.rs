//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while building configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error("Missing required environment variable: {name}")]
    MissingVar { name: &'static str },

    /// A base URL could not be parsed.
    #[error("Invalid URL in '{name}': {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },

    /// A base URL parsed but cannot carry API paths.
    #[error("Validation error in '{name}': {message}")]
    ValidationError { name: &'static str, message: String },
}

//! Pin configuration error types.

use thiserror::Error;

/// Errors that can occur while loading a pin file.
#[derive(Debug, Error)]
pub enum PinError {
    /// Failed to read the pin file.
    #[error("Failed to read pin file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The pin file is not valid JSON.
    #[error("Failed to parse pin file '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

//! Fetch error types.

use thiserror::Error;

/// A single remote read that did not produce usable data.
///
/// Never surfaced past the public fetch operations: they log it and
/// degrade to `None` or an empty value.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport or client error from octocrab.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The request did not finish in time.
    #[error("Request timed out after {timeout_ms} ms: {url}")]
    Timeout { url: String, timeout_ms: u128 },

    /// The server answered with a non-success status.
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// The body was not the JSON we expected.
    #[error("Malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A base64 `content` field could not be decoded.
    #[error("Invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),

    /// An expected field was absent or empty.
    #[error("Payload is missing '{field}'")]
    MissingField { field: &'static str },
}

impl FetchError {
    /// Returns true if the request was cut off by its timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

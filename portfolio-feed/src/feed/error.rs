//! Feed error types.

/// Errors that can occur while assembling a [`Portfolio`](crate::Portfolio).
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),
}

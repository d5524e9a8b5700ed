//! Configuration loaded from the environment.
//!
//! Two independent sections: [`ContentConfig`] for the content repository
//! (`CONTENT_*`) and [`GithubConfig`] for the repository catalog
//! (`GITHUB_*`). Both can also be built in code with `new` and then
//! adjusted field by field.

mod content;
pub(crate) mod env;
mod error;
mod github;

pub use content::{ContentConfig, DEFAULT_API_URL, DEFAULT_RAW_URL};
pub use error::ConfigError;
pub use github::GithubConfig;

use tracing::debug;

/// Complete configuration for a [`Portfolio`](crate::Portfolio).
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Content repository settings.
    pub content: ContentConfig,

    /// Repository catalog settings.
    pub github: GithubConfig,
}

impl FeedConfig {
    /// Creates a configuration from its two sections.
    pub fn new(content: ContentConfig, github: GithubConfig) -> Self {
        Self { content, github }
    }

    /// Reads both sections from the environment.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered.
    pub fn from_env() -> Result<Self, ConfigError> {
        let content = ContentConfig::from_env()?;
        let github = GithubConfig::from_env()?;
        debug!(
            content_repo = %format!("{}/{}", content.owner, content.repo),
            branch = %content.branch,
            username = %github.username,
            production = content.production,
            readme_extras = github.readme_extras,
            "Loaded configuration from environment"
        );
        Ok(Self { content, github })
    }
}

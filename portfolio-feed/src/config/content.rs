//! Content repository configuration.

use super::env;
use crate::client::CachePolicy;
use crate::config::ConfigError;
use std::time::Duration;
use url::Url;

/// Default GitHub REST API base.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default raw file mirror.
pub const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";

/// Where MDX pages and the case-study index live, and how to read them.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Owner of the content repository.
    pub owner: String,

    /// Name of the content repository.
    pub repo: String,

    /// Branch to read from (defaults to "main").
    pub branch: String,

    /// Token for the contents API. Without one only the raw mirror is used.
    pub token: Option<String>,

    /// Base URL of the contents API.
    pub api_base_url: Url,

    /// Base URL of the raw file mirror.
    pub raw_base_url: Url,

    /// How long a cached body stays fresh in production mode.
    pub revalidate: Duration,

    /// Whether responses may be cached at all.
    pub production: bool,

    /// Promotes fetch outcome events to `info`/`warn`.
    pub debug: bool,

    /// Timeout for the authenticated contents API request.
    pub api_timeout: Duration,

    /// Timeout for the raw mirror request.
    pub raw_timeout: Duration,
}

impl ContentConfig {
    /// Creates a configuration with defaults for everything but the repository.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: "main".to_string(),
            token: None,
            api_base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            raw_base_url: Url::parse(DEFAULT_RAW_URL).expect("default raw URL is valid"),
            revalidate: Duration::from_secs(300),
            production: false,
            debug: false,
            api_timeout: Duration::from_millis(7000),
            raw_timeout: Duration::from_millis(5000),
        }
    }

    /// Reads the configuration from `CONTENT_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `CONTENT_OWNER` or `CONTENT_REPO` is
    /// missing, or a base URL override is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(
            env::required("CONTENT_OWNER")?,
            env::required("CONTENT_REPO")?,
        );
        if let Some(branch) = env::var("CONTENT_BRANCH") {
            config.branch = branch;
        }
        config.token = env::var("CONTENT_TOKEN").or_else(|| env::var("GITHUB_TOKEN"));
        config.api_base_url = env::base_url("GITHUB_API_URL", DEFAULT_API_URL)?;
        config.raw_base_url = env::base_url("CONTENT_RAW_URL", DEFAULT_RAW_URL)?;
        config.revalidate = Duration::from_secs(env::number("CONTENT_REVALIDATE", 300u64));
        config.production = env::var("PORTFOLIO_ENV")
            .is_some_and(|mode| mode.trim().eq_ignore_ascii_case("production"));
        config.debug = env::flag("CONTENT_DEBUG", false);
        Ok(config)
    }

    /// Cache behaviour for content requests: none outside production.
    #[must_use]
    pub fn cache_policy(&self) -> CachePolicy {
        if self.production {
            CachePolicy::Revalidate(self.revalidate)
        } else {
            CachePolicy::NoStore
        }
    }
}

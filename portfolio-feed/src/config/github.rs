//! GitHub catalog configuration.

use super::content::{DEFAULT_API_URL, DEFAULT_RAW_URL};
use super::env;
use crate::config::ConfigError;
use std::time::Duration;
use url::Url;

/// How repositories are listed, filtered and enriched.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Account whose repositories are listed.
    pub username: String,

    /// Token for `/user/repos` and authenticated lookups.
    pub token: Option<String>,

    /// Base URL of the REST API.
    pub api_base_url: Url,

    /// Base URL used to absolutize relative README images.
    pub raw_base_url: Url,

    /// Timeout per API request.
    pub timeout: Duration,

    /// Timeout for the README request.
    pub readme_timeout: Duration,

    /// Upper bound on `/user/repos` pages (at least 1).
    pub max_pages: u32,

    /// Keep private repositories.
    pub include_private: bool,

    /// Keep forks.
    pub include_forks: bool,

    /// Keep archived repositories.
    pub include_archived: bool,

    /// Drop repositories owned by anyone but `username`.
    pub owner_only: bool,

    /// Fetch READMEs for cover images and highlights.
    pub readme_extras: bool,

    /// How long cached API bodies stay fresh.
    pub revalidate: Duration,
}

impl GithubConfig {
    /// Creates a configuration with the documented defaults.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: None,
            api_base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            raw_base_url: Url::parse(DEFAULT_RAW_URL).expect("default raw URL is valid"),
            timeout: Duration::from_millis(2500),
            readme_timeout: Duration::from_millis(1500),
            max_pages: 5,
            include_private: true,
            include_forks: false,
            include_archived: false,
            owner_only: true,
            readme_extras: false,
            revalidate: Duration::from_secs(900),
        }
    }

    /// Reads the configuration from `GITHUB_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `GITHUB_USERNAME` is missing or a base URL
    /// override is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(env::required("GITHUB_USERNAME")?);
        config.token = env::var("GITHUB_TOKEN");
        config.api_base_url = env::base_url("GITHUB_API_URL", DEFAULT_API_URL)?;
        config.raw_base_url = env::base_url("CONTENT_RAW_URL", DEFAULT_RAW_URL)?;
        config.timeout = Duration::from_millis(env::number("GITHUB_TIMEOUT_MS", 2500u64));
        config.readme_timeout =
            Duration::from_millis(env::number("GITHUB_README_TIMEOUT_MS", 1500u64));
        config.max_pages = env::number("GITHUB_MAX_PAGES", 5u32).max(1);
        config.include_private = env::flag("GITHUB_INCLUDE_PRIVATE", true);
        config.include_forks = env::flag("GITHUB_INCLUDE_FORKS", false);
        config.include_archived = env::flag("GITHUB_INCLUDE_ARCHIVED", false);
        config.owner_only = env::flag("GITHUB_OWNER_ONLY", true);
        config.readme_extras = env::flag("GITHUB_ENABLE_README_EXTRAS", false);
        Ok(config)
    }
}

//! Repository snapshot and its GitHub payload.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Owner of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoOwner {
    /// Account login.
    pub login: String,
}

/// One remote repository as it looked when fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repo {
    /// Repository name.
    pub name: String,

    /// Full name in "owner/name" format.
    pub full_name: String,

    pub description: Option<String>,

    /// Whether the repository is private.
    pub private: bool,

    /// Whether the repository is a fork.
    pub fork: bool,

    /// Whether the repository is archived.
    pub archived: bool,

    /// Canonical GitHub URL.
    pub html_url: String,

    pub homepage: Option<String>,

    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,

    /// Primary language as detected by GitHub.
    pub language: Option<String>,

    /// Topic tags.
    pub topics: Vec<String>,

    /// SPDX identifier, or the license key when GitHub has no SPDX id.
    pub license: Option<String>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,

    /// Last push, as an RFC 3339 timestamp.
    pub pushed_at: Option<String>,

    /// Default branch name (e.g., "main").
    pub default_branch: String,

    pub owner: Option<RepoOwner>,
}

impl Repo {
    /// Lowercased full name, the identity used when merging listings.
    #[must_use]
    pub fn key(&self) -> String {
        self.full_name.to_lowercase()
    }

    /// Owner login, or `fallback` when the payload had no owner.
    #[must_use]
    pub fn owner_login<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.owner.as_ref().map_or(fallback, |o| o.login.as_str())
    }

    /// Last push in milliseconds since the epoch; 0 when absent or unparseable.
    #[must_use]
    pub fn pushed_millis(&self) -> i64 {
        timestamp_millis(self.pushed_at.as_deref())
    }

    /// Last push, falling back to last update when no push is recorded.
    #[must_use]
    pub fn recency_millis(&self) -> i64 {
        let stamp = self
            .pushed_at
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.updated_at.as_deref());
        timestamp_millis(stamp)
    }
}

/// Parses an RFC 3339 timestamp into epoch milliseconds, 0 on failure.
#[must_use]
pub fn timestamp_millis(stamp: Option<&str>) -> i64 {
    stamp
        .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map_or(0, |dt| dt.timestamp_millis())
}

/// Repository object as returned by the REST API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RepoPayload {
    name: String,
    full_name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    private: bool,
    #[serde(default)]
    fork: bool,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    html_url: String,
    #[serde(default)]
    homepage: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    watchers_count: u64,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    topics: Option<Vec<String>>,
    #[serde(default)]
    license: Option<LicensePayload>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    pushed_at: Option<String>,
    #[serde(default)]
    default_branch: Option<String>,
    #[serde(default)]
    owner: Option<RepoOwner>,
}

#[derive(Debug, Clone, Deserialize)]
struct LicensePayload {
    #[serde(default)]
    spdx_id: Option<String>,
    #[serde(default)]
    key: Option<String>,
}

impl From<RepoPayload> for Repo {
    fn from(payload: RepoPayload) -> Self {
        Self {
            name: payload.name,
            full_name: payload.full_name,
            description: payload.description,
            private: payload.private,
            fork: payload.fork,
            archived: payload.archived,
            html_url: payload.html_url,
            homepage: payload.homepage,
            stars: payload.stargazers_count,
            forks: payload.forks_count,
            watchers: payload.watchers_count,
            language: payload.language,
            topics: payload.topics.unwrap_or_default(),
            license: payload.license.and_then(|l| l.spdx_id.or(l.key)),
            created_at: payload.created_at,
            updated_at: payload.updated_at,
            pushed_at: payload.pushed_at,
            default_branch: payload
                .default_branch
                .unwrap_or_else(|| "main".to_string()),
            owner: payload.owner,
        }
    }
}

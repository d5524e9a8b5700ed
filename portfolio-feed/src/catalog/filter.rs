//! Listing filters.

use super::Repo;
use crate::config::GithubConfig;

/// Which repositories survive a listing. Each toggle applies on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFilter {
    /// Account the owner-only filter compares against.
    pub username: String,
    pub owner_only: bool,
    pub include_private: bool,
    pub include_forks: bool,
    pub include_archived: bool,
}

impl From<&GithubConfig> for RepoFilter {
    fn from(config: &GithubConfig) -> Self {
        Self {
            username: config.username.clone(),
            owner_only: config.owner_only,
            include_private: config.include_private,
            include_forks: config.include_forks,
            include_archived: config.include_archived,
        }
    }
}

impl RepoFilter {
    /// Applies owner, private, fork and archived filters in that order.
    ///
    /// A repository without owner information counts as owned.
    #[must_use]
    pub fn apply(&self, repos: Vec<Repo>) -> Vec<Repo> {
        let username = self.username.to_lowercase();
        repos
            .into_iter()
            .filter(|r| {
                !self.owner_only || r.owner_login(&self.username).to_lowercase() == username
            })
            .filter(|r| self.include_private || !r.private)
            .filter(|r| self.include_forks || !r.fork)
            .filter(|r| self.include_archived || !r.archived)
            .collect()
    }
}

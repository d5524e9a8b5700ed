//! Repository listing for the portfolio owner.
//!
//! Two sources feed the listing: the authenticated `/user/repos` endpoint,
//! which also sees private repositories, and the public
//! `/users/{username}/repos` endpoint. Each source tolerates total failure,
//! so [`RepoCatalog::fetch_all_repos`] always produces a list.

mod filter;
pub(crate) mod repo;

pub use filter::RepoFilter;
pub use repo::{timestamp_millis, Repo, RepoOwner};

use crate::client::{ApiClient, CachePolicy, FetchError, ResponseCache};
use crate::config::GithubConfig;
use repo::RepoPayload;
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::{debug, info, info_span, warn, Instrument};
use url::Url;

/// Results per page for repository listings.
pub const PER_PAGE: usize = 100;

/// Where a single-repository lookup is attempted, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoSource {
    /// REST API with the configured token.
    Authenticated,
    /// REST API without credentials.
    Public,
}

/// Lists, merges and filters the configured user's repositories.
pub struct RepoCatalog {
    config: GithubConfig,
    api: ApiClient,
    public: ApiClient,
}

impl RepoCatalog {
    /// Builds the catalog's API clients.
    ///
    /// # Errors
    ///
    /// Returns an error if an octocrab client cannot be built.
    pub fn new(config: GithubConfig, cache: ResponseCache) -> Result<Self, octocrab::Error> {
        let api = ApiClient::new(
            config.api_base_url.clone(),
            config.token.as_deref(),
            cache.clone(),
        )?;
        let public = ApiClient::new(config.api_base_url.clone(), None, cache)?;
        Ok(Self {
            config,
            api,
            public,
        })
    }

    /// The configuration this catalog was built with.
    #[must_use]
    pub fn config(&self) -> &GithubConfig {
        &self.config
    }

    /// Fetches every repository the listing should show, newest push first.
    ///
    /// Never fails: a source that errors contributes what it collected
    /// before the error (or nothing).
    pub async fn fetch_all_repos(&self) -> Vec<Repo> {
        let span = info_span!("fetch_all_repos", username = %self.config.username);

        async {
            let (authed, public) =
                futures::join!(self.fetch_authenticated(), self.fetch_public());
            debug!(
                authenticated = authed.len(),
                public = public.len(),
                "Fetched repository sources"
            );

            let merged = merge_repos(public, authed);
            let mut repos = RepoFilter::from(&self.config).apply(merged);
            sort_by_pushed(&mut repos);

            info!(count = repos.len(), "Repository listing complete");
            repos
        }
        .instrument(span)
        .await
    }

    /// Looks up one of the user's repositories by name.
    ///
    /// Tries the authenticated API (when a token is configured), then the
    /// public API. Returns `None` if neither succeeds.
    pub async fn fetch_repo_by_name(&self, name: &str) -> Option<Repo> {
        for source in self.sources() {
            match self.fetch_repo_from(source, name).await {
                Ok(repo) => return Some(repo),
                Err(e) => {
                    warn!(repo = name, ?source, error = %e, "Repository lookup failed");
                }
            }
        }
        None
    }

    /// Lookup strategies available with the current configuration.
    fn sources(&self) -> Vec<RepoSource> {
        let mut sources = Vec::with_capacity(2);
        if self.api.is_authenticated() {
            sources.push(RepoSource::Authenticated);
        }
        sources.push(RepoSource::Public);
        sources
    }

    async fn fetch_repo_from(&self, source: RepoSource, name: &str) -> Result<Repo, FetchError> {
        let client = match source {
            RepoSource::Authenticated => &self.api,
            RepoSource::Public => &self.public,
        };
        let url = client.endpoint(["repos", self.config.username.as_str(), name]);
        let payload: RepoPayload = client
            .get_json(&url, self.config.timeout, self.cache_policy())
            .await?;
        Ok(payload.into())
    }

    /// Pages through `/user/repos` until a short page or the page cap.
    async fn fetch_authenticated(&self) -> Vec<Repo> {
        let mut repos = Vec::new();
        if !self.api.is_authenticated() {
            debug!("No GitHub token configured, skipping authenticated listing");
            return repos;
        }

        for page in 1..=self.config.max_pages {
            let url = listing_url(&self.api, ["user", "repos"], Some(page));
            match self
                .api
                .get_json::<Vec<RepoPayload>>(&url, self.config.timeout, self.cache_policy())
                .await
            {
                Ok(items) => {
                    let count = items.len();
                    repos.extend(items.into_iter().map(Repo::from));
                    debug!(page, count, "Fetched authenticated repository page");
                    if count < PER_PAGE {
                        break;
                    }
                }
                Err(e) => {
                    warn!(page, error = %e, "Authenticated repository listing failed");
                    break;
                }
            }
        }
        repos
    }

    /// Single page of `/users/{username}/repos`.
    async fn fetch_public(&self) -> Vec<Repo> {
        let url = listing_url(
            &self.public,
            ["users", self.config.username.as_str(), "repos"],
            None,
        );
        match self
            .public
            .get_json::<Vec<RepoPayload>>(&url, self.config.timeout, self.cache_policy())
            .await
        {
            Ok(items) => items.into_iter().map(Repo::from).collect(),
            Err(e) => {
                warn!(error = %e, "Public repository listing failed");
                Vec::new()
            }
        }
    }

    fn cache_policy(&self) -> CachePolicy {
        CachePolicy::Revalidate(self.config.revalidate)
    }
}

/// Builds a listing URL sorted by last push, newest first.
fn listing_url<'a>(
    client: &ApiClient,
    segments: impl IntoIterator<Item = &'a str>,
    page: Option<u32>,
) -> Url {
    let mut url = client.endpoint(segments);
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("per_page", &PER_PAGE.to_string());
        if let Some(page) = page {
            query.append_pair("page", &page.to_string());
        }
        query.append_pair("sort", "pushed");
        query.append_pair("direction", "desc");
    }
    url
}

/// Merges two listings keyed by case-insensitive full name.
///
/// `preferred` entries replace `base` entries with the same key in place;
/// new keys are appended in encounter order.
#[must_use]
pub fn merge_repos(base: Vec<Repo>, preferred: Vec<Repo>) -> Vec<Repo> {
    let mut merged: Vec<Repo> = Vec::with_capacity(base.len() + preferred.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for repo in base.into_iter().chain(preferred) {
        match index.get(&repo.key()) {
            Some(&slot) => merged[slot] = repo,
            None => {
                index.insert(repo.key(), merged.len());
                merged.push(repo);
            }
        }
    }
    merged
}

/// Sorts by last push, newest first. Missing or invalid dates sort last.
pub fn sort_by_pushed(repos: &mut [Repo]) {
    repos.sort_by_key(|r| Reverse(r.pushed_millis()));
}

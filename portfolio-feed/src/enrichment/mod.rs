//! Project card enrichment.
//!
//! For each repository the language breakdown and (optionally) the README
//! are fetched concurrently. Each branch falls back to an empty value on
//! failure without affecting the other, so enrichment always produces a
//! [`RepoCardExtras`].

mod extras;
mod languages;
mod readme;

pub use extras::{stack_tags, RepoCardExtras, TopLanguage, MAX_STACK_TAGS, MAX_TOP_LANGUAGES};
pub use languages::{language_breakdown, LanguageBreakdown};
pub use readme::{absolutize, extract_readme_meta, RawLocation, ReadmeMeta};

use crate::catalog::Repo;
use crate::client::{ApiClient, CachePolicy, FetchError, ResponseCache};
use crate::config::GithubConfig;
use crate::content::envelope::ContentEnvelope;
use std::collections::BTreeMap;
use tracing::{debug, info_span, warn, Instrument};

/// Fetches per-repository card data.
pub struct RepoEnricher {
    config: GithubConfig,
    api: ApiClient,
}

impl RepoEnricher {
    /// Builds the enricher's API client (authenticated when a token is set).
    ///
    /// # Errors
    ///
    /// Returns an error if the octocrab client cannot be built.
    pub fn new(config: GithubConfig, cache: ResponseCache) -> Result<Self, octocrab::Error> {
        let api = ApiClient::new(
            config.api_base_url.clone(),
            config.token.as_deref(),
            cache,
        )?;
        Ok(Self { config, api })
    }

    /// Card extras for one repository. Never fails.
    pub async fn card_extras(&self, repo: &Repo) -> RepoCardExtras {
        let span = info_span!("card_extras", repo = %repo.full_name);

        async {
            let (languages, readme) =
                futures::join!(self.try_languages(repo), self.try_readme(repo));
            let languages = settle(languages, "languages", repo);
            let readme = settle(readme, "readme", repo);

            let location = RawLocation {
                base: &self.config.raw_base_url,
                owner: self.owner_of(repo),
                repo: &repo.name,
                branch: &repo.default_branch,
            };
            let meta = extract_readme_meta(readme.as_deref(), location);
            RepoCardExtras::assemble(repo, &languages, meta)
        }
        .instrument(span)
        .await
    }

    /// Card extras for a whole listing, all repositories at once.
    ///
    /// The result is index-aligned with `repos`.
    pub async fn card_extras_for_all(&self, repos: &[Repo]) -> Vec<RepoCardExtras> {
        futures::future::join_all(repos.iter().map(|repo| self.card_extras(repo))).await
    }

    /// Language breakdown for one repository; empty on failure.
    pub async fn languages(&self, repo: &Repo) -> Vec<LanguageBreakdown> {
        settle(self.try_languages(repo).await, "languages", repo)
    }

    async fn try_languages(&self, repo: &Repo) -> Result<Vec<LanguageBreakdown>, FetchError> {
        let url = self
            .api
            .endpoint(["repos", self.owner_of(repo), repo.name.as_str(), "languages"]);
        let counts: BTreeMap<String, u64> = self
            .api
            .get_json(&url, self.config.timeout, self.cache_policy())
            .await?;
        Ok(language_breakdown(counts))
    }

    /// README text, or `None` when README extras are disabled.
    async fn try_readme(&self, repo: &Repo) -> Result<Option<String>, FetchError> {
        if !self.config.readme_extras {
            return Ok(None);
        }
        let url = self
            .api
            .endpoint(["repos", self.owner_of(repo), repo.name.as_str(), "readme"]);
        let envelope: ContentEnvelope = self
            .api
            .get_json(&url, self.config.readme_timeout, self.cache_policy())
            .await?;
        envelope.decode().map(Some)
    }

    fn owner_of<'a>(&'a self, repo: &'a Repo) -> &'a str {
        repo.owner_login(&self.config.username)
    }

    fn cache_policy(&self) -> CachePolicy {
        CachePolicy::Revalidate(self.config.revalidate)
    }
}

/// Resolves one branch of a partial-failure join to its value or default.
fn settle<T: Default>(result: Result<T, FetchError>, branch: &str, repo: &Repo) -> T {
    match result {
        Ok(value) => value,
        Err(e) if e.is_timeout() => {
            debug!(repo = %repo.full_name, branch, error = %e, "Enrichment branch timed out");
            T::default()
        }
        Err(e) => {
            warn!(repo = %repo.full_name, branch, error = %e, "Enrichment branch failed");
            T::default()
        }
    }
}

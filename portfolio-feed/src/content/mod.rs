//! Remote MDX and JSON content.
//!
//! Pages live in a separate content repository. A file is read through an
//! ordered list of [`ContentSource`]s: the authenticated contents API when a
//! token is configured, then the public raw mirror. Each source fails on
//! its own; the caller only sees `None` when every source failed.

mod case_index;
pub(crate) mod envelope;

pub use case_index::{parse_case_index, CaseIndexItem};

use crate::client::{ApiClient, FetchError, ResponseCache};
use crate::config::ContentConfig;
use envelope::ContentEnvelope;
use tracing::{debug, info, info_span, warn, Instrument};

/// A place a content file can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// `GET /repos/{owner}/{repo}/contents/{path}?ref={branch}` with a token.
    ContentsApi,
    /// `GET {raw}/{owner}/{repo}/{branch}/{path}` without credentials.
    RawMirror,
}

/// Reads text files from the content repository.
pub struct ContentFetcher {
    config: ContentConfig,
    api: Option<ApiClient>,
    raw: ApiClient,
}

impl ContentFetcher {
    /// Builds the fetcher's clients.
    ///
    /// # Errors
    ///
    /// Returns an error if an octocrab client cannot be built.
    pub fn new(config: ContentConfig, cache: ResponseCache) -> Result<Self, octocrab::Error> {
        let api = match config.token.as_deref() {
            Some(token) => Some(ApiClient::new(
                config.api_base_url.clone(),
                Some(token),
                cache.clone(),
            )?),
            None => None,
        };
        let raw = ApiClient::new(config.raw_base_url.clone(), None, cache)?;
        Ok(Self { config, api, raw })
    }

    /// The configuration this fetcher was built with.
    #[must_use]
    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Sources tried by [`fetch_text`](Self::fetch_text), in order.
    #[must_use]
    pub fn sources(&self) -> Vec<ContentSource> {
        self.strategies().into_iter().map(|(source, _)| source).collect()
    }

    /// Each source paired with the client that serves it.
    fn strategies(&self) -> Vec<(ContentSource, &ApiClient)> {
        let mut strategies = Vec::with_capacity(2);
        if let Some(api) = &self.api {
            strategies.push((ContentSource::ContentsApi, api));
        }
        strategies.push((ContentSource::RawMirror, &self.raw));
        strategies
    }

    /// Fetches a file by repository-relative path.
    ///
    /// Leading slashes are ignored. Returns `None` when no source produced
    /// the file; callers treat that as "content absent".
    pub async fn fetch_text(&self, path: &str) -> Option<String> {
        let clean = path.trim_start_matches('/');
        let segments: Vec<&str> = clean.split('/').collect();
        self.fetch_segments(&segments).await
    }

    /// `about.mdx`.
    pub async fn about_mdx(&self) -> Option<String> {
        self.fetch_text("about.mdx").await
    }

    /// `contact.mdx`.
    pub async fn contact_mdx(&self) -> Option<String> {
        self.fetch_text("contact.mdx").await
    }

    /// The case-study index; empty when absent or unparseable.
    pub async fn case_index(&self) -> Vec<CaseIndexItem> {
        match self.fetch_text("case-studies/index.json").await {
            Some(json) => parse_case_index(&json),
            None => Vec::new(),
        }
    }

    /// The MDX body of one case study. The slug is a single path segment.
    pub async fn case_mdx(&self, slug: &str) -> Option<String> {
        let file = format!("{slug}.mdx");
        self.fetch_segments(&["case-studies", file.as_str()]).await
    }

    async fn fetch_segments(&self, segments: &[&str]) -> Option<String> {
        let path = segments.join("/");
        let span = info_span!("fetch_text", path = %path);

        async {
            for (source, client) in self.strategies() {
                match self.fetch_from(source, client, segments).await {
                    Ok(text) => {
                        if self.config.debug {
                            info!(?source, "Content fetched");
                        } else {
                            debug!(?source, "Content fetched");
                        }
                        return Some(text);
                    }
                    Err(e) => {
                        if self.config.debug {
                            warn!(?source, error = %e, "Content source failed");
                        } else {
                            debug!(?source, error = %e, "Content source failed");
                        }
                    }
                }
            }
            None
        }
        .instrument(span)
        .await
    }

    async fn fetch_from(
        &self,
        source: ContentSource,
        client: &ApiClient,
        segments: &[&str],
    ) -> Result<String, FetchError> {
        let owner = self.config.owner.as_str();
        let repo = self.config.repo.as_str();
        let branch = self.config.branch.as_str();
        let policy = self.config.cache_policy();

        match source {
            ContentSource::ContentsApi => {
                let mut url = client.endpoint(
                    ["repos", owner, repo, "contents"]
                        .into_iter()
                        .chain(segments.iter().copied()),
                );
                url.query_pairs_mut().append_pair("ref", branch);
                let envelope: ContentEnvelope =
                    client.get_json(&url, self.config.api_timeout, policy).await?;
                envelope.decode()
            }
            ContentSource::RawMirror => {
                let url = client
                    .endpoint([owner, repo, branch].into_iter().chain(segments.iter().copied()));
                client.get_text(&url, self.config.raw_timeout, policy).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn each_source_has_its_own_client() {
        let mut config = ContentConfig::new("gn", "content");
        config.token = Some("secret".to_string());
        let fetcher = ContentFetcher::new(config, ResponseCache::new()).unwrap();

        let strategies: Vec<(ContentSource, bool)> = fetcher
            .strategies()
            .into_iter()
            .map(|(source, client)| (source, client.is_authenticated()))
            .collect();
        assert_eq!(
            strategies,
            [
                (ContentSource::ContentsApi, true),
                (ContentSource::RawMirror, false)
            ]
        );
    }

    #[tokio::test]
    async fn raw_mirror_alone_without_token() {
        let fetcher =
            ContentFetcher::new(ContentConfig::new("gn", "content"), ResponseCache::new()).unwrap();
        assert_eq!(fetcher.sources(), [ContentSource::RawMirror]);
    }
}

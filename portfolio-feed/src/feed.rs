//! The assembled portfolio data layer.

mod error;

pub use error::FeedError;

use crate::catalog::{Repo, RepoCatalog};
use crate::client::ResponseCache;
use crate::config::FeedConfig;
use crate::content::{CaseIndexItem, ContentFetcher};
use crate::enrichment::{RepoCardExtras, RepoEnricher};
use crate::pins::{order_repos_with_pinned, PinConfiguration};
use crate::toc::{build_toc, TocItem};
use serde::Serialize;
use tracing::{info, info_span, Instrument};

/// A repository with everything a project card displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCard {
    #[serde(flatten)]
    pub repo: Repo,

    /// Whether the repository is in the pin list.
    pub pinned: bool,

    #[serde(flatten)]
    pub extras: RepoCardExtras,
}

/// One case study page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStudy {
    pub slug: String,

    /// Index entry for `slug`, if the index lists it.
    pub meta: Option<CaseIndexItem>,

    pub mdx: String,

    pub toc: Vec<TocItem>,
}

/// Content fetcher, repository catalog and enricher sharing one cache.
pub struct Portfolio {
    content: ContentFetcher,
    catalog: RepoCatalog,
    enricher: RepoEnricher,
    pins: PinConfiguration,
    cache: ResponseCache,
}

impl Portfolio {
    /// Builds every client from `config`.
    pub fn new(config: FeedConfig, pins: PinConfiguration) -> Result<Self, FeedError> {
        let cache = ResponseCache::new();
        Ok(Self {
            content: ContentFetcher::new(config.content, cache.clone())?,
            catalog: RepoCatalog::new(config.github.clone(), cache.clone())?,
            enricher: RepoEnricher::new(config.github, cache.clone())?,
            pins,
            cache,
        })
    }

    /// Builds from the environment with the bundled pin list.
    pub fn from_env() -> Result<Self, FeedError> {
        Self::new(FeedConfig::from_env()?, PinConfiguration::bundled().clone())
    }

    pub fn content(&self) -> &ContentFetcher {
        &self.content
    }

    pub fn catalog(&self) -> &RepoCatalog {
        &self.catalog
    }

    pub fn enricher(&self) -> &RepoEnricher {
        &self.enricher
    }

    pub fn pins(&self) -> &PinConfiguration {
        &self.pins
    }

    /// The response cache shared by all clients.
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// The repository listing, pinned repositories first.
    pub async fn projects(&self) -> Vec<Repo> {
        order_repos_with_pinned(self.catalog.fetch_all_repos().await, &self.pins)
    }

    /// The ordered listing with card extras for every repository.
    pub async fn project_cards(&self) -> Vec<ProjectCard> {
        let span = info_span!("project_cards");

        async {
            let repos = self.projects().await;
            let extras = self.enricher.card_extras_for_all(&repos).await;
            let cards: Vec<ProjectCard> = repos
                .into_iter()
                .zip(extras)
                .map(|(repo, extras)| self.card(repo, extras))
                .collect();
            info!(count = cards.len(), "Project cards assembled");
            cards
        }
        .instrument(span)
        .await
    }

    /// One repository's card, looked up by name.
    pub async fn project_card(&self, name: &str) -> Option<ProjectCard> {
        let repo = self.catalog.fetch_repo_by_name(name).await?;
        let extras = self.enricher.card_extras(&repo).await;
        Some(self.card(repo, extras))
    }

    /// `about.mdx` from the content repository.
    pub async fn about(&self) -> Option<String> {
        self.content.about_mdx().await
    }

    /// `contact.mdx` from the content repository.
    pub async fn contact(&self) -> Option<String> {
        self.content.contact_mdx().await
    }

    /// The case-study index.
    pub async fn case_studies(&self) -> Vec<CaseIndexItem> {
        self.content.case_index().await
    }

    /// A case study's body, index entry and table of contents.
    ///
    /// `None` when the MDX body is absent; a missing index entry is not an
    /// error.
    pub async fn case_study(&self, slug: &str) -> Option<CaseStudy> {
        let (index, mdx) = futures::join!(self.content.case_index(), self.content.case_mdx(slug));
        let mdx = mdx?;
        let meta = index.into_iter().find(|item| item.slug == slug);
        Some(CaseStudy {
            slug: slug.to_string(),
            meta,
            toc: build_toc(&mdx),
            mdx,
        })
    }

    fn card(&self, repo: Repo, extras: RepoCardExtras) -> ProjectCard {
        ProjectCard {
            pinned: self.pins.is_pinned(&repo.name),
            repo,
            extras,
        }
    }
}

#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod catalog;
pub mod client;
pub mod config;
pub mod content;
pub mod enrichment;
pub mod feed;
pub mod pins;
pub mod toc;

pub use catalog::{merge_repos, sort_by_pushed, Repo, RepoCatalog, RepoFilter, RepoSource};
pub use client::{ApiClient, CachePolicy, FetchError, ResponseCache};
pub use config::{ConfigError, ContentConfig, FeedConfig, GithubConfig};
pub use content::{parse_case_index, CaseIndexItem, ContentFetcher, ContentSource};
pub use enrichment::{
    language_breakdown, LanguageBreakdown, RepoCardExtras, RepoEnricher, TopLanguage,
};
pub use feed::{CaseStudy, FeedError, Portfolio, ProjectCard};
pub use pins::{order_repos_with_pinned, PinConfiguration, PinError};
pub use toc::{build_toc, slugify, TocItem};

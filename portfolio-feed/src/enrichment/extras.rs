//! Project card extras.

use super::languages::LanguageBreakdown;
use super::readme::ReadmeMeta;
use crate::catalog::Repo;
use serde::Serialize;

/// Stack tags shown per card.
pub const MAX_STACK_TAGS: usize = 4;

/// Languages shown per card.
pub const MAX_TOP_LANGUAGES: usize = 3;

/// Language name and share, as shown on a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopLanguage {
    pub name: String,
    pub pct: f64,
}

/// Derived, display-only data for one project card.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoCardExtras {
    /// Cover image URL from the README.
    pub cover: Option<String>,

    /// README highlights.
    pub bullets: Vec<String>,

    /// Technology tags.
    pub stack: Vec<String>,

    /// Largest languages by bytes.
    pub top_langs: Vec<TopLanguage>,
}

impl RepoCardExtras {
    /// Assembles card extras from whatever the fetches produced.
    #[must_use]
    pub fn assemble(repo: &Repo, languages: &[LanguageBreakdown], readme: ReadmeMeta) -> Self {
        Self {
            cover: readme.cover,
            bullets: readme.bullets,
            stack: stack_tags(repo, languages),
            top_langs: languages
                .iter()
                .take(MAX_TOP_LANGUAGES)
                .map(|l| TopLanguage {
                    name: l.name.clone(),
                    pct: l.pct,
                })
                .collect(),
        }
    }
}

/// Primary language first, then topics (or detected languages when the
/// repository has no topics). Empty and repeated tags are dropped.
#[must_use]
pub fn stack_tags(repo: &Repo, languages: &[LanguageBreakdown]) -> Vec<String> {
    let base: Vec<&str> = if repo.topics.is_empty() {
        languages.iter().map(|l| l.name.as_str()).collect()
    } else {
        repo.topics.iter().map(String::as_str).collect()
    };

    let mut stack: Vec<String> = Vec::with_capacity(MAX_STACK_TAGS);
    for tag in repo.language.as_deref().into_iter().chain(base) {
        if stack.len() == MAX_STACK_TAGS {
            break;
        }
        if !tag.is_empty() && !stack.iter().any(|t| t == tag) {
            stack.push(tag.to_string());
        }
    }
    stack
}

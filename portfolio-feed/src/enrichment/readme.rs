//! Cover image and highlight extraction from README Markdown.
//!
//! Both are heuristics: the first non-badge image becomes the cover and the
//! first short bullets near the top become highlights.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Lines scanned for bullet highlights.
const BULLET_SCAN_LINES: usize = 80;

/// Highlights kept per README.
const MAX_BULLETS: usize = 2;

/// Bullets at or above this many characters are skipped.
const MAX_BULLET_CHARS: usize = 140;

static IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[[^\]]*\]\(([^)\s]+)(?:\s+"[^"]*")?\)"#).expect("image pattern is valid")
});

static BADGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)shields\.io|badgen\.net|badge|visitor|coverage|workflow")
        .expect("badge pattern is valid")
});

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*]\s+(.+?)\s*$").expect("bullet pattern is valid"));

static ABSOLUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("absolute pattern is valid"));

/// What a README contributes to a project card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadmeMeta {
    /// Absolute URL of the first non-badge image.
    pub cover: Option<String>,

    /// Up to two short bullet items from the top of the file.
    pub bullets: Vec<String>,
}

/// Where relative README paths resolve to.
#[derive(Debug, Clone, Copy)]
pub struct RawLocation<'a> {
    /// Raw mirror base URL.
    pub base: &'a Url,
    pub owner: &'a str,
    pub repo: &'a str,
    pub branch: &'a str,
}

/// Extracts the cover image and highlights. `None` yields empty metadata.
#[must_use]
pub fn extract_readme_meta(markdown: Option<&str>, location: RawLocation<'_>) -> ReadmeMeta {
    let Some(markdown) = markdown else {
        return ReadmeMeta::default();
    };

    let cover = IMAGE
        .captures_iter(markdown)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|candidate| !candidate.is_empty() && !BADGE.is_match(candidate))
        .map(|candidate| absolutize(candidate, location));

    let bullets = markdown
        .lines()
        .take(BULLET_SCAN_LINES)
        .filter_map(|line| BULLET.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|text| text.chars().count() < MAX_BULLET_CHARS)
        .take(MAX_BULLETS)
        .map(str::to_string)
        .collect();

    ReadmeMeta { cover, bullets }
}

/// Resolves a README-relative path against the raw mirror.
#[must_use]
pub fn absolutize(url: &str, location: RawLocation<'_>) -> String {
    if ABSOLUTE.is_match(url) {
        return url.to_string();
    }
    let clean = url
        .strip_prefix("./")
        .or_else(|| url.strip_prefix('/'))
        .unwrap_or(url);
    format!(
        "{}/{}/{}/{}/{}",
        location.base.as_str().trim_end_matches('/'),
        location.owner,
        location.repo,
        location.branch,
        clean
    )
}

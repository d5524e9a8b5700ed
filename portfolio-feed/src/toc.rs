//! Table of contents for MDX pages.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{2,4})\s+(.+?)\s*$").expect("heading pattern is valid"));

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("inline code pattern is valid"));

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\(.*?\)").expect("link pattern is valid"));

static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[`~!@#$%^&*()+={}\[\]|\\:;"'<>,.?/]+"#).expect("punctuation pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static DASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("dash pattern is valid"));

/// One `##`, `###` or `####` heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    /// Heading level, 2 to 4.
    pub depth: u8,
    pub text: String,
    /// Anchor id derived from `text`.
    pub id: String,
}

/// Anchor id for a heading.
#[must_use]
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = PUNCTUATION.replace_all(&lower, "");
    let dashed = WHITESPACE.replace_all(&stripped, "-");
    let collapsed = DASHES.replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_string()
}

/// Headings of depth 2 to 4, in document order.
#[must_use]
pub fn build_toc(mdx: &str) -> Vec<TocItem> {
    mdx.lines()
        .filter_map(|line| HEADING.captures(line))
        .filter_map(|caps| {
            let depth = u8::try_from(caps.get(1)?.as_str().len()).ok()?;
            let raw = caps.get(2)?.as_str();
            let unquoted = INLINE_CODE.replace_all(raw, "$1");
            let text = LINK.replace_all(&unquoted, "$1").trim().to_string();
            let id = slugify(&text);
            Some(TocItem { depth, text, id })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_strips_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  What's  new?  "), "whats-new");
        assert_eq!(slugify("a - b"), "a-b");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn collects_levels_two_to_four() {
        let mdx = "# Title\n## Intro\ntext\n### The `Parser` API\r\n\
                   #### [Docs](https://x.dev) link\n##### Deep\n##NoSpace\n";
        let toc = build_toc(mdx);

        assert_eq!(
            toc,
            vec![
                TocItem {
                    depth: 2,
                    text: "Intro".to_string(),
                    id: "intro".to_string(),
                },
                TocItem {
                    depth: 3,
                    text: "The Parser API".to_string(),
                    id: "the-parser-api".to_string(),
                },
                TocItem {
                    depth: 4,
                    text: "Docs link".to_string(),
                    id: "docs-link".to_string(),
                },
            ]
        );
    }

    #[test]
    fn empty_document_has_no_entries() {
        assert!(build_toc("").is_empty());
    }
}

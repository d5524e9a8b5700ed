//! Case-study index (`case-studies/index.json`).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// One entry of the case-study index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseIndexItem {
    /// URL slug, also the MDX file stem.
    pub slug: String,

    /// Display title.
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parses the index file.
///
/// Anything but a JSON array yields an empty index; array entries that do
/// not have the expected shape are skipped.
#[must_use]
pub fn parse_case_index(json: &str) -> Vec<CaseIndexItem> {
    let items = match serde_json::from_str::<Value>(json) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("Case-study index is not a JSON array");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "Case-study index is not valid JSON");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<CaseIndexItem>(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!(error = %e, "Skipping malformed case-study entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries() {
        let index = parse_case_index(
            r#"[
                {"slug": "search", "title": "Search rewrite", "description": "Faster"},
                {"slug": "billing", "title": "Billing"}
            ]"#,
        );
        assert_eq!(index.len(), 2);
        assert_eq!(index[0].description.as_deref(), Some("Faster"));
        assert_eq!(index[1].description, None);
    }

    #[test]
    fn non_array_is_empty() {
        assert!(parse_case_index(r#"{"slug": "x", "title": "y"}"#).is_empty());
        assert!(parse_case_index("not json").is_empty());
    }

    #[test]
    fn skips_malformed_entries() {
        let index = parse_case_index(r#"[{"slug": "a", "title": "A"}, {"slug": 3}, "b"]"#);
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].slug, "a");
    }
}

//! Pinned repositories.
//!
//! A [`PinConfiguration`] is loaded once (the bundled `data/pinned.json` or a
//! file given by the caller) and then only read. Ordering takes it by
//! reference.

mod error;

pub use error::PinError;

use crate::catalog::Repo;
use serde_json::Value;
use std::cmp::Reverse;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

const BUNDLED_PINS: &str = include_str!("../data/pinned.json");

/// Ordered repository names shown ahead of everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinConfiguration {
    pinned: Vec<String>,
}

impl PinConfiguration {
    /// Creates a configuration from names in display order.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pinned: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses `{"pinned": [...]}`.
    ///
    /// A missing or non-array `pinned` key yields an empty list, and
    /// non-string entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not valid JSON.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        let pinned = match value.get("pinned") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };
        Ok(Self { pinned })
    }

    /// Loads a pin file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`PinError`] if the file cannot be read or is not JSON.
    pub fn load(path: &Path) -> Result<Self, PinError> {
        let contents = std::fs::read_to_string(path).map_err(|source| PinError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let pins = Self::from_json_str(&contents).map_err(|source| PinError::Json {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), count = pins.pinned.len(), "Loaded pin file");
        Ok(pins)
    }

    /// The pin list compiled into the crate.
    pub fn bundled() -> &'static Self {
        static BUNDLED: OnceLock<PinConfiguration> = OnceLock::new();
        BUNDLED.get_or_init(|| Self::from_json_str(BUNDLED_PINS).unwrap_or_default())
    }

    /// Pinned names in display order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.pinned
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn is_pinned(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.pinned.iter().any(|pin| pin.to_lowercase() == name)
    }
}

/// Orders `repos` with pinned repositories first, in pin order.
///
/// Each pin takes the first not-yet-placed repository whose name matches
/// case-insensitively; pins with no match are skipped. The remainder follows,
/// most recently pushed (or updated) first. The output is always a
/// permutation of the input.
#[must_use]
pub fn order_repos_with_pinned(repos: Vec<Repo>, pins: &PinConfiguration) -> Vec<Repo> {
    let mut slots: Vec<(String, Option<Repo>)> = repos
        .into_iter()
        .map(|repo| (repo.name.to_lowercase(), Some(repo)))
        .collect();

    let mut ordered = Vec::with_capacity(slots.len());
    for pin in &pins.pinned {
        let pin = pin.to_lowercase();
        let hit = slots
            .iter_mut()
            .find(|(name, slot)| slot.is_some() && *name == pin)
            .and_then(|(_, slot)| slot.take());
        if let Some(repo) = hit {
            ordered.push(repo);
        }
    }

    let mut rest: Vec<Repo> = slots.into_iter().filter_map(|(_, slot)| slot).collect();
    rest.sort_by_key(|repo| Reverse(repo.recency_millis()));
    ordered.extend(rest);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::repo::fixtures::repo;

    fn names(repos: &[Repo]) -> Vec<&str> {
        repos.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn pinned_first_in_pin_order() {
        let pins = PinConfiguration::new(["alpha", "Beta"]);
        let repos = vec![
            repo("beta", "2024-01-01T00:00:00Z"),
            repo("gamma", "2024-03-01T00:00:00Z"),
            repo("alpha", "2024-02-01T00:00:00Z"),
        ];

        assert_eq!(
            names(&order_repos_with_pinned(repos, &pins)),
            ["alpha", "beta", "gamma"]
        );
    }

    #[test]
    fn rest_sorted_by_recency_with_updated_fallback() {
        let pins = PinConfiguration::default();
        let mut stale = repo("stale", "");
        stale.updated_at = Some("2024-06-01T00:00:00Z".to_string());
        let mut broken = repo("broken", "not a date");
        broken.updated_at = None;
        let repos = vec![
            broken,
            repo("old", "2023-01-01T00:00:00Z"),
            stale,
            repo("new", "2024-01-01T00:00:00Z"),
        ];

        assert_eq!(
            names(&order_repos_with_pinned(repos, &pins)),
            ["stale", "new", "old", "broken"]
        );
    }

    #[test]
    fn unmatched_and_repeated_pins_are_skipped() {
        let pins = PinConfiguration::new(["missing", "one", "ONE"]);
        let repos = vec![
            repo("two", "2024-01-01T00:00:00Z"),
            repo("one", "2023-01-01T00:00:00Z"),
        ];

        let ordered = order_repos_with_pinned(repos, &pins);
        assert_eq!(names(&ordered), ["one", "two"]);
    }

    #[test]
    fn same_named_repos_are_all_kept() {
        let pins = PinConfiguration::new(["site"]);
        let mut other = repo("Site", "2024-05-01T00:00:00Z");
        other.full_name = "org/Site".to_string();
        let repos = vec![repo("site", "2024-01-01T00:00:00Z"), other];

        let ordered = order_repos_with_pinned(repos, &pins);
        assert_eq!(ordered.len(), 2);
        assert_eq!(ordered[0].full_name, "gn/site");
        assert_eq!(ordered[1].full_name, "org/Site");
    }

    #[test]
    fn is_pinned_ignores_case() {
        let pins = PinConfiguration::new(["Portfolio"]);
        assert!(pins.is_pinned("portfolio"));
        assert!(pins.is_pinned("PORTFOLIO"));
        assert!(!pins.is_pinned("portfolio-feed"));
    }

    #[test]
    fn parses_only_string_pins() {
        let pins = PinConfiguration::from_json_str(r#"{"pinned": ["a", 1, null, "b"]}"#).unwrap();
        assert_eq!(pins.names(), ["a", "b"]);

        let pins = PinConfiguration::from_json_str(r#"{"pinned": "a"}"#).unwrap();
        assert!(pins.names().is_empty());

        assert!(PinConfiguration::from_json_str("{").is_err());
    }

    #[test]
    fn bundled_pins_parse() {
        assert_eq!(
            PinConfiguration::bundled(),
            &PinConfiguration::from_json_str(BUNDLED_PINS).unwrap()
        );
    }
}

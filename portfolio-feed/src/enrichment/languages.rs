//! Language byte counts and their percentages.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// One language's share of a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageBreakdown {
    /// Language name as reported by GitHub.
    pub name: String,

    /// Bytes of code in this language.
    pub bytes: u64,

    /// Percentage of the repository's total bytes.
    pub pct: f64,
}

/// Converts `/languages` byte counts into percentages, largest first.
///
/// An empty or all-zero map produces zero percentages rather than NaN.
#[must_use]
pub fn language_breakdown(bytes_by_language: BTreeMap<String, u64>) -> Vec<LanguageBreakdown> {
    let total = match bytes_by_language.values().sum::<u64>() {
        0 => 1,
        total => total,
    };

    let mut languages: Vec<LanguageBreakdown> = bytes_by_language
        .into_iter()
        .map(|(name, bytes)| LanguageBreakdown {
            name,
            bytes,
            pct: bytes as f64 / total as f64 * 100.0,
        })
        .collect();
    languages.sort_by_key(|l| Reverse(l.bytes));
    languages
}

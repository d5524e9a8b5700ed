//! Time-based response cache with stale-while-revalidate reads.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// How a request may use the response cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Always go to the network and never store the body.
    NoStore,
    /// Serve a stored body while younger than the window; once older, serve
    /// it anyway and refresh in the background.
    Revalidate(Duration),
}

/// Result of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lookup {
    /// Stored body within its window.
    Fresh(String),
    /// Stored body past its window. `refresh` is true for exactly one caller
    /// until the entry is stored again or the refresh is abandoned.
    Stale { body: String, refresh: bool },
    /// Nothing stored.
    Miss,
}

#[derive(Debug)]
struct Entry {
    body: String,
    stored_at: Instant,
    refreshing: bool,
}

/// Shared response bodies keyed by request identity.
///
/// Cloning is cheap and clones share storage. Entries are replaced, never
/// evicted.
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl ResponseCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub(crate) fn lookup(&self, key: &str, ttl: Duration) -> Lookup {
        let mut entries = self.lock();
        let Some(entry) = entries.get_mut(key) else {
            return Lookup::Miss;
        };
        if entry.stored_at.elapsed() < ttl {
            return Lookup::Fresh(entry.body.clone());
        }
        let refresh = !entry.refreshing;
        entry.refreshing = true;
        Lookup::Stale {
            body: entry.body.clone(),
            refresh,
        }
    }

    pub(crate) fn store(&self, key: String, body: String) {
        self.lock().insert(
            key,
            Entry {
                body,
                stored_at: Instant::now(),
                refreshing: false,
            },
        );
    }

    /// Lets the next stale read start another refresh.
    pub(crate) fn abandon_refresh(&self, key: &str) {
        if let Some(entry) = self.lock().get_mut(key) {
            entry.refreshing = false;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

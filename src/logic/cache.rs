//! Session-scoped memoization of search results.

use std::collections::HashMap;

use crate::state::Vendor;

/// Result cache keyed by normalized query.
///
/// Append-only for the life of the process: entries are never evicted or
/// invalidated, and a hit republishes the stored sequence without a network
/// call. Owned exclusively by the search controller.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<String, Vec<Vendor>>,
}

impl QueryCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result sequence for `key`, if a search already resolved it.
    pub fn get(&self, key: &str) -> Option<&[Vendor]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Store the results of a successful search under `key`.
    pub fn put(&mut self, key: String, results: Vec<Vendor>) {
        self.entries.insert(key, results);
    }

    /// Number of cached queries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no query has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

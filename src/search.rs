//! Docs search index: wholesale-replace storage and substring queries.
//!
//! The documentation generator rebuilds the whole index on every docs build,
//! so the only mutation is [`SearchIndexStore::replace`]; entries are never
//! patched in place. As with the history store, mutation takes `&mut self`
//! and readers borrow a consistent snapshot.

use tracing::debug;

use crate::schema::SearchEntry;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchIndexStore {
    entries: Vec<SearchEntry>,
}

impl SearchIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<SearchEntry>) -> Self {
        Self { entries }
    }

    /// Discards all prior entries and installs `entries` in their place.
    pub fn replace(&mut self, entries: Vec<SearchEntry>) {
        debug!(
            prior = self.entries.len(),
            installed = entries.len(),
            "replacing search index"
        );
        self.entries = entries;
    }

    /// Entries whose `title` or `text` contains `term` as a case-insensitive
    /// substring, in index order.
    ///
    /// The empty term is a substring of every title, so `query("")` returns
    /// the whole index; callers wanting "no term, no results" guard upstream.
    pub fn query(&self, term: &str) -> Vec<&SearchEntry> {
        let needle = term.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.title.to_lowercase().contains(&needle)
                    || e.text.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<SearchEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Name-substring search over the loaded element set.

use crate::document::leaf_name;
use crate::store::RegisterStore;

/// One indexed element: its id plus lowercase match keys.
#[derive(Debug, Clone)]
struct IndexEntry {
    id: String,
    leaf_lower: String,
    id_lower: String,
}

/// Case-insensitive substring index over element names.
///
/// Built as a snapshot of the store's id set and rebuilt wholesale on store
/// reload; there is no incremental add/remove. Matching carries no relevance
/// score beyond match/no-match, so document (insertion) order is the
/// authoritative tie-break.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    /// Builds an index from the store's current element set.
    #[must_use]
    pub fn build(store: &RegisterStore) -> Self {
        let entries = store
            .element_ids()
            .map(|id| IndexEntry {
                id: id.to_owned(),
                leaf_lower: leaf_name(id).to_lowercase(),
                id_lower: id.to_lowercase(),
            })
            .collect();
        Self { entries }
    }

    /// Returns the number of indexed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns ids matching `text`, best-ranked first.
    ///
    /// Leaf-name matches come first in document order, followed by elements
    /// whose full dotted id matches but whose leaf does not. An empty or
    /// whitespace-only query yields an empty sequence, which callers use to
    /// distinguish "no query" from "no results".
    #[must_use]
    pub fn query(&self, text: &str) -> Vec<&str> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&str> = self
            .entries
            .iter()
            .filter(|entry| entry.leaf_lower.contains(&needle))
            .map(|entry| entry.id.as_str())
            .collect();

        matches.extend(
            self.entries
                .iter()
                .filter(|entry| {
                    !entry.leaf_lower.contains(&needle) && entry.id_lower.contains(&needle)
                })
                .map(|entry| entry.id.as_str()),
        );

        matches
    }
}

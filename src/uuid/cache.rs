//! Identifier cache: resolved identifier strings to model keys.

use dashmap::DashMap;

use crate::core::ModelKey;

/// Cache of resolved identifiers (thread-safe).
///
/// Maps the full identifier string (`page://abc123`) to the model key it
/// resolved to. Entries are inserted on successful resolution and on
/// generation, and live for the process; the permalink path consults
/// only this cache, never the index scan.
#[derive(Debug, Default)]
pub struct UuidCache {
    entries: DashMap<String, ModelKey>,
}

impl UuidCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn get(&self, id: &str) -> Option<ModelKey> {
        self.entries.get(id).map(|r| r.clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn insert(&self, id: impl Into<String>, key: ModelKey) {
        self.entries.insert(id.into(), key);
    }

    /// Drop a stale entry (its key no longer names a live model).
    pub fn remove(&self, id: &str) {
        self.entries.remove(id);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of all entries, sorted by identifier string.
    pub fn snapshot(&self) -> Vec<(String, ModelKey)> {
        let mut all: Vec<_> = self
            .entries
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        all.sort();
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> ModelKey {
        ModelKey::new(s).unwrap()
    }

    #[test]
    fn test_insert_get_remove() {
        let cache = UuidCache::new();
        assert!(cache.is_empty());

        cache.insert("page://abc123", key("blog/hello"));
        assert!(cache.contains("page://abc123"));
        assert_eq!(cache.get("page://abc123"), Some(key("blog/hello")));

        cache.remove("page://abc123");
        assert_eq!(cache.get("page://abc123"), None);
    }

    #[test]
    fn test_snapshot_sorted() {
        let cache = UuidCache::new();
        cache.insert("user://zz", key("alice"));
        cache.insert("page://aa", key("blog"));

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].0, "page://aa");
        assert_eq!(snapshot[1].0, "user://zz");
    }
}

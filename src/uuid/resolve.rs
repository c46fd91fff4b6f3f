//! Identifier resolution: cache lookup backed by lazy index scans.

use super::model_uuid::retrieve_id;
use super::uri::Uri;
use crate::debug;
use crate::model::{Identifiable, Model, Site};

impl Uri {
    /// Resolve this identifier to a live model.
    ///
    /// Cache lookup first; a hit whose key no longer names a live model
    /// is dropped and treated as a miss. On miss, falls back to the
    /// index scan. `None` means nothing matches — absence is a normal
    /// outcome, not an error.
    pub fn resolve(&self, site: &Site) -> Option<Model> {
        let id = self.to_string();
        if let Some(key) = site.uuids().get(&id) {
            match site.model(self.scheme(), key.as_str()) {
                Some(model) => return Some(model),
                None => {
                    debug!("uuid"; "dropping stale cache entry {id} -> {key}");
                    site.uuids().remove(&id);
                }
            }
        }
        self.find_by_index(site)
    }

    /// Scan the index for this identifier's host: the context subtree
    /// first (when set), then the global collection. Scans run in sorted
    /// key order and the first match wins, so resolution is
    /// deterministic even if two records carry the same host.
    pub fn find_by_index(&self, site: &Site) -> Option<Model> {
        if !self.has_host() {
            return None;
        }

        if let Some(scope) = self.context()
            && let Some(model) = self.scan(site, site.models_within(self.scheme(), scope))
        {
            return Some(model);
        }

        self.scan(site, site.models(self.scheme()))
    }

    fn scan(&self, site: &Site, models: Vec<Model>) -> Option<Model> {
        for model in models {
            if retrieve_id(site, &model).as_deref() == Some(self.host()) {
                site.uuids().insert(self.to_string(), model.key().clone());
                return Some(model);
            }
        }
        None
    }
}

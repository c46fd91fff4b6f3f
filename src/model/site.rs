//! Site aggregate: config, store, auth, identifier cache, and the
//! scanned model collections.
//!
//! The site is the explicit context every identifier operation takes;
//! nothing here lives in process-wide globals. Collections are
//! `BTreeMap`s so index scans iterate in sorted key order, which makes
//! resolution deterministic under duplicate hosts.

use std::collections::BTreeMap;
use std::path::Path;

use jwalk::WalkDir;

use super::file::FileModel;
use super::page::{PAGE_RECORD, Page};
use super::user::{USER_RECORD, USERS_DIR, User};
use super::{Identifiable, Model, Scheme};
use crate::auth::AuthContext;
use crate::config::SiteConfig;
use crate::content::{ContentRecord, ContentStore, StoreError};
use crate::core::ModelKey;
use crate::uuid::UuidCache;
use crate::{debug, log};

/// One loaded site: the context object for all identifier operations.
#[derive(Debug)]
pub struct Site {
    config: SiteConfig,
    store: ContentStore,
    auth: AuthContext,
    uuids: UuidCache,
    pages: BTreeMap<ModelKey, Page>,
    files: BTreeMap<ModelKey, FileModel>,
    users: BTreeMap<ModelKey, User>,
}

impl Site {
    /// Load a site by scanning the content tree for model records.
    pub fn load(config: SiteConfig) -> Self {
        let root = config.content_root();
        let store = ContentStore::new(&root);
        let mut site = Self {
            config,
            store,
            auth: AuthContext::default(),
            uuids: UuidCache::new(),
            pages: BTreeMap::new(),
            files: BTreeMap::new(),
            users: BTreeMap::new(),
        };
        site.scan(&root);
        site
    }

    /// Scan the content tree, populating the model collections.
    fn scan(&mut self, root: &Path) {
        if !root.is_dir() {
            debug!("scan"; "content root {} does not exist", root.display());
            return;
        }

        let mut records: Vec<_> = WalkDir::new(root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        records.sort();

        for path in records {
            let Ok(rel) = path.strip_prefix(root) else {
                continue;
            };
            let rel = rel.to_string_lossy().replace('\\', "/");
            self.classify_record(&rel);
        }

        debug!(
            "scan";
            "{} pages, {} files, {} users under {}",
            self.pages.len(),
            self.files.len(),
            self.users.len(),
            root.display()
        );
    }

    /// Place one record path into the matching collection.
    fn classify_record(&mut self, rel: &str) {
        let (dir, name) = match rel.rsplit_once('/') {
            Some((dir, name)) => (dir, name),
            None => ("", rel),
        };

        if let Some(user_key) = self.match_user_record(rel) {
            self.users.insert(user_key.clone(), User::new(user_key));
            return;
        }
        if rel.starts_with(&format!("{USERS_DIR}/")) {
            debug!("scan"; "skipping non-account record under {USERS_DIR}/: {rel}");
            return;
        }

        if self.is_record_name(name, PAGE_RECORD) {
            match ModelKey::new(dir) {
                Some(key) => {
                    self.pages.insert(key.clone(), Page::new(key));
                }
                None => debug!("scan"; "skipping top-level {name} (content root is not a page)"),
            }
            return;
        }

        if let Some(asset) = self.match_file_sidecar(rel) {
            self.files.insert(asset.clone(), FileModel::new(asset));
        } else {
            debug!("scan"; "skipping unrecognized record {rel}");
        }
    }

    /// `users/<name>/user.toml` (or `user.<locale>.toml`) -> user key.
    fn match_user_record(&self, rel: &str) -> Option<ModelKey> {
        let mut parts = rel.split('/');
        if parts.next() != Some(USERS_DIR) {
            return None;
        }
        let name = parts.next()?;
        let record = parts.next()?;
        if parts.next().is_some() || !self.is_record_name(record, USER_RECORD) {
            return None;
        }
        ModelKey::new(name)
    }

    /// `<asset>.toml` or `<asset>.<locale>.toml` -> asset key, where the
    /// asset itself carries an extension (`cover.png`). Bare `<name>.toml`
    /// files are not sidecars.
    fn match_file_sidecar(&self, rel: &str) -> Option<ModelKey> {
        let stem = rel.strip_suffix(".toml")?;
        let asset = match stem.rsplit_once('.') {
            Some((head, tail)) if self.is_locale(tail) => head,
            _ => stem,
        };
        let name = asset.rsplit_once('/').map_or(asset, |(_, n)| n);
        if !name.contains('.') {
            return None;
        }
        ModelKey::new(asset)
    }

    /// `<record>.toml` or `<record>.<locale>.toml`.
    fn is_record_name(&self, name: &str, record: &str) -> bool {
        let Some(stem) = name.strip_suffix(".toml") else {
            return false;
        };
        if stem == record {
            return true;
        }
        stem.strip_prefix(record)
            .and_then(|rest| rest.strip_prefix('.'))
            .is_some_and(|locale| self.is_locale(locale))
    }

    fn is_locale(&self, code: &str) -> bool {
        if self.config.locales().is_empty() {
            code == self.config.default_locale()
        } else {
            self.config.locales().iter().any(|l| l == code)
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Process-lifetime identifier cache.
    pub fn uuids(&self) -> &UuidCache {
        &self.uuids
    }

    // ------------------------------------------------------------------
    // Model lookup and iteration
    // ------------------------------------------------------------------

    /// Look up a live model by scheme and key.
    pub fn model(&self, scheme: Scheme, key: &str) -> Option<Model> {
        match scheme {
            Scheme::Page => self.pages.get(key).cloned().map(Model::Page),
            Scheme::File => self.files.get(key).cloned().map(Model::File),
            Scheme::User => self.users.get(key).cloned().map(Model::User),
        }
    }

    /// All models of one kind, in sorted key order.
    pub fn models(&self, scheme: Scheme) -> Vec<Model> {
        match scheme {
            Scheme::Page => self.pages.values().cloned().map(Model::Page).collect(),
            Scheme::File => self.files.values().cloned().map(Model::File).collect(),
            Scheme::User => self.users.values().cloned().map(Model::User).collect(),
        }
    }

    /// Models of one kind inside the subtree rooted at `scope`, in
    /// sorted key order.
    pub fn models_within(&self, scheme: Scheme, scope: &ModelKey) -> Vec<Model> {
        self.models(scheme)
            .into_iter()
            .filter(|m| m.key().is_within(scope))
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    // ------------------------------------------------------------------
    // Content access
    // ------------------------------------------------------------------

    /// Read a model's content record (missing reads as empty).
    pub fn read_content(
        &self,
        model: &Model,
        locale: Option<&str>,
    ) -> Result<ContentRecord, StoreError> {
        model.read_content(&self.store, locale)
    }

    /// Write a model's content record, enforcing the acting principal's
    /// per-scheme write permission.
    pub fn write_content(
        &self,
        model: &Model,
        record: &ContentRecord,
        locale: Option<&str>,
    ) -> Result<(), StoreError> {
        let principal = self.auth.current();
        if !principal.can_update(model.scheme()) {
            log!("error"; "{} write to {} denied for {}", model.scheme(), model.key(), principal);
            return Err(StoreError::Forbidden(principal, model.scheme()));
        }
        self.store.write(&model.record_path(locale), record)
    }
}

//! Flat-file content store with a write-through record cache.
//!
//! Records live as TOML files under the content root. Durable writes go
//! through a temp file in the record's directory followed by a rename, so
//! concurrent readers never observe a torn record. Reads fill the
//! in-memory cache; writes update cache and disk together (the direct
//! write path identifier persistence depends on).

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use thiserror::Error;

use super::record::ContentRecord;
use crate::auth::Principal;
use crate::model::Scheme;

/// Content persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse record `{0}`")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("failed to serialize record `{0}`")]
    Serialize(PathBuf, #[source] toml::ser::Error),

    #[error("{0} principal may not update {1} content")]
    Forbidden(Principal, Scheme),
}

/// Flat-file TOML record storage rooted at the content directory.
#[derive(Debug)]
pub struct ContentStore {
    root: PathBuf,
    /// Record cache keyed by store-relative path.
    records: RwLock<FxHashMap<PathBuf, ContentRecord>>,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            records: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a record file exists on disk.
    pub fn exists(&self, rel: &Path) -> bool {
        self.root.join(rel).is_file()
    }

    /// Read a record. A missing file is an empty record, not an error
    /// (legitimately new content). Non-empty reads are cached.
    pub fn read(&self, rel: &Path) -> Result<ContentRecord, StoreError> {
        if let Some(record) = self.records.read().get(rel) {
            return Ok(record.clone());
        }

        let abs = self.root.join(rel);
        if !abs.is_file() {
            return Ok(ContentRecord::new());
        }

        let text = fs::read_to_string(&abs).map_err(|e| StoreError::Io(abs.clone(), e))?;
        let record = ContentRecord::from_toml(&text).map_err(|e| StoreError::Parse(abs, e))?;

        // Only cache non-empty records so a retried read after an
        // empty first read still goes to disk.
        if !record.is_empty() {
            self.records
                .write()
                .insert(rel.to_path_buf(), record.clone());
        }
        Ok(record)
    }

    /// Write a record: cache first, then atomically to disk
    /// (temp file + rename in the record's directory).
    pub fn write(&self, rel: &Path, record: &ContentRecord) -> Result<(), StoreError> {
        let abs = self.root.join(rel);
        let text = record
            .to_toml()
            .map_err(|e| StoreError::Serialize(abs.clone(), e))?;

        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(parent.to_path_buf(), e))?;
        }

        let tmp = temp_sibling(&abs);
        fs::write(&tmp, text).map_err(|e| StoreError::Io(tmp.clone(), e))?;
        if let Err(e) = fs::rename(&tmp, &abs) {
            fs::remove_file(&tmp).ok();
            return Err(StoreError::Io(abs, e));
        }

        self.records
            .write()
            .insert(rel.to_path_buf(), record.clone());
        Ok(())
    }

    /// Drop a cached record (next read goes to disk).
    pub fn invalidate(&self, rel: &Path) {
        self.records.write().remove(rel);
    }

    pub fn clear_cache(&self) {
        self.records.write().clear();
    }
}

/// Temp file path in the same directory as `abs` (rename must not cross
/// filesystems).
fn temp_sibling(abs: &Path) -> PathBuf {
    let name = abs
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "record".into());
    abs.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, ContentStore) {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_missing_record_reads_empty() {
        let (_dir, store) = store();
        let record = store.read(Path::new("blog/hello/page.toml")).unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let (_dir, store) = store();
        let rel = Path::new("blog/hello/page.toml");

        let mut record = ContentRecord::new();
        record.set("title", "Hello");
        store.write(rel, &record).unwrap();

        let read_back = store.read(rel).unwrap();
        assert_eq!(read_back, record);
        assert!(store.exists(rel));
    }

    #[test]
    fn test_write_is_durable_not_just_cached() {
        let (dir, store) = store();
        let rel = Path::new("about/page.toml");

        let mut record = ContentRecord::new();
        record.set("title", "About");
        store.write(rel, &record).unwrap();

        // A second store over the same root sees the record from disk.
        let fresh = ContentStore::new(dir.path());
        assert_eq!(fresh.read(rel).unwrap(), record);

        // No temp files left behind.
        let leftovers: Vec<_> = fs::read_dir(dir.path().join("about"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_invalidate_rereads_disk() {
        let (dir, store) = store();
        let rel = Path::new("blog/page.toml");

        let mut record = ContentRecord::new();
        record.set("title", "Old");
        store.write(rel, &record).unwrap();

        // External writer replaces the file behind the cache.
        fs::write(dir.path().join(rel), "title = \"New\"\n").unwrap();
        assert_eq!(
            store.read(rel).unwrap().get("title").and_then(|v| v.as_str()),
            Some("Old")
        );

        store.invalidate(rel);
        assert_eq!(
            store.read(rel).unwrap().get("title").and_then(|v| v.as_str()),
            Some("New")
        );
    }

    #[test]
    fn test_parse_error_propagates() {
        let (dir, store) = store();
        fs::create_dir_all(dir.path().join("bad")).unwrap();
        fs::write(dir.path().join("bad/page.toml"), "title = ").unwrap();
        assert!(matches!(
            store.read(Path::new("bad/page.toml")),
            Err(StoreError::Parse(..))
        ));
    }
}

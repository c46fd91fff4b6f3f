//! File model: an asset in the content tree with a TOML sidecar record.

use std::path::PathBuf;

use super::{Identifiable, Scheme};
use crate::core::ModelKey;

/// A content file (asset), keyed by its path relative to the content
/// root (`blog/hello/cover.png`). Its record is the `<asset>.toml`
/// sidecar next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileModel {
    key: ModelKey,
}

impl FileModel {
    pub fn new(key: ModelKey) -> Self {
        Self { key }
    }
}

impl Identifiable for FileModel {
    fn scheme(&self) -> Scheme {
        Scheme::File
    }

    fn key(&self) -> &ModelKey {
        &self.key
    }

    fn record_path(&self, locale: Option<&str>) -> PathBuf {
        match locale {
            Some(l) => PathBuf::from(format!("{}.{l}.toml", self.key)),
            None => PathBuf::from(format!("{}.toml", self.key)),
        }
    }
}

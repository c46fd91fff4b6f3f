//! Page model: a directory in the content tree with a `page.toml` record.

use std::path::PathBuf;

use super::{Identifiable, Scheme};
use crate::core::ModelKey;

/// Record file name for pages (locale-less base record).
pub const PAGE_RECORD: &str = "page";

/// A page, keyed by its directory path relative to the content root
/// (`blog/hello`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    key: ModelKey,
}

impl Page {
    pub fn new(key: ModelKey) -> Self {
        Self { key }
    }
}

impl Identifiable for Page {
    fn scheme(&self) -> Scheme {
        Scheme::Page
    }

    fn key(&self) -> &ModelKey {
        &self.key
    }

    fn record_path(&self, locale: Option<&str>) -> PathBuf {
        let name = match locale {
            Some(l) => format!("{PAGE_RECORD}.{l}.toml"),
            None => format!("{PAGE_RECORD}.toml"),
        };
        PathBuf::from(self.key.as_str()).join(name)
    }
}

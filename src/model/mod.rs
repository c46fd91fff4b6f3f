//! Content models and the site aggregate.
//!
//! Every model kind (page, file, user) satisfies the [`Identifiable`]
//! contract: it has a stable scheme, a content-store key, and content
//! records addressable per locale. The identifier layer works purely
//! through this trait, dispatched via the [`Model`] enum.

mod file;
mod page;
mod scheme;
mod site;
mod user;

pub use file::FileModel;
pub use page::{PAGE_RECORD, Page};
pub use scheme::Scheme;
pub use site::Site;
pub use user::{USER_RECORD, USERS_DIR, User};

use std::path::PathBuf;

use crate::content::{ContentRecord, ContentStore, StoreError};
use crate::core::ModelKey;

/// Contract satisfied by any content model an identifier can name.
pub trait Identifiable {
    /// Model kind, doubling as the identifier scheme.
    fn scheme(&self) -> Scheme;

    /// Canonical content-store key. May change over time (renames);
    /// the persisted identifier exists to outlive it.
    fn key(&self) -> &ModelKey;

    /// Store-relative path of the content record for `locale`
    /// (`None` = locale-less base record).
    fn record_path(&self, locale: Option<&str>) -> PathBuf;

    /// Read the content record for `locale`. Missing records read as
    /// empty, not as errors.
    fn read_content(
        &self,
        store: &ContentStore,
        locale: Option<&str>,
    ) -> Result<ContentRecord, StoreError> {
        store.read(&self.record_path(locale))
    }
}

/// A content model of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Model {
    Page(Page),
    File(FileModel),
    User(User),
}

impl Identifiable for Model {
    fn scheme(&self) -> Scheme {
        match self {
            Model::Page(p) => p.scheme(),
            Model::File(f) => f.scheme(),
            Model::User(u) => u.scheme(),
        }
    }

    fn key(&self) -> &ModelKey {
        match self {
            Model::Page(p) => p.key(),
            Model::File(f) => f.key(),
            Model::User(u) => u.key(),
        }
    }

    fn record_path(&self, locale: Option<&str>) -> PathBuf {
        match self {
            Model::Page(p) => p.record_path(locale),
            Model::File(f) => f.record_path(locale),
            Model::User(u) => u.record_path(locale),
        }
    }
}

//! Stable content identifiers: parsing, resolution, generation,
//! persistence, and permalink formatting.
//!
//! An identifier (`page://5e2a9c41d7b83f06`) names a content model
//! independently of its storage key, so links survive renames and moves.
//! The `host` token is persisted inside the model's own content record
//! under the `uuid` field; resolution maps identifier strings back to
//! live models through a process-lifetime cache backed by lazy index
//! scans.

mod cache;
mod model_uuid;
mod permalink;
mod resolve;
mod token;
mod uri;

pub use cache::UuidCache;
pub use model_uuid::{ModelUuid, retrieve_id, store_id};
pub use permalink::format_permalink;
pub use uri::Uri;

use thiserror::Error;

use crate::content::StoreError;

/// Identifier-layer errors.
///
/// A resolution miss is not an error (absence is a normal outcome);
/// these cover malformed input and persistence failures.
#[derive(Debug, Error)]
pub enum UuidError {
    #[error("invalid identifier `{0}` (expected `<scheme>://<host>`)")]
    InvalidFormat(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

//! Content records and their flat-file persistence.

mod record;
mod store;

pub use record::{ContentRecord, UUID_FIELD};
pub use store::{ContentStore, StoreError};

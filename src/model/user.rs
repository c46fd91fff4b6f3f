//! User model: an account directory under `users/` in the content tree.

use std::path::PathBuf;

use super::{Identifiable, Scheme};
use crate::core::ModelKey;

/// Reserved top-level directory holding user accounts.
pub const USERS_DIR: &str = "users";

/// Record file name for users (locale-less base record).
pub const USER_RECORD: &str = "user";

/// A user account, keyed by its directory name under `users/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    key: ModelKey,
}

impl User {
    pub fn new(key: ModelKey) -> Self {
        Self { key }
    }
}

impl Identifiable for User {
    fn scheme(&self) -> Scheme {
        Scheme::User
    }

    fn key(&self) -> &ModelKey {
        &self.key
    }

    fn record_path(&self, locale: Option<&str>) -> PathBuf {
        let name = match locale {
            Some(l) => format!("{USER_RECORD}.{l}.toml"),
            None => format!("{USER_RECORD}.toml"),
        };
        PathBuf::from(USERS_DIR).join(self.key.as_str()).join(name)
    }
}

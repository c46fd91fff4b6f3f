//! Model key type for type-safe content-store addressing.
//!
//! A `ModelKey` is the canonical storage key of a content model: the
//! relative path of a page directory (`blog/hello`), a file asset
//! (`blog/hello/cover.png`), or a user name (`alice`). Keys may change
//! over time (renames, moves); identifiers exist to outlive them.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Normalized content-store key
///
/// Invariants:
/// - No leading or trailing `/`
/// - `/` separators only (normalized from `\` on input)
/// - Never empty (the content root itself is not a model)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelKey(Arc<str>);

impl ModelKey {
    /// Create a key from a raw string. Returns `None` for an empty key.
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = raw.trim().replace('\\', "/");
        let trimmed = normalized.trim_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(Arc::from(trimmed)))
    }

    /// Get the key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parent key (`blog/hello` -> `blog`, `blog` -> `None`).
    pub fn parent(&self) -> Option<Self> {
        let idx = self.0.rfind('/')?;
        Self::new(&self.0[..idx])
    }

    /// Last path segment (`blog/hello/cover.png` -> `cover.png`).
    pub fn name(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Check whether this key lies within the subtree rooted at `scope`
    /// (the scope key itself counts as inside).
    pub fn is_within(&self, scope: &ModelKey) -> bool {
        self == scope
            || (self.0.len() > scope.0.len()
                && self.0.starts_with(scope.as_str())
                && self.0.as_bytes()[scope.0.len()] == b'/')
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ModelKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModelKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for ModelKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ModelKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ModelKey::new(&raw).ok_or_else(|| serde::de::Error::custom("empty model key"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(ModelKey::new("/blog/hello/").unwrap().as_str(), "blog/hello");
        assert_eq!(ModelKey::new("blog\\hello").unwrap().as_str(), "blog/hello");
        assert_eq!(ModelKey::new("  alice ").unwrap().as_str(), "alice");
        assert!(ModelKey::new("").is_none());
        assert!(ModelKey::new("/").is_none());
    }

    #[test]
    fn test_parent_and_name() {
        let key = ModelKey::new("blog/hello/cover.png").unwrap();
        assert_eq!(key.name(), "cover.png");
        assert_eq!(key.parent().unwrap().as_str(), "blog/hello");
        assert!(ModelKey::new("blog").unwrap().parent().is_none());
    }

    #[test]
    fn test_is_within() {
        let scope = ModelKey::new("blog").unwrap();
        assert!(ModelKey::new("blog/hello").unwrap().is_within(&scope));
        assert!(ModelKey::new("blog").unwrap().is_within(&scope));
        assert!(!ModelKey::new("blogroll/post").unwrap().is_within(&scope));
        assert!(!ModelKey::new("about").unwrap().is_within(&scope));
    }
}

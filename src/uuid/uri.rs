//! Identifier wire format: `<scheme>://<host>[#<context>]`.

use std::fmt;

use super::UuidError;
use crate::core::ModelKey;
use crate::model::Scheme;

/// A parsed identifier.
///
/// Invariants:
/// - `host` may be empty until first resolved or generated; once set it
///   never changes for the lifetime of this value.
/// - `context` scopes resolution to a page subtree; it is not part of
///   the identifier's identity (the cache key is `scheme://host` only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri {
    scheme: Scheme,
    host: String,
    context: Option<ModelKey>,
}

impl Uri {
    /// Parse an identifier string. The optional `#<context>` fragment
    /// names a subtree to try before the global index.
    pub fn parse(raw: &str) -> Result<Self, UuidError> {
        let invalid = || UuidError::InvalidFormat(raw.to_string());

        let (scheme_name, rest) = raw.split_once("://").ok_or_else(invalid)?;
        let scheme = Scheme::from_name(scheme_name).ok_or_else(invalid)?;

        let (host, context) = match rest.split_once('#') {
            Some((host, fragment)) => {
                let context = ModelKey::new(fragment).ok_or_else(invalid)?;
                (host, Some(context))
            }
            None => (rest, None),
        };

        if !host.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(invalid());
        }

        Ok(Self {
            scheme,
            host: host.to_string(),
            context,
        })
    }

    /// Build an identifier from known parts (generation path).
    pub fn from_parts(scheme: Scheme, host: &str) -> Self {
        Self {
            scheme,
            host: host.to_string(),
            context: None,
        }
    }

    /// Scope resolution to a page subtree.
    pub fn with_context(mut self, context: ModelKey) -> Self {
        self.context = Some(context);
        self
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn context(&self) -> Option<&ModelKey> {
        self.context.as_ref()
    }

    /// Whether the host token is known yet.
    pub fn has_host(&self) -> bool {
        !self.host.is_empty()
    }

    /// Set the host once. A host already present stays as is.
    pub fn fill_host(&mut self, host: &str) {
        if self.host.is_empty() {
            self.host = host.to_string();
        }
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}

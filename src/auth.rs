//! Authorization principals and scoped impersonation.
//!
//! Identifier persistence writes a protected field into a content record
//! the acting principal may not normally be allowed to touch. The write
//! path elevates to [`Principal::System`] through a drop guard so the
//! prior principal is restored on every exit path, including errors.

use std::fmt;

use parking_lot::RwLock;

use crate::model::Scheme;

/// Acting authorization principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    /// Unauthenticated read-only access.
    Visitor,
    /// Authenticated content author.
    Editor,
    /// Internal elevated principal for protected writes.
    System,
}

impl Principal {
    /// Whether this principal may update content records of the given kind.
    pub fn can_update(self, scheme: Scheme) -> bool {
        match self {
            Principal::Visitor => false,
            Principal::Editor => matches!(scheme, Scheme::Page | Scheme::File),
            Principal::System => true,
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Principal::Visitor => "visitor",
            Principal::Editor => "editor",
            Principal::System => "system",
        };
        f.write_str(name)
    }
}

/// Authorization state for one site context.
///
/// Impersonations stack: the base principal sits at the bottom and each
/// active [`ImpersonationGuard`] pushes one entry. `current()` is always
/// the top of the stack.
#[derive(Debug)]
pub struct AuthContext {
    stack: RwLock<Vec<Principal>>,
}

impl AuthContext {
    pub fn new(base: Principal) -> Self {
        Self {
            stack: RwLock::new(vec![base]),
        }
    }

    /// The currently acting principal.
    pub fn current(&self) -> Principal {
        // Invariant: the stack is never empty (base entry stays put).
        *self.stack.read().last().unwrap_or(&Principal::Visitor)
    }

    /// The active impersonated principal, if any elevation is in effect.
    pub fn impersonator(&self) -> Option<Principal> {
        let stack = self.stack.read();
        if stack.len() > 1 { stack.last().copied() } else { None }
    }

    /// Temporarily act as `principal` until the returned guard drops.
    #[must_use = "the elevation ends when the guard is dropped"]
    pub fn impersonate(&self, principal: Principal) -> ImpersonationGuard<'_> {
        self.stack.write().push(principal);
        ImpersonationGuard { auth: self }
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new(Principal::Visitor)
    }
}

/// Scoped elevation: restores the previous principal on drop.
#[derive(Debug)]
pub struct ImpersonationGuard<'a> {
    auth: &'a AuthContext,
}

impl Drop for ImpersonationGuard<'_> {
    fn drop(&mut self) {
        let mut stack = self.auth.stack.write();
        if stack.len() > 1 {
            stack.pop();
        }
    }
}

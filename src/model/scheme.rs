//! Model-kind tag used as the scheme of an identifier.

use std::fmt;

/// The kind of content model an identifier names.
///
/// Doubles as the scheme of the identifier wire format
/// (`page://abc123`, `file://...`, `user://...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scheme {
    Page,
    File,
    User,
}

impl Scheme {
    /// All schemes, in resolution/display order.
    pub const ALL: [Scheme; 3] = [Scheme::Page, Scheme::File, Scheme::User];

    /// Wire name of the scheme.
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Page => "page",
            Scheme::File => "file",
            Scheme::User => "user",
        }
    }

    /// Parse a wire name. Returns `None` for unknown schemes.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "page" => Some(Scheme::Page),
            "file" => Some(Scheme::File),
            "user" => Some(Scheme::User),
            _ => None,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for scheme in Scheme::ALL {
            assert_eq!(Scheme::from_name(scheme.as_str()), Some(scheme));
        }
        assert_eq!(Scheme::from_name("site"), None);
        assert_eq!(Scheme::from_name(""), None);
    }
}

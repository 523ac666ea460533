use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Declaration modifiers as written in source.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Modifiers: u32 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 3;
        const FINAL = 1 << 4;
        const ABSTRACT = 1 << 5;
        const NATIVE = 1 << 6;
        const SYNCHRONIZED = 1 << 7;
        const TRANSIENT = 1 << 8;
        const VOLATILE = 1 << 9;
        const STRICTFP = 1 << 10;
        /// Interface default method (Java 8).
        const DEFAULT = 1 << 11;

        const VISIBILITY = Self::PUBLIC.bits() | Self::PROTECTED.bits() | Self::PRIVATE.bits();
    }
}

/// Access level of a declaration.
///
/// Ordered from least to most permissive so `a < b` reads as "a is weaker".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Visibility {
    Private,
    Package,
    Protected,
    Public,
}

impl Visibility {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Package => "package",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
        }
    }

    #[must_use]
    pub const fn modifier(self) -> Modifiers {
        match self {
            Visibility::Private => Modifiers::PRIVATE,
            Visibility::Package => Modifiers::empty(),
            Visibility::Protected => Modifiers::PROTECTED,
            Visibility::Public => Modifiers::PUBLIC,
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Modifiers {
    /// Explicit visibility, if one was written.
    #[must_use]
    pub fn explicit_visibility(self) -> Option<Visibility> {
        if self.contains(Modifiers::PUBLIC) {
            Some(Visibility::Public)
        } else if self.contains(Modifiers::PROTECTED) {
            Some(Visibility::Protected)
        } else if self.contains(Modifiers::PRIVATE) {
            Some(Visibility::Private)
        } else {
            None
        }
    }

    /// Visibility with package access as the fallback.
    #[must_use]
    pub fn visibility(self) -> Visibility {
        self.explicit_visibility().unwrap_or(Visibility::Package)
    }

    /// Replace whatever visibility bits are set with `vis`.
    #[must_use]
    pub fn with_visibility(self, vis: Visibility) -> Self {
        (self - Modifiers::VISIBILITY) | vis.modifier()
    }

    #[must_use]
    pub fn is_static(self) -> bool {
        self.contains(Modifiers::STATIC)
    }

    #[must_use]
    pub fn is_final(self) -> bool {
        self.contains(Modifiers::FINAL)
    }

    #[must_use]
    pub fn is_abstract(self) -> bool {
        self.contains(Modifiers::ABSTRACT)
    }
}

use std::ops::{BitOr, BitOrAssign};

use crate::model::Accessibility;

/// Modifier set of a declaration node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u32);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const PRIVATE: Self = Self(0x0001);
    pub const INTERNAL: Self = Self(0x0002);
    pub const PROTECTED: Self = Self(0x0004);
    pub const PUBLIC: Self = Self(0x0008);
    pub const ABSTRACT: Self = Self(0x0010);
    pub const VIRTUAL: Self = Self(0x0020);
    pub const SEALED: Self = Self(0x0040);
    pub const STATIC: Self = Self(0x0080);
    pub const OVERRIDE: Self = Self(0x0100);
    pub const READONLY: Self = Self(0x0200);
    pub const CONST: Self = Self(0x0400);
    pub const NEW: Self = Self(0x0800);
    pub const PARTIAL: Self = Self(0x1000);
    pub const EXTERN: Self = Self(0x2000);
    pub const VOLATILE: Self = Self(0x4000);
    pub const UNSAFE: Self = Self(0x8000);
    pub const FIXED: Self = Self(0x1_0000);

    pub const VISIBILITY_MASK: Self = Self(0x000f);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn from_accessibility(accessibility: Accessibility) -> Self {
        match accessibility {
            Accessibility::None => Self::NONE,
            Accessibility::Private => Self::PRIVATE,
            Accessibility::Public => Self::PUBLIC,
            Accessibility::Protected => Self::PROTECTED,
            Accessibility::Internal => Self::INTERNAL,
            Accessibility::ProtectedOrInternal => Self::PROTECTED | Self::INTERNAL,
        }
    }

    /// Keywords of this set in canonical order.
    pub fn tokens(self) -> impl Iterator<Item = &'static str> {
        MODIFIER_ORDER
            .iter()
            .filter(move |(modifier, _)| self.contains(*modifier))
            .map(|(_, token)| *token)
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// The one order modifiers are ever printed in, whatever order the source
/// declared them in.
pub const MODIFIER_ORDER: &[(Modifiers, &str)] = &[
    (Modifiers::PUBLIC, "public"),
    (Modifiers::PROTECTED, "protected"),
    (Modifiers::PRIVATE, "private"),
    (Modifiers::INTERNAL, "internal"),
    (Modifiers::NEW, "new"),
    (Modifiers::UNSAFE, "unsafe"),
    (Modifiers::ABSTRACT, "abstract"),
    (Modifiers::VIRTUAL, "virtual"),
    (Modifiers::SEALED, "sealed"),
    (Modifiers::STATIC, "static"),
    (Modifiers::OVERRIDE, "override"),
    (Modifiers::READONLY, "readonly"),
    (Modifiers::VOLATILE, "volatile"),
    (Modifiers::EXTERN, "extern"),
    (Modifiers::PARTIAL, "partial"),
    (Modifiers::CONST, "const"),
    (Modifiers::FIXED, "fixed"),
];

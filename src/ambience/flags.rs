use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::error::ParseFlagsError;

/// Which facets of a declaration the ambience prints.
///
/// Facets are independent; an absent facet contributes no text at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConversionFlags(u32);

impl ConversionFlags {
    pub const NONE: Self = Self(0);
    pub const SHOW_PARAMETER_NAMES: Self = Self(0x0001);
    pub const SHOW_ACCESSIBILITY: Self = Self(0x0002);
    pub const USE_FULLY_QUALIFIED_TYPE_NAMES: Self = Self(0x0004);
    pub const SHOW_MODIFIERS: Self = Self(0x0008);
    pub const USE_FULLY_QUALIFIED_MEMBER_NAMES: Self = Self(0x0080);
    pub const SHOW_RETURN_TYPE: Self = Self(0x0400);
    pub const SHOW_TYPE_PARAMETER_LIST: Self = Self(0x0800);
    pub const SHOW_PARAMETER_LIST: Self = Self(0x1000);
    pub const SHOW_DEFINITION_KEYWORD: Self = Self(0x2000);

    /// What a tooltip normally shows: everything except full qualification.
    pub const STANDARD: Self = Self(
        Self::SHOW_PARAMETER_NAMES.0
            | Self::SHOW_ACCESSIBILITY.0
            | Self::SHOW_PARAMETER_LIST.0
            | Self::SHOW_RETURN_TYPE.0
            | Self::SHOW_MODIFIERS.0
            | Self::SHOW_TYPE_PARAMETER_LIST.0
            | Self::SHOW_DEFINITION_KEYWORD.0,
    );

    pub const ALL: Self = Self(
        Self::STANDARD.0 | Self::USE_FULLY_QUALIFIED_TYPE_NAMES.0 | Self::USE_FULLY_QUALIFIED_MEMBER_NAMES.0,
    );

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ConversionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ConversionFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

const FLAG_NAMES: &[(&str, ConversionFlags)] = &[
    ("ShowParameterNames", ConversionFlags::SHOW_PARAMETER_NAMES),
    ("ShowAccessibility", ConversionFlags::SHOW_ACCESSIBILITY),
    ("UseFullyQualifiedTypeNames", ConversionFlags::USE_FULLY_QUALIFIED_TYPE_NAMES),
    ("ShowModifiers", ConversionFlags::SHOW_MODIFIERS),
    ("UseFullyQualifiedMemberNames", ConversionFlags::USE_FULLY_QUALIFIED_MEMBER_NAMES),
    ("ShowReturnType", ConversionFlags::SHOW_RETURN_TYPE),
    ("ShowTypeParameterList", ConversionFlags::SHOW_TYPE_PARAMETER_LIST),
    ("ShowParameterList", ConversionFlags::SHOW_PARAMETER_LIST),
    ("ShowDefinitionKeyword", ConversionFlags::SHOW_DEFINITION_KEYWORD),
];

const PRESET_NAMES: &[(&str, ConversionFlags)] = &[
    ("none", ConversionFlags::NONE),
    ("standard", ConversionFlags::STANDARD),
    ("all", ConversionFlags::ALL),
];

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Accepts presets (`standard`, `all`, `none`) and facet names in PascalCase
/// or kebab-case, separated by `|` or `,`: `show-modifiers|ShowReturnType`.
impl FromStr for ConversionFlags {
    type Err = ParseFlagsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = ConversionFlags::NONE;
        for part in s.split(['|', ',']).map(str::trim).filter(|p| !p.is_empty()) {
            let wanted = normalize(part);
            let flag = PRESET_NAMES
                .iter()
                .chain(FLAG_NAMES)
                .find(|(name, _)| normalize(name) == wanted)
                .map(|(_, flag)| *flag)
                .ok_or_else(|| ParseFlagsError(part.to_string()))?;
            flags |= flag;
        }
        Ok(flags)
    }
}

impl fmt::Display for ConversionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = FLAG_NAMES
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect();
        if names.is_empty() {
            write!(f, "None")
        } else {
            write!(f, "{}", names.join(" | "))
        }
    }
}

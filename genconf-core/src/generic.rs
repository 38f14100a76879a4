//! Generic family constants, classification and resolution

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GenconfError, SkipReason};

/// Abstract font category used by the `genericfamily` pattern element.
///
/// The constant table belongs to the matching engine and grows over time, so
/// integers outside the table are carried as [`GenericFamily::Other`] instead
/// of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenericFamily {
    #[default]
    Unknown,
    SansSerif,
    Serif,
    Monospace,
    Cursive,
    Fantasy,
    SystemUi,
    Emoji,
    Math,
    Other(i32),
}

/// Every named constant, in numeric order.
const NAMED: [(GenericFamily, &str); 8] = [
    (GenericFamily::SansSerif, "sans-serif"),
    (GenericFamily::Serif, "serif"),
    (GenericFamily::Monospace, "monospace"),
    (GenericFamily::Cursive, "cursive"),
    (GenericFamily::Fantasy, "fantasy"),
    (GenericFamily::SystemUi, "system-ui"),
    (GenericFamily::Emoji, "emoji"),
    (GenericFamily::Math, "math"),
];

impl GenericFamily {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Unknown,
            1 => Self::SansSerif,
            2 => Self::Serif,
            3 => Self::Monospace,
            4 => Self::Cursive,
            5 => Self::Fantasy,
            6 => Self::SystemUi,
            7 => Self::Emoji,
            8 => Self::Math,
            other => Self::Other(other),
        }
    }

    pub fn raw(self) -> i32 {
        match self {
            Self::Unknown => 0,
            Self::SansSerif => 1,
            Self::Serif => 2,
            Self::Monospace => 3,
            Self::Cursive => 4,
            Self::Fantasy => 5,
            Self::SystemUi => 6,
            Self::Emoji => 7,
            Self::Math => 8,
            Self::Other(raw) => raw,
        }
    }

    /// Constant name used verbatim in generated rules.
    pub fn name(self) -> Option<&'static str> {
        NAMED
            .iter()
            .find(|(value, _)| *value == self)
            .map(|(_, name)| *name)
    }

    /// Look up a constant by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED
            .iter()
            .find(|(_, known)| known.eq_ignore_ascii_case(name.trim()))
            .map(|(value, _)| *value)
    }

    /// True when the value names a usable constant.
    pub fn is_known(self) -> bool {
        self.name().is_some()
    }
}

impl fmt::Display for GenericFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.raw()),
        }
    }
}

/// Accepts a constant name or an integer that maps to a named constant.
impl FromStr for GenericFamily {
    type Err = GenconfError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if let Some(value) = Self::from_name(raw) {
            return Ok(value);
        }

        let value = raw
            .trim()
            .parse::<i32>()
            .map(Self::from_raw)
            .map_err(|_| GenconfError::InvalidGenericFamily(raw.to_string()))?;

        if value.is_known() {
            Ok(value)
        } else {
            Err(GenconfError::InvalidGenericFamily(raw.to_string()))
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawGeneric {
    Name(String),
    Value(i32),
}

impl Serialize for GenericFamily {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.name() {
            Some(name) => RawGeneric::Name(name.to_string()).serialize(serializer),
            None => RawGeneric::Value(self.raw()).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for GenericFamily {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match RawGeneric::deserialize(deserializer)? {
            RawGeneric::Name(name) => Self::from_name(&name).ok_or_else(|| {
                serde::de::Error::custom(format!("unknown generic family: {name}"))
            }),
            RawGeneric::Value(raw) => Ok(Self::from_raw(raw)),
        }
    }
}

/// Table-level traits that hint at a font's generic family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontTraits {
    /// OS/2 `sFamilyClass` split into (class, subclass).
    pub family_class: Option<(u8, u8)>,
    /// OS/2 PANOSE classification bytes.
    pub panose: Option<[u8; 10]>,
    /// `post.isFixedPitch` is non-zero.
    pub fixed_pitch: bool,
}

const PANOSE_LATIN_TEXT: u8 = 2;
const PANOSE_LATIN_HAND_WRITTEN: u8 = 3;
const PANOSE_LATIN_DECORATIVE: u8 = 4;
const PANOSE_MONOSPACED: u8 = 9;

/// Derive a generic family from font table traits.
///
/// Pitch wins over everything else, then the IBM family class, then PANOSE.
pub fn classify(traits: &FontTraits) -> GenericFamily {
    if traits.fixed_pitch {
        return GenericFamily::Monospace;
    }

    if let Some(panose) = traits.panose {
        if panose[0] == PANOSE_LATIN_TEXT && panose[3] == PANOSE_MONOSPACED {
            return GenericFamily::Monospace;
        }
    }

    if let Some((class, _)) = traits.family_class {
        match class {
            1..=5 | 7 => return GenericFamily::Serif,
            8 => return GenericFamily::SansSerif,
            9 => return GenericFamily::Fantasy,
            10 => return GenericFamily::Cursive,
            _ => {}
        }
    }

    match traits.panose {
        Some(panose) => match panose[0] {
            PANOSE_LATIN_HAND_WRITTEN => GenericFamily::Cursive,
            PANOSE_LATIN_DECORATIVE => GenericFamily::Fantasy,
            PANOSE_LATIN_TEXT => match panose[1] {
                11..=13 => GenericFamily::SansSerif,
                2..=10 => GenericFamily::Serif,
                _ => GenericFamily::Unknown,
            },
            _ => GenericFamily::Unknown,
        },
        None => GenericFamily::Unknown,
    }
}

/// A generic family that resolved to a named constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedGeneric {
    pub value: GenericFamily,
    pub name: &'static str,
}

/// Pick the generic family for a font: its own metadata first, then the
/// caller's fallback.
pub fn resolve(
    own: GenericFamily,
    fallback: Option<GenericFamily>,
    family: &str,
    path: &Path,
) -> Result<ResolvedGeneric, SkipReason> {
    let value = if own.is_known() {
        own
    } else {
        fallback.unwrap_or_default()
    };

    match value.name() {
        Some(name) => Ok(ResolvedGeneric { value, name }),
        None => Err(SkipReason::UnresolvableGenericFamily {
            family: family.to_string(),
            path: path.to_path_buf(),
        }),
    }
}

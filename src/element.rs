//! Packed collation elements and the comparison strength levels.
//!
//! A [`CollationElement`] carries all three weight levels in a single `u32`:
//!
//! ```text
//!  31            16 15       8 7        0
//! +----------------+----------+----------+
//! |    primary     | secondary| tertiary |
//! +----------------+----------+----------+
//! ```
//!
//! A weight of zero at a level means the element is ignorable at that level.
//! Non-zero weights never use a leading byte below [`MIN_WEIGHT_BYTE`], which
//! leaves room for the level separator in sort keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CollateError, Result};

pub const PRIMARY_SHIFT: u32 = 16;
pub const SECONDARY_SHIFT: u32 = 8;
pub const PRIMARY_MASK: u32 = 0xFFFF_0000;
pub const SECONDARY_MASK: u32 = 0x0000_FF00;
pub const TERTIARY_MASK: u32 = 0x0000_00FF;

/// Smallest byte any non-zero weight may start with.
pub const MIN_WEIGHT_BYTE: u8 = 0x02;
/// First primary weight handed out by the rule table.
pub const FIRST_PRIMARY: u16 = 0x0200;
/// Secondary weight of an entry that starts a new primary.
pub const SECONDARY_BASE: u8 = 0x05;
/// Tertiary weight of an entry that starts a new primary or secondary.
pub const TERTIARY_BASE: u8 = 0x05;
/// Primaries at or above this value are reserved for unmapped characters.
pub const UNMAPPED_PRIMARY: u16 = 0xFF00;
/// Continuation primaries of unmapped characters start here.
pub const UNMAPPED_TRAIL: u16 = 0x4000;

// ------------- Collation Element -------------
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollationElement(u32);

impl CollationElement {
    /// End-of-sequence marker. Never produced for a real character.
    pub const NULL_ORDER: CollationElement = CollationElement(0xFFFF_FFFF);
    /// Ignorable at every level.
    pub const IGNORABLE: CollationElement = CollationElement(0);

    pub const fn new(primary: u16, secondary: u8, tertiary: u8) -> Self {
        Self(((primary as u32) << PRIMARY_SHIFT) | ((secondary as u32) << SECONDARY_SHIFT) | tertiary as u32)
    }
    pub const fn bits(self) -> u32 {
        self.0
    }
    pub const fn primary(self) -> u16 {
        ((self.0 & PRIMARY_MASK) >> PRIMARY_SHIFT) as u16
    }
    pub const fn secondary(self) -> u8 {
        ((self.0 & SECONDARY_MASK) >> SECONDARY_SHIFT) as u8
    }
    pub const fn tertiary(self) -> u8 {
        (self.0 & TERTIARY_MASK) as u8
    }
    pub fn is_null(self) -> bool {
        self == Self::NULL_ORDER
    }
    pub fn is_ignorable(self) -> bool {
        self.0 == 0
    }
    /// Weight at the given level, widened so all levels share one type.
    /// Identical strength has no element weight and reports zero.
    pub fn weight(self, level: Strength) -> u16 {
        match level {
            Strength::Primary => self.primary(),
            Strength::Secondary => self.secondary() as u16,
            Strength::Tertiary => self.tertiary() as u16,
            Strength::Identical => 0,
        }
    }

    /// Default elements for a character without a rule entry. Two elements
    /// keep unmapped characters after every mapped one and ordered by code point.
    pub fn unmapped(c: char) -> [CollationElement; 2] {
        let cp = c as u32;
        [
            Self::new(UNMAPPED_PRIMARY + (cp >> 14) as u16, SECONDARY_BASE, TERTIARY_BASE),
            Self::new(UNMAPPED_TRAIL + (cp & 0x3FFF) as u16, SECONDARY_BASE, TERTIARY_BASE),
        ]
    }
}

impl fmt::Debug for CollationElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_null() {
            write!(f, "NULL_ORDER")
        } else {
            write!(f, "[{:04X}.{:02X}.{:02X}]", self.primary(), self.secondary(), self.tertiary())
        }
    }
}

// ------------- Strength -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Strength {
    Primary,
    Secondary,
    #[default]
    Tertiary,
    Identical,
}

impl Strength {
    pub const ALL: [Strength; 4] = [Strength::Primary, Strength::Secondary, Strength::Tertiary, Strength::Identical];

    pub fn name(&self) -> &'static str {
        match self {
            Strength::Primary => "primary",
            Strength::Secondary => "secondary",
            Strength::Tertiary => "tertiary",
            Strength::Identical => "identical",
        }
    }
}

impl TryFrom<u8> for Strength {
    type Error = CollateError;
    fn try_from(level: u8) -> Result<Self> {
        match level {
            0 => Ok(Strength::Primary),
            1 => Ok(Strength::Secondary),
            2 => Ok(Strength::Tertiary),
            3 => Ok(Strength::Identical),
            other => Err(CollateError::InvalidConfiguration(format!("unknown strength level {other}"))),
        }
    }
}

impl FromStr for Strength {
    type Err = CollateError;
    fn from_str(s: &str) -> Result<Self> {
        Strength::ALL
            .into_iter()
            .find(|strength| strength.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CollateError::InvalidConfiguration(format!("unknown strength '{s}'")))
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

//! Sort keys: byte strings whose plain byte order is the collation order.
//!
//! A key holds the primary weights of the whole string (two bytes each), then
//! a [`LEVEL_SEPARATOR`] and the secondary weights, then another separator and
//! the tertiary weights, as far as the strength asks for. Identical strength
//! appends the normalized code points. Every weight starts with a byte above the
//! separator, so a string whose weights are a prefix of another's sorts first.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::compare::level_weights;
use crate::element::{CollationElement, Strength};

pub const LEVEL_SEPARATOR: u8 = 0x01;
// keeps the leading byte of every code point above the separator
const CODE_POINT_OFFSET: u32 = 0x02_0000;

pub fn build(elements: &[CollationElement], normalized: &str, strength: Strength, french_secondary: bool) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(elements.len() * 4 + 3);
    for weight in level_weights(elements, Strength::Primary) {
        bytes.extend_from_slice(&weight.to_be_bytes());
    }
    if strength >= Strength::Secondary {
        bytes.push(LEVEL_SEPARATOR);
        let secondaries = level_weights(elements, Strength::Secondary).map(|w| w as u8);
        if french_secondary {
            bytes.extend(secondaries.rev());
        } else {
            bytes.extend(secondaries);
        }
    }
    if strength >= Strength::Tertiary {
        bytes.push(LEVEL_SEPARATOR);
        bytes.extend(level_weights(elements, Strength::Tertiary).map(|w| w as u8));
    }
    if strength == Strength::Identical {
        bytes.push(LEVEL_SEPARATOR);
        for c in normalized.chars() {
            let [_, high, middle, low] = (c as u32 + CODE_POINT_OFFSET).to_be_bytes();
            bytes.extend_from_slice(&[high, middle, low]);
        }
    }
    bytes
}

// ------------- Collation Key -------------
/// An owned sort key. Keys only compare meaningfully when built by collators
/// with the same rules, strength and decomposition.
#[derive(Clone, Serialize, Deserialize)]
pub struct CollationKey {
    bytes: Vec<u8>,
    source: String,
}

impl CollationKey {
    pub fn new(source: String, bytes: Vec<u8>) -> Self {
        Self { bytes, source }
    }
    pub fn source(&self) -> &str {
        &self.source
    }
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

// compared and hashed by bytes only, the source string is carried along for the caller
impl PartialEq for CollationKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}
impl Eq for CollationKey {}
impl Hash for CollationKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}
impl Ord for CollationKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bytes.cmp(&other.bytes)
    }
}
impl PartialOrd for CollationKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for CollationKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CollationKey({:?}, ", self.source)?;
        for b in &self.bytes {
            write!(f, "{b:02X}")?;
        }
        write!(f, ")")
    }
}

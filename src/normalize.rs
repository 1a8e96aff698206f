// used for the canonical (NFD) and compatibility (NFKD) decompositions
use icu_normalizer::DecomposingNormalizer;

use serde::{Deserialize, Serialize};

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{CollateError, Result};

// ------------- Decomposition -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Decomposition {
    /// Input is compared as given.
    #[default]
    None,
    /// Precomposed characters are split into base + combining marks (NFD).
    Canonical,
    /// Canonical plus compatibility decompositions (NFKD).
    Full,
}

impl Decomposition {
    pub const ALL: [Decomposition; 3] = [Decomposition::None, Decomposition::Canonical, Decomposition::Full];

    pub fn name(&self) -> &'static str {
        match self {
            Decomposition::None => "none",
            Decomposition::Canonical => "canonical",
            Decomposition::Full => "full",
        }
    }
}

impl TryFrom<u8> for Decomposition {
    type Error = CollateError;
    fn try_from(mode: u8) -> Result<Self> {
        match mode {
            0 => Ok(Decomposition::None),
            1 => Ok(Decomposition::Canonical),
            2 => Ok(Decomposition::Full),
            other => Err(CollateError::InvalidConfiguration(format!("unknown decomposition mode {other}"))),
        }
    }
}

impl FromStr for Decomposition {
    type Err = CollateError;
    fn from_str(s: &str) -> Result<Self> {
        Decomposition::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CollateError::InvalidConfiguration(format!("unknown decomposition '{s}'")))
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Applies the decomposition policy to `text`. ASCII has no decompositions
/// under either form, so it is always borrowed.
pub fn decompose(text: &str, policy: Decomposition) -> Cow<'_, str> {
    if policy == Decomposition::None || text.is_ascii() {
        return Cow::Borrowed(text);
    }
    let normalizer = match policy {
        Decomposition::Full => DecomposingNormalizer::new_nfkd(),
        _ => DecomposingNormalizer::new_nfd(),
    };
    let normalized = normalizer.normalize(text);
    if normalized == text {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(normalized)
    }
}

pub fn is_decomposed(text: &str, policy: Decomposition) -> bool {
    matches!(decompose(text, policy), Cow::Borrowed(_))
}

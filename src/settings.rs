//! Layered settings: an optional file, then `COLLATE_*` environment variables.
//!
//! ```toml
//! locale = "da_DK"
//! strength = "secondary"
//! decomposition = "canonical"
//! ```

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::collator::Collator;
use crate::element::Strength;
use crate::error::Result;
use crate::locale::{self, Locale};
use crate::normalize::Decomposition;

pub const DEFAULT_FILE: &str = "collate";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub locale: String,
    pub strength: String,
    pub decomposition: String,
    /// Sort descending.
    pub reverse: bool,
    /// Drop lines that collate equal to the line before them.
    pub unique: bool,
    /// `text` or `json`.
    pub output: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: String::from("root"),
            strength: Strength::default().to_string(),
            decomposition: Decomposition::default().to_string(),
            reverse: false,
            unique: false,
            output: String::from("text"),
        }
    }
}

impl Settings {
    /// Reads `file` (any format the config crate knows, extension optional) if it
    /// exists, then applies environment overrides such as `COLLATE_STRENGTH`.
    pub fn load(file: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix("COLLATE"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn locale(&self) -> Result<Locale> {
        self.locale.parse()
    }
    pub fn strength(&self) -> Result<Strength> {
        self.strength.parse()
    }
    pub fn decomposition(&self) -> Result<Decomposition> {
        self.decomposition.parse()
    }

    /// A collator configured from these settings. Every value is checked before
    /// anything is built.
    pub fn collator(&self) -> Result<Collator> {
        let locale = self.locale()?;
        let strength = self.strength()?;
        let decomposition = self.decomposition()?;
        let cached = locale::shared().get(&locale, strength, decomposition)?;
        Ok(Collator::clone(&cached))
    }
}

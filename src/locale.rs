//! Locale rulesets, fallback resolution and the collator cache.
//!
//! Every locale collates with the root rules plus an optional tailoring that is
//! appended to them. A locale without a tailoring of its own falls back through
//! `language_REGION_VARIANT → language_REGION → language → root`.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use tracing::{debug, trace};

use crate::FastHasher;
use crate::collator::Collator;
use crate::element::Strength;
use crate::error::{CollateError, Result};
use crate::normalize::Decomposition;
use crate::rules::RuleTable;

pub const ROOT_RULES: &str = concat!(
    // format and control characters are ignorable at every level
    "='\u{200B}'='\u{200C}'='\u{200D}'='\u{200E}'='\u{200F}'='\u{2060}'='\u{FEFF}'",
    "='\u{0000}'='\u{0001}'='\u{0002}'='\u{0003}'='\u{0004}'='\u{0005}'='\u{0006}'='\u{0007}'='\u{0008}'",
    "='\u{000E}'='\u{000F}'='\u{0010}'='\u{0011}'='\u{0012}'='\u{0013}'='\u{0014}'='\u{0015}'",
    "='\u{0016}'='\u{0017}'='\u{0018}'='\u{0019}'='\u{001A}'='\u{001B}'='\u{001C}'='\u{001D}'",
    "='\u{001E}'='\u{001F}'='\u{007F}'",
    // combining marks
    ";'\u{0301}';'\u{0300}';'\u{0306}';'\u{0302}';'\u{030C}';'\u{030A}';'\u{0308}';'\u{030B}'",
    ";'\u{0303}';'\u{0307}';'\u{0328}';'\u{0327}';'\u{0304}';'\u{0338}'",
    // whitespace, then hyphens
    ";'\u{0009}';'\u{000B}';'\u{000C}';'\u{000D}';'\u{000A}';' ';'\u{00A0}';'\u{2002}';'\u{2003}';'\u{2009}';'\u{3000}'",
    ";'\u{00AD}';'-';'\u{2010}';'\u{2011}';'\u{2012}';'\u{2013}';'\u{2014}';'\u{2015}';'\u{2212}'",
    // punctuation and symbols
    "<'_'<'\u{203E}'<','<';'<':'<'!'<'\u{00A1}'<'?'<'\u{00BF}'<'/'<'.'<'\u{2026}'",
    "<'`'<'^'<'\u{00A8}'<'~'<'\u{00B7}'<'\u{00B8}'<''<'\"'<'\u{00AB}'<'\u{00BB}'",
    "<'\u{2018}'<'\u{2019}'<'\u{201C}'<'\u{201D}'<'('<')'<'['<']'<'{'<'}'",
    "<'\u{00A7}'<'\u{00B6}'<'@'<'*'<'\\'<'&'<'#'<'%'<'\u{2030}'<'\u{2020}'<'\u{2021}'<'\u{2022}'",
    "<'+'<'\u{00B1}'<'\u{00F7}'<'\u{00D7}'<'<'<'='<'>'<'\u{00AC}'<'|'<'\u{00A6}'<'\u{00B0}'<'\u{00A9}'<'\u{00AE}'",
    "<'$'<'\u{00A2}'<'\u{00A3}'<'\u{00A4}'<'\u{00A5}'<'\u{20AC}'",
    // digits
    "<0<1,'\u{00B9}'<2,'\u{00B2}'<3,'\u{00B3}'<4<5<6<7<8<9",
    // letters
    "<a,A;\u{00E1},\u{00C1};\u{00E0},\u{00C0};\u{0103},\u{0102};\u{00E2},\u{00C2};\u{00E5},\u{00C5}",
    ";\u{00E4},\u{00C4};\u{00E3},\u{00C3};\u{0105},\u{0104};\u{0101},\u{0100};\u{00AA}",
    "<b,B<c,C;\u{0107},\u{0106};\u{010D},\u{010C};\u{00E7},\u{00C7}",
    "<d,D;\u{010F},\u{010E};\u{0111},\u{0110};\u{00F0},\u{00D0}",
    "<e,E;\u{00E9},\u{00C9};\u{00E8},\u{00C8};\u{00EA},\u{00CA};\u{011B},\u{011A};\u{00EB},\u{00CB}",
    ";\u{0119},\u{0118};\u{0113},\u{0112}",
    "<f,F<g,G;\u{011F},\u{011E}<h,H",
    "<i,I;\u{00ED},\u{00CD};\u{00EC},\u{00CC};\u{00EE},\u{00CE};\u{00EF},\u{00CF};\u{012B},\u{012A}",
    "<j,J<k,K<l,L;\u{0142},\u{0141}<m,M",
    "<n,N;\u{0144},\u{0143};\u{0148},\u{0147};\u{00F1},\u{00D1}",
    "<o,O;\u{00F3},\u{00D3};\u{00F2},\u{00D2};\u{00F4},\u{00D4};\u{00F6},\u{00D6};\u{00F5},\u{00D5}",
    ";\u{0151},\u{0150};\u{00F8},\u{00D8};\u{014D},\u{014C};\u{00BA}",
    "<p,P<q,Q<r,R;\u{0159},\u{0158}",
    "<s,S;\u{015B},\u{015A};\u{0161},\u{0160};\u{015F},\u{015E}",
    "<t,T;\u{0165},\u{0164};\u{0163},\u{0162}",
    "<u,U;\u{00FA},\u{00DA};\u{00F9},\u{00D9};\u{00FB},\u{00DB};\u{016F},\u{016E};\u{00FC},\u{00DC}",
    ";\u{0171},\u{0170};\u{016B},\u{016A}",
    "<v,V<w,W<x,X<y,Y;\u{00FD},\u{00DD};\u{00FF},\u{0178}",
    "<z,Z;\u{017A},\u{0179};\u{017E},\u{017D};\u{017C},\u{017B}",
    "<\u{00FE},\u{00DE}",
    // ligatures sort as the letters they are made of
    "&ae;\u{00E6},\u{00C6}&oe;\u{0153},\u{0152}&ss;\u{00DF}",
);

// tailorings appended to the root rules, keyed by locale tag
const TAILORINGS: &[(&str, &str)] = &[
    ("da", "&z<\u{00E6},\u{00C6};\u{00E4},\u{00C4}<\u{00F8},\u{00D8};\u{00F6},\u{00D6}<\u{00E5},\u{00C5},aa,Aa,AA"),
    ("es", "&n<\u{00F1},\u{00D1}"),
    ("es_ES_TRADITIONAL", "&n<\u{00F1},\u{00D1}&c<ch,cH,Ch,CH&l<ll,lL,Ll,LL"),
    ("fr", "@"),
];

// ------------- Locale -------------
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Locale {
    language: String,
    region: String,
    variant: String,
}

impl Locale {
    pub fn new(language: &str, region: &str, variant: &str) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: region.to_ascii_uppercase(),
            variant: variant.to_ascii_uppercase(),
        }
    }
    pub fn root() -> Self {
        Self::default()
    }
    pub fn language(&self) -> &str {
        &self.language
    }
    pub fn region(&self) -> &str {
        &self.region
    }
    pub fn variant(&self) -> &str {
        &self.variant
    }
    pub fn is_root(&self) -> bool {
        self.language.is_empty() && self.region.is_empty() && self.variant.is_empty()
    }
    /// `language_REGION_VARIANT` with trailing empty parts left out; empty for root.
    pub fn tag(&self) -> String {
        if !self.variant.is_empty() {
            format!("{}_{}_{}", self.language, self.region, self.variant)
        } else if !self.region.is_empty() {
            format!("{}_{}", self.language, self.region)
        } else {
            self.language.clone()
        }
    }
    /// Tags to try, most specific first, ending with the root tag `""`.
    pub fn fallback_chain(&self) -> Vec<String> {
        let mut chain = Vec::with_capacity(4);
        if !self.variant.is_empty() {
            chain.push(self.tag());
        }
        if !self.region.is_empty() {
            chain.push(format!("{}_{}", self.language, self.region));
        }
        if !self.language.is_empty() {
            chain.push(self.language.clone());
        }
        chain.push(String::new());
        chain
    }
}

impl FromStr for Locale {
    type Err = CollateError;
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("root") {
            return Ok(Self::root());
        }
        let mut parts = s.splitn(3, ['_', '-']);
        let language = parts.next().unwrap_or_default();
        let region = parts.next().unwrap_or_default();
        let variant = parts.next().unwrap_or_default();
        let valid = |part: &str, max: usize| part.len() <= max && part.chars().all(|c| c.is_ascii_alphanumeric());
        if language.len() < 2 || !valid(language, 8) || !valid(region, 3) || !valid(&variant.replace(['_', '-'], ""), 32) {
            return Err(CollateError::InvalidConfiguration(format!("malformed locale '{s}'")));
        }
        Ok(Self::new(language, region, &variant.replace('-', "_")))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() { write!(f, "root") } else { write!(f, "{}", self.tag()) }
    }
}

fn tailoring(tag: &str) -> Option<&'static str> {
    TAILORINGS.iter().find(|(name, _)| *name == tag).map(|(_, rules)| *rules)
}

/// The most specific tag in the fallback chain that has rules, and those rules.
pub fn resolve(locale: &Locale) -> (String, String) {
    for tag in locale.fallback_chain() {
        if tag.is_empty() {
            break;
        }
        if let Some(rules) = tailoring(&tag) {
            if tag != locale.tag() {
                debug!(%locale, resolved = %tag, "locale falls back to a less specific tailoring");
            }
            return (tag, format!("{ROOT_RULES}{rules}"));
        }
    }
    if !locale.is_root() {
        debug!(%locale, "no tailoring for locale, using root rules");
    }
    (String::new(), ROOT_RULES.to_owned())
}

/// Root plus every locale that has a tailoring.
pub fn available_locales() -> Vec<Locale> {
    let mut locales = vec![Locale::root()];
    locales.extend(TAILORINGS.iter().filter_map(|(tag, _)| tag.parse().ok()));
    locales
}

// ------------- Collator Cache -------------
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    locale: Locale,
    strength: Strength,
    decomposition: Decomposition,
}

/// Collators by `(locale, strength, decomposition)`. Entries are never changed
/// after insertion; rule tables are shared between all locales resolving to the
/// same rules.
#[derive(Debug, Default)]
pub struct CollatorCache {
    tables: RwLock<HashMap<String, Arc<RuleTable>, FastHasher>>,
    collators: RwLock<HashMap<CacheKey, Arc<Collator>, FastHasher>>,
}

impl CollatorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, locale: &Locale, strength: Strength, decomposition: Decomposition) -> Result<Arc<Collator>> {
        let key = CacheKey { locale: locale.clone(), strength, decomposition };
        {
            let collators = self.collators.read()?;
            if let Some(collator) = collators.get(&key) {
                trace!(%locale, %strength, %decomposition, "collator cache hit");
                return Ok(Arc::clone(collator));
            }
        }
        trace!(%locale, %strength, %decomposition, "collator cache miss");
        let mut collator = Collator::from_table(self.table(locale)?);
        collator.set_strength(strength);
        collator.set_decomposition(decomposition);
        // the first insertion wins if another thread got here meanwhile
        let mut collators = self.collators.write()?;
        Ok(Arc::clone(collators.entry(key).or_insert_with(|| Arc::new(collator))))
    }

    pub fn table(&self, locale: &Locale) -> Result<Arc<RuleTable>> {
        let (tag, rules) = resolve(locale);
        {
            let tables = self.tables.read()?;
            if let Some(table) = tables.get(&tag) {
                return Ok(Arc::clone(table));
            }
        }
        let table = Arc::new(RuleTable::parse(&rules)?);
        let mut tables = self.tables.write()?;
        Ok(Arc::clone(tables.entry(tag).or_insert(table)))
    }

    pub fn collators(&self) -> Result<usize> {
        Ok(self.collators.read()?.len())
    }
    pub fn tables(&self) -> Result<usize> {
        Ok(self.tables.read()?.len())
    }
}

lazy_static! {
    static ref SHARED: CollatorCache = CollatorCache::new();
}

/// The process-wide cache behind [`Collator::root`] and [`Collator::for_locale`].
pub fn shared() -> &'static CollatorCache {
    &SHARED
}

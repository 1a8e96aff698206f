use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::compare;
use crate::element::Strength;
use crate::error::Result;
use crate::generate;
use crate::iterator::ElementIterator;
use crate::key::{self, CollationKey};
use crate::locale::{self, Locale};
use crate::normalize::{decompose, Decomposition};
use crate::rules::RuleTable;

// ------------- Collator -------------
/// A rule table together with the strength and decomposition it is used with.
///
/// Cloning shares the table and copies the configuration, so clones can be
/// reconfigured independently.
#[derive(Debug, Clone)]
pub struct Collator {
    table: Arc<RuleTable>,
    strength: Strength,
    decomposition: Decomposition,
}

impl Collator {
    pub fn new(rules: &str) -> Result<Self> {
        Ok(Self::from_table(Arc::new(RuleTable::parse(rules)?)))
    }
    pub fn from_table(table: Arc<RuleTable>) -> Self {
        Self { table, strength: Strength::default(), decomposition: Decomposition::default() }
    }
    /// Collator for the root rules, shared through the process-wide cache.
    pub fn root() -> Result<Self> {
        Self::for_locale(&Locale::root())
    }
    /// Collator for `locale`, falling back towards the root rules when the
    /// locale has no tailoring of its own.
    pub fn for_locale(locale: &Locale) -> Result<Self> {
        let cached = locale::shared().get(locale, Strength::default(), Decomposition::default())?;
        Ok(Collator::clone(&cached))
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }
    pub fn set_strength(&mut self, strength: Strength) {
        self.strength = strength;
    }
    pub fn decomposition(&self) -> Decomposition {
        self.decomposition
    }
    pub fn set_decomposition(&mut self, decomposition: Decomposition) {
        self.decomposition = decomposition;
    }
    pub fn rules(&self) -> &str {
        self.table.rules()
    }
    pub fn table(&self) -> Arc<RuleTable> {
        Arc::clone(&self.table)
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        let a = decompose(a, self.decomposition);
        let b = decompose(b, self.decomposition);
        let a_chars: Vec<char> = a.chars().collect();
        let b_chars: Vec<char> = b.chars().collect();
        let a_elements = generate::collect(&self.table, &a_chars);
        let b_elements = generate::collect(&self.table, &b_chars);
        let ordering = compare::compare(&a_elements, &b_elements, self.strength, self.table.french_secondary());
        if ordering == Ordering::Equal && self.strength == Strength::Identical {
            // str ordering is code point ordering
            a.cmp(&b)
        } else {
            ordering
        }
    }

    pub fn equals(&self, a: &str, b: &str) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    pub fn collation_key(&self, source: &str) -> CollationKey {
        let normalized = decompose(source, self.decomposition);
        let chars: Vec<char> = normalized.chars().collect();
        let elements = generate::collect(&self.table, &chars);
        let bytes = key::build(&elements, &normalized, self.strength, self.table.french_secondary());
        CollationKey::new(source.to_owned(), bytes)
    }

    pub fn element_iterator(&self, source: &str) -> ElementIterator {
        ElementIterator::new(Arc::clone(&self.table), self.decomposition, source)
    }

    /// Sorts `items` in collation order, building each key once.
    pub fn sort<S: AsRef<str>>(&self, items: &mut [S]) {
        items.sort_by_cached_key(|item| self.collation_key(item.as_ref()));
    }
}

// equal when built from the same rules and configured the same way
impl PartialEq for Collator {
    fn eq(&self, other: &Self) -> bool {
        self.strength == other.strength
            && self.decomposition == other.decomposition
            && (Arc::ptr_eq(&self.table, &other.table) || self.table.rules() == other.table.rules())
    }
}
impl Eq for Collator {}
impl Hash for Collator {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.table.rules().hash(state);
        self.strength.hash(state);
        self.decomposition.hash(state);
    }
}

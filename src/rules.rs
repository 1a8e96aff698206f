//! Rule table: parses tailoring rules and resolves them into collation elements.
//!
//! Rules are read as a sequence of statements. A reset (`& x`) chooses an anchor
//! and each following relation (`<`, `;`, `,`, `=`) places its text after the
//! previous item with a primary, secondary, tertiary or no difference. The
//! resulting total order is walked once to hand out weights.

use pest::error::LineColLocation;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::FastHasher;
use crate::element::{
    CollationElement, Strength, FIRST_PRIMARY, SECONDARY_BASE, TERTIARY_BASE, UNMAPPED_PRIMARY,
};
use crate::error::{CollateError, Result};
use crate::normalize::{decompose, Decomposition};

#[derive(Parser)]
#[grammar = "rules.pest"]
struct RuleParser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `@`: secondary weights are compared from the end of the string.
    FrenchSecondary,
    Reset(String),
    Relation { strength: Strength, text: String, extension: String },
}

pub fn parse_statements(rules: &str) -> Result<Vec<Statement>> {
    let mut pairs = RuleParser::parse(Rule::rules, rules).map_err(|e| {
        let (line, col) = match e.line_col {
            LineColLocation::Pos(pos) => pos,
            LineColLocation::Span(start, _) => start,
        };
        CollateError::MalformedRule { message: e.variant.message().to_string(), line: Some(line), col: Some(col) }
    })?;
    let mut statements = Vec::new();
    let Some(root) = pairs.next() else {
        return Ok(statements);
    };
    for pair in root.into_inner() {
        match pair.as_rule() {
            Rule::french => statements.push(Statement::FrenchSecondary),
            Rule::reset => {
                let text = pair.into_inner().next().map(text_of).unwrap_or_default();
                statements.push(Statement::Reset(text));
            }
            Rule::relation => {
                let mut strength = Strength::Primary;
                let mut text = String::new();
                let mut extension = String::new();
                for part in pair.into_inner() {
                    match part.as_rule() {
                        Rule::operator => {
                            strength = match part.as_str() {
                                "<" => Strength::Primary,
                                ";" => Strength::Secondary,
                                "," => Strength::Tertiary,
                                _ => Strength::Identical,
                            }
                        }
                        Rule::text => text = text_of(part),
                        Rule::extension => {
                            extension = part.into_inner().next().map(text_of).unwrap_or_default();
                        }
                        _ => (),
                    }
                }
                statements.push(Statement::Relation { strength, text, extension });
            }
            _ => (),
        }
    }
    Ok(statements)
}

fn text_of(pair: Pair<Rule>) -> String {
    let mut text = String::new();
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::quoted => {
                let quoted = part.as_str();
                text.push_str(&quoted[1..quoted.len() - 1]);
            }
            Rule::apostrophe => text.push('\''),
            _ => text.push_str(part.as_str()),
        }
    }
    text
}

// ------------- Rule Entry -------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEntry {
    elements: Vec<CollationElement>,
    variable: bool,
}

impl RuleEntry {
    pub fn elements(&self) -> &[CollationElement] {
        &self.elements
    }
    /// Punctuation and symbols. They keep their primary weight at every strength.
    pub fn is_variable(&self) -> bool {
        self.variable
    }
    pub fn is_expansion(&self) -> bool {
        self.elements.len() > 1
    }
}

// ------------- Placement -------------
// One item of the total order being built. The relation is to the item before it.
#[derive(Debug)]
struct Slot {
    text: String,
    relation: Strength,
    extension: String,
}

#[derive(Debug)]
struct Placement {
    slots: Vec<Slot>,
    cursor: usize,
    extension: String,
    chain: HashSet<String, FastHasher>,
}

impl Placement {
    fn new() -> Self {
        // slot 0 is the fully ignorable anchor that relations without a reset follow
        let anchor = Slot { text: String::new(), relation: Strength::Identical, extension: String::new() };
        Self { slots: vec![anchor], cursor: 0, extension: String::new(), chain: HashSet::default() }
    }
    fn position(&self, text: &str) -> Option<usize> {
        self.slots.iter().skip(1).position(|slot| slot.text == text).map(|i| i + 1)
    }
    fn reset(&mut self, text: &str) -> Result<()> {
        let chars: Vec<char> = text.chars().collect();
        for n in (1..=chars.len()).rev() {
            let prefix: String = chars[..n].iter().collect();
            if let Some(i) = self.position(&prefix) {
                self.cursor = i;
                self.extension = chars[n..].iter().collect();
                self.chain.clear();
                self.chain.insert(prefix);
                return Ok(());
            }
        }
        Err(CollateError::malformed(format!("reset to '{text}' which no rule defines")))
    }
    fn relate(&mut self, strength: Strength, text: String, extension: &str) -> Result<()> {
        if !self.chain.insert(text.clone()) {
            return Err(CollateError::malformed(format!("'{text}' is ordered relative to itself")));
        }
        // a later rule moves an item placed by an earlier chain
        if let Some(old) = self.position(&text) {
            self.slots.remove(old);
            if old < self.cursor {
                self.cursor -= 1;
            }
        }
        let mut at = self.cursor + 1;
        while at < self.slots.len() && self.slots[at].relation > strength {
            at += 1;
        }
        let extension = format!("{}{}", self.extension, extension);
        self.slots.insert(at, Slot { text, relation: strength, extension });
        self.cursor = at;
        Ok(())
    }
    fn weights(&self) -> Result<Vec<CollationElement>> {
        let (mut primary, mut secondary, mut tertiary) = (0u16, 0u8, 0u8);
        let mut weights = Vec::with_capacity(self.slots.len());
        for slot in self.slots.iter().skip(1) {
            match slot.relation {
                Strength::Primary => {
                    primary = if primary == 0 { FIRST_PRIMARY } else { primary + 1 };
                    if primary >= UNMAPPED_PRIMARY {
                        return Err(CollateError::malformed("too many primary differences"));
                    }
                    secondary = SECONDARY_BASE;
                    tertiary = TERTIARY_BASE;
                }
                Strength::Secondary => {
                    secondary = secondary
                        .max(SECONDARY_BASE)
                        .checked_add(1)
                        .ok_or_else(|| CollateError::malformed(format!("too many secondary differences at '{}'", slot.text)))?;
                    tertiary = TERTIARY_BASE;
                }
                Strength::Tertiary => {
                    tertiary = tertiary
                        .max(TERTIARY_BASE)
                        .checked_add(1)
                        .ok_or_else(|| CollateError::malformed(format!("too many tertiary differences at '{}'", slot.text)))?;
                }
                Strength::Identical => (),
            }
            weights.push(CollationElement::new(primary, secondary, tertiary));
        }
        Ok(weights)
    }
}

// ------------- Rule Table -------------
#[derive(Debug, PartialEq)]
pub struct RuleTable {
    rules: String,
    entries: HashMap<Vec<char>, RuleEntry, FastHasher>,
    // longest key (in chars) starting with a given character
    longest: HashMap<char, usize, FastHasher>,
    french_secondary: bool,
}

impl RuleTable {
    pub fn parse(rules: &str) -> Result<Self> {
        if rules.trim().is_empty() {
            return Err(CollateError::malformed("rules are empty"));
        }
        let mut placement = Placement::new();
        let mut french_secondary = false;
        let mut relations = 0;
        for statement in parse_statements(rules)? {
            match statement {
                Statement::FrenchSecondary => french_secondary = true,
                Statement::Reset(text) => placement.reset(&text)?,
                Statement::Relation { strength, text, extension } => {
                    placement.relate(strength, text, &extension)?;
                    relations += 1;
                }
            }
        }
        if relations == 0 {
            return Err(CollateError::malformed("rules define no relations"));
        }

        let weights = placement.weights()?;
        let mut own: HashMap<Vec<char>, (CollationElement, Vec<char>), FastHasher> = HashMap::default();
        for (slot, element) in placement.slots.iter().skip(1).zip(weights) {
            own.insert(slot.text.chars().collect(), (element, slot.extension.chars().collect()));
        }
        let longest = longest_keys(own.keys());

        let mut entries: HashMap<Vec<char>, RuleEntry, FastHasher> = HashMap::default();
        for (key, (element, _)) in &own {
            let mut elements = Vec::new();
            let mut visiting = Vec::new();
            expand(key, &own, &longest, &mut visiting, &mut elements)?;
            let variable = element.primary() != 0 && !key.iter().any(|c| c.is_alphanumeric());
            entries.insert(key.clone(), RuleEntry { elements, variable });
        }

        // decomposed input has to find the entries written with precomposed characters
        let mut aliases = Vec::new();
        for (key, entry) in &entries {
            let text: String = key.iter().collect();
            let decomposed = decompose(&text, Decomposition::Canonical);
            if decomposed != text.as_str() {
                aliases.push((decomposed.chars().collect::<Vec<char>>(), entry.clone()));
            }
        }
        for (alias, entry) in aliases {
            entries.entry(alias).or_insert(entry);
        }

        let longest = longest_keys(entries.keys());
        let table = Self { rules: rules.to_owned(), entries, longest, french_secondary };
        debug!(entries = table.len(), french = table.french_secondary, "built rule table");
        Ok(table)
    }

    /// The rule text this table was built from; parsing it again yields an equal table.
    pub fn rules(&self) -> &str {
        &self.rules
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn french_secondary(&self) -> bool {
        self.french_secondary
    }
    pub fn lookup(&self, sequence: &str) -> Option<&RuleEntry> {
        let key: Vec<char> = sequence.chars().collect();
        self.entries.get(key.as_slice())
    }

    /// Longest entry matching `text` at `position`, contractions first.
    pub fn longest_match_at(&self, text: &[char], position: usize) -> Option<(usize, &RuleEntry)> {
        let len = longest_match(&self.entries, &self.longest, text, position)?;
        self.entries.get(&text[position..position + len]).map(|entry| (len, entry))
    }
}

fn longest_keys<'a>(keys: impl Iterator<Item = &'a Vec<char>>) -> HashMap<char, usize, FastHasher> {
    let mut longest: HashMap<char, usize, FastHasher> = HashMap::default();
    for key in keys {
        if let Some(first) = key.first() {
            let len = longest.entry(*first).or_insert(0);
            *len = (*len).max(key.len());
        }
    }
    longest
}

fn longest_match<V>(
    entries: &HashMap<Vec<char>, V, FastHasher>,
    longest: &HashMap<char, usize, FastHasher>,
    text: &[char],
    position: usize,
) -> Option<usize> {
    let first = text.get(position)?;
    let limit = (*longest.get(first)?).min(text.len() - position);
    (1..=limit).rev().find(|len| entries.contains_key(&text[position..position + len]))
}

// Own element followed by the elements of the extension text, resolved against
// the other entries. An extension leading back to an entry being expanded is a cycle.
fn expand(
    key: &[char],
    own: &HashMap<Vec<char>, (CollationElement, Vec<char>), FastHasher>,
    longest: &HashMap<char, usize, FastHasher>,
    visiting: &mut Vec<Vec<char>>,
    out: &mut Vec<CollationElement>,
) -> Result<()> {
    let Some((element, extension)) = own.get(key) else {
        return Ok(());
    };
    out.push(*element);
    if extension.is_empty() {
        return Ok(());
    }
    if visiting.iter().any(|k| k.as_slice() == key) {
        let text: String = key.iter().collect();
        return Err(CollateError::malformed(format!("expansion of '{text}' refers back to itself")));
    }
    visiting.push(key.to_vec());
    let mut position = 0;
    while position < extension.len() {
        match longest_match(own, longest, extension, position) {
            Some(len) => {
                expand(&extension[position..position + len], own, longest, visiting, out)?;
                position += len;
            }
            None => {
                out.extend(CollationElement::unmapped(extension[position]));
                position += 1;
            }
        }
    }
    visiting.pop();
    Ok(())
}

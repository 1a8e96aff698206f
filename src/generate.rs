// Collation element generation over normalized text.
//
// Text is scanned left to right in groups: the longest rule entry at the current
// position (contractions before single characters), or one unmapped character.
// A group yields one or more elements (expansions yield several).

use crate::element::CollationElement;
use crate::rules::RuleTable;

/// Appends the elements of the group starting at `position` and returns the
/// number of characters the group consumed. Nothing is consumed at the end of text.
pub fn push_group(table: &RuleTable, text: &[char], position: usize, out: &mut Vec<CollationElement>) -> usize {
    if position >= text.len() {
        return 0;
    }
    match table.longest_match_at(text, position) {
        Some((len, entry)) => {
            out.extend_from_slice(entry.elements());
            len
        }
        None => {
            out.extend(CollationElement::unmapped(text[position]));
            1
        }
    }
}

/// Number of characters the group starting at `position` covers, without
/// producing its elements.
pub fn group_len(table: &RuleTable, text: &[char], position: usize) -> usize {
    if position >= text.len() {
        return 0;
    }
    table.longest_match_at(text, position).map_or(1, |(len, _)| len)
}

/// All elements of `text`, in order.
pub fn collect(table: &RuleTable, text: &[char]) -> Vec<CollationElement> {
    let mut out = Vec::with_capacity(text.len());
    let mut position = 0;
    while position < text.len() {
        position += push_group(table, text, position, &mut out);
    }
    out
}

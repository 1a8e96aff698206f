// Level-by-level comparison of element runs.
//
// All primary weights of both strings are compared before any secondary weight
// is looked at, and so on down the levels. Zero weights are ignorable at their level.

use std::cmp::Ordering;

use crate::element::{CollationElement, Strength};

/// Non-zero weights of `elements` at `level`, in text order.
pub fn level_weights(elements: &[CollationElement], level: Strength) -> impl DoubleEndedIterator<Item = u16> + '_ {
    elements.iter().map(move |e| e.weight(level)).filter(|w| *w != 0)
}

pub fn compare_level(a: &[CollationElement], b: &[CollationElement], level: Strength, reversed: bool) -> Ordering {
    if reversed {
        level_weights(a, level).rev().cmp(level_weights(b, level).rev())
    } else {
        level_weights(a, level).cmp(level_weights(b, level))
    }
}

/// Compares two element runs up to `strength`. Identical strength needs the
/// normalized text as well and is settled by the caller.
pub fn compare(a: &[CollationElement], b: &[CollationElement], strength: Strength, french_secondary: bool) -> Ordering {
    compare_level(a, b, Strength::Primary, false)
        .then_with(|| {
            if strength >= Strength::Secondary {
                compare_level(a, b, Strength::Secondary, french_secondary)
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| {
            if strength >= Strength::Tertiary {
                compare_level(a, b, Strength::Tertiary, false)
            } else {
                Ordering::Equal
            }
        })
}

use collate::collator::Collator;
use collate::element::CollationElement;
use collate::generate;
use collate::iterator::{ElementIterator, IteratorState};
use collate::normalize::Decomposition;

const FIRST: &str =
    "XFILE What subset of all possible test cases has the highest probability of detecting the most errors?";
const SECOND: &str =
    "Xf ile What subset of all possible test cases has the lowest probability of detecting the least errors?";

fn drain(iter: &mut ElementIterator) -> Vec<u32> {
    let mut bits = Vec::new();
    loop {
        let element = iter.next_element();
        if element == ElementIterator::NULL_ORDER {
            return bits;
        }
        bits.push(element.bits());
    }
}

fn walk_back(iter: &mut ElementIterator) -> Vec<CollationElement> {
    let mut backward = Vec::new();
    loop {
        let element = iter.previous();
        if element.is_null() {
            break;
        }
        backward.push(element);
    }
    backward.reverse();
    backward
}

#[test]
fn iterators_expose_level_differences() {
    let collator = Collator::root().unwrap();
    let mut first = collator.element_iterator(FIRST);
    let mut twin = collator.element_iterator(FIRST);
    let mut second = collator.element_iterator(SECOND);

    for _ in 0..2 {
        let (a, b) = (first.next_element(), second.next_element());
        assert_eq!(a, b, "X matches X");

        let (a, b) = (first.next_element(), second.next_element());
        assert_eq!(ElementIterator::primary_order(a), ElementIterator::primary_order(b));
        assert_eq!(ElementIterator::secondary_order(a), ElementIterator::secondary_order(b));
        assert_ne!(ElementIterator::tertiary_order(a), ElementIterator::tertiary_order(b), "F against f");

        let (a, b) = (first.next_element(), second.next_element());
        assert_ne!(ElementIterator::primary_order(a), ElementIterator::primary_order(b), "I against a space");
        assert_eq!(ElementIterator::primary_order(b), 0);

        first.reset();
        second.reset();
        assert_eq!(first.state(), IteratorState::Fresh);
    }

    assert_eq!(drain(&mut first), drain(&mut twin));
}

#[test]
fn exhausted_iterator_keeps_returning_null_order() {
    let collator = Collator::root().unwrap();
    let mut iter = collator.element_iterator("ab");
    assert_eq!(iter.state(), IteratorState::Fresh);
    assert!(!iter.next_element().is_null());
    assert_eq!(iter.state(), IteratorState::Advancing);
    assert!(!iter.next_element().is_null());
    for _ in 0..3 {
        assert_eq!(iter.next_element(), ElementIterator::NULL_ORDER);
        assert_eq!(iter.state(), IteratorState::Exhausted);
    }

    let mut empty = collator.element_iterator("");
    assert!(empty.next_element().is_null());
    assert!(empty.next().is_none());
}

#[test]
fn iteration_matches_generated_elements() {
    let collator = Collator::root().unwrap();
    let text = "Smørrebrød, æbleskiver \u{6F22}!";
    let chars: Vec<char> = text.chars().collect();
    let expected = generate::collect(&collator.table(), &chars);
    let iterated: Vec<_> = collator.element_iterator(text).collect();
    assert_eq!(iterated, expected);
    // æ expands and the CJK character is unmapped, both yield two elements
    assert!(iterated.len() > text.chars().count());
}

#[test]
fn previous_walks_back_over_the_same_elements() {
    let collator = Collator::root().unwrap();
    let mut iter = collator.element_iterator("Smørrebrød, æbleskiver!");
    let forward: Vec<_> = iter.by_ref().collect();
    assert_eq!(walk_back(&mut iter), forward);
    assert_eq!(iter.state(), IteratorState::Fresh);

    let mut iter = collator.element_iterator("abc");
    let a = iter.next_element();
    let b = iter.next_element();
    assert_eq!(iter.previous(), b);
    assert_eq!(iter.previous(), a);
    assert_eq!(iter.next_element(), a);
}

#[test]
fn previous_keeps_overlapping_contractions_intact() {
    let collator = Collator::new("< a < b < c < x & a < ab & b < bc").unwrap();
    let mut iter = collator.element_iterator("abcx");
    let forward: Vec<_> = iter.by_ref().collect();
    assert_eq!(forward.len(), 3, "ab, c and x");
    assert_eq!(walk_back(&mut iter), forward);

    let mut danish = Collator::for_locale(&"da".parse().unwrap()).unwrap();
    let mut iter = danish.element_iterator("aa\u{030A}");
    let forward: Vec<_> = iter.by_ref().collect();
    iter.reset();
    iter.set_offset(3);
    assert_eq!(walk_back(&mut iter), forward);

    danish.set_decomposition(Decomposition::Canonical);
    let mut iter = danish.element_iterator("b\u{00E5}aa");
    let forward: Vec<_> = iter.by_ref().collect();
    assert_eq!(walk_back(&mut iter), forward);
}

#[test]
fn previous_from_inside_a_contraction_stops_at_the_offset() {
    let danish = Collator::for_locale(&"da".parse().unwrap()).unwrap();
    let mut iter = danish.element_iterator("aab");
    iter.set_offset(1);
    let a = danish.element_iterator("a").next_element();
    assert_eq!(iter.previous(), a);
    assert!(iter.previous().is_null());
}

#[test]
fn offsets_position_the_iterator() {
    let collator = Collator::root().unwrap();
    let mut iter = collator.element_iterator("abc");
    assert_eq!(iter.offset(), 0);
    iter.next_element();
    assert_eq!(iter.offset(), 1);

    iter.set_offset(2);
    assert_eq!(iter.offset(), 2);
    let c = collator.element_iterator("c").next_element();
    assert_eq!(iter.next_element(), c);
    assert!(iter.next_element().is_null());

    iter.set_offset(99);
    assert_eq!(iter.offset(), 3);
    assert!(iter.next_element().is_null());
}

#[test]
fn offsets_count_normalized_characters() {
    let mut collator = Collator::root().unwrap();
    collator.set_decomposition(Decomposition::Canonical);
    let mut iter = collator.element_iterator("\u{00E4}b");
    assert_eq!(iter.text(), "a\u{0308}b");
    // the decomposed pair still collates as one unit
    iter.next_element();
    assert_eq!(iter.offset(), 2);
}

#[test]
fn set_text_restarts_on_new_input() {
    let collator = Collator::root().unwrap();
    let mut iter = collator.element_iterator("abc");
    iter.next_element();
    iter.set_text("zz");
    assert_eq!(iter.state(), IteratorState::Fresh);
    assert_eq!(iter.offset(), 0);
    assert_eq!(iter.text(), "zz");
    let z = collator.element_iterator("z").next_element();
    assert_eq!(iter.next_element(), z);
}

#[test]
fn iterator_outlives_its_collator() {
    let mut iter = {
        let collator = Collator::new("< a < b").unwrap();
        collator.element_iterator("ba")
    };
    let b = iter.next_element();
    let a = iter.next_element();
    assert!(ElementIterator::primary_order(a) < ElementIterator::primary_order(b));
}

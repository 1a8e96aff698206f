//! Owned, positionable walk over the collation elements of one string.
//!
//! The iterator holds its own copy of the normalized text and a shared handle
//! to the rule table, so it does not borrow the collator that created it.
//! Offsets count characters of the normalized text.

use std::sync::Arc;

use crate::element::CollationElement;
use crate::generate::{group_len, push_group};
use crate::normalize::{decompose, Decomposition};
use crate::rules::RuleTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IteratorState {
    Fresh,
    Advancing,
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct ElementIterator {
    table: Arc<RuleTable>,
    decomposition: Decomposition,
    text: Vec<char>,
    // the buffered group covers text[group_start..offset]
    group_start: usize,
    offset: usize,
    buffer: Vec<CollationElement>,
    index: usize,
    state: IteratorState,
    // group starts of a forward pass over the whole text, filled on the first step back
    starts: Vec<usize>,
}

impl ElementIterator {
    pub const NULL_ORDER: CollationElement = CollationElement::NULL_ORDER;

    pub fn new(table: Arc<RuleTable>, decomposition: Decomposition, text: &str) -> Self {
        let text = decompose(text, decomposition).chars().collect();
        Self {
            table,
            decomposition,
            text,
            group_start: 0,
            offset: 0,
            buffer: Vec::new(),
            index: 0,
            state: IteratorState::Fresh,
            starts: Vec::new(),
        }
    }

    pub fn primary_order(element: CollationElement) -> u16 {
        element.primary()
    }
    pub fn secondary_order(element: CollationElement) -> u8 {
        element.secondary()
    }
    pub fn tertiary_order(element: CollationElement) -> u8 {
        element.tertiary()
    }

    /// Next element, or [`NULL_ORDER`](Self::NULL_ORDER) once the text is used up.
    pub fn next_element(&mut self) -> CollationElement {
        while self.index >= self.buffer.len() {
            if self.offset >= self.text.len() {
                self.state = IteratorState::Exhausted;
                return Self::NULL_ORDER;
            }
            self.buffer.clear();
            self.index = 0;
            self.group_start = self.offset;
            self.offset += push_group(&self.table, &self.text, self.offset, &mut self.buffer);
        }
        self.state = IteratorState::Advancing;
        let element = self.buffer[self.index];
        self.index += 1;
        element
    }

    /// Steps back one element. After `next_element` returned `e`, this returns `e`
    /// again; at the start of the text it returns `NULL_ORDER`. Groups are the
    /// ones a forward pass produces, so contractions split the same way both ways.
    pub fn previous(&mut self) -> CollationElement {
        if self.index == 0 {
            if self.group_start == 0 {
                self.state = IteratorState::Fresh;
                return Self::NULL_ORDER;
            }
            let end = self.group_start;
            let start = self.group_before(end);
            self.buffer.clear();
            push_group(&self.table, &self.text[..end], start, &mut self.buffer);
            self.offset = end;
            self.group_start = start;
            self.index = self.buffer.len();
        }
        self.state = IteratorState::Advancing;
        self.index -= 1;
        self.buffer[self.index]
    }

    // Start of the forward group that ends at `end`. A group reaching past `end`
    // (after `set_offset` into a contraction) is segmented again up to `end`.
    fn group_before(&mut self, end: usize) -> usize {
        if self.starts.is_empty() {
            let mut position = 0;
            while position < self.text.len() {
                self.starts.push(position);
                position += group_len(&self.table, &self.text, position);
            }
        }
        let i = self.starts.partition_point(|start| *start < end);
        let mut start = self.starts[i.saturating_sub(1)];
        loop {
            let len = group_len(&self.table, &self.text[..end], start);
            if start + len >= end {
                return start;
            }
            start += len;
        }
    }

    pub fn reset(&mut self) {
        self.group_start = 0;
        self.offset = 0;
        self.buffer.clear();
        self.index = 0;
        self.state = IteratorState::Fresh;
    }

    /// Position of the next group boundary, or the start of the current
    /// group while its elements are still being handed out.
    pub fn offset(&self) -> usize {
        if self.index < self.buffer.len() { self.group_start } else { self.offset }
    }

    /// Moves to `offset` (clamped to the text). Positions inside a contraction
    /// start a new group from that character.
    pub fn set_offset(&mut self, offset: usize) {
        let offset = offset.min(self.text.len());
        self.group_start = offset;
        self.offset = offset;
        self.buffer.clear();
        self.index = 0;
        self.state = if offset == 0 { IteratorState::Fresh } else { IteratorState::Advancing };
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = decompose(text, self.decomposition).chars().collect();
        self.starts.clear();
        self.reset();
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn state(&self) -> IteratorState {
        self.state
    }
}

impl Iterator for ElementIterator {
    type Item = CollationElement;

    fn next(&mut self) -> Option<CollationElement> {
        let element = self.next_element();
        (!element.is_null()).then_some(element)
    }
}

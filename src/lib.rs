//! Collate – rule-based, locale-sensitive string collation.
//!
//! Strings are ordered by *collation elements* rather than code points. Each
//! element carries three weights:
//! * primary – the base letter (`a` vs `b`),
//! * secondary – accents and other marks (`a` vs `á`),
//! * tertiary – case and variants (`a` vs `A`).
//!
//! Two strings are compared on all their primary weights first, then on the
//! secondary weights, then on the tertiary weights, as far as the configured
//! [`element::Strength`] reaches. `Identical` strength finally breaks ties on the
//! code points themselves.
//!
//! ## Modules
//! * [`rules`] – Parses tailoring rules (`< a, A ; á < b`) into a [`rules::RuleTable`].
//!   Grammar details live in `rules.pest`.
//! * [`normalize`] – Canonical and compatibility decomposition ahead of collation.
//! * [`generate`] – Turns normalized text into collation elements.
//! * [`compare`] – The level-by-level comparison.
//! * [`key`] – [`key::CollationKey`], a byte string whose byte order is the collation order.
//! * [`iterator`] – [`iterator::ElementIterator`], a positionable walk over the elements.
//! * [`collator`] – [`collator::Collator`], a rule table plus its configuration.
//! * [`locale`] – Root and locale rulesets, fallback and the collator cache.
//! * [`settings`] – File and environment configuration.
//!
//! ## Quick Start
//! ```
//! use std::cmp::Ordering;
//! use collate::collator::Collator;
//! use collate::element::Strength;
//! let mut collator = Collator::root().unwrap();
//! assert_eq!(collator.compare("ab", "AB"), Ordering::Less);
//! assert_eq!(collator.compare("black bird", "black-bird"), Ordering::Less);
//! collator.set_strength(Strength::Primary);
//! assert!(collator.equals("Resume", "résumé"));
//! let mut words = vec!["peach", "Péché", "péché", "pêche"];
//! collator.set_strength(Strength::Tertiary);
//! collator.sort(&mut words);
//! assert_eq!(words, ["peach", "péché", "Péché", "pêche"]);
//! ```

pub mod collator;
pub mod compare;
pub mod element;
pub mod error;
pub mod generate;
pub mod iterator;
pub mod key;
pub mod locale;
pub mod normalize;
pub mod rules;
pub mod settings;

pub use error::{CollateError, Result};

use core::hash::BuildHasherDefault;
use seahash::SeaHasher;

pub type FastHasher = BuildHasherDefault<SeaHasher>;

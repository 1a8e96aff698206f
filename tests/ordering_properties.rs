use std::cmp::Ordering;

use collate::collator::Collator;
use collate::element::Strength;
use collate::normalize::Decomposition;

const WORDS: &[&str] = &[
    "", "a", "A", "\u{00E1}", "\u{00C1}", "ab", "Ab", "b", "black bird", "black-bird", "blackbird",
    "cote", "c\u{00F4}te", "cot\u{00E9}", "c\u{00F4}t\u{00E9}", "co-op", "coop", "co op", "x!", "x?",
    "x\u{00B2}", "x2", "\u{00E6}", "ae", "\u{00DF}", "ss", "\u{FB01}", "fi", "\u{212B}", "\u{00C5}",
    "\u{6F22}", "z", "\u{00FE}",
];

fn matrix(collator: &Collator) -> Vec<Vec<Ordering>> {
    WORDS.iter().map(|a| WORDS.iter().map(|b| collator.compare(a, b)).collect()).collect()
}

#[test]
fn comparison_is_a_total_order() {
    let mut collator = Collator::root().unwrap();
    for decomposition in Decomposition::ALL {
        collator.set_decomposition(decomposition);
        for strength in Strength::ALL {
            collator.set_strength(strength);
            let m = matrix(&collator);
            let n = WORDS.len();
            for i in 0..n {
                assert_eq!(m[i][i], Ordering::Equal, "{:?} is equal to itself", WORDS[i]);
                for j in 0..n {
                    assert_eq!(m[i][j], m[j][i].reverse(), "{:?} and {:?} at {strength}", WORDS[i], WORDS[j]);
                    for k in 0..n {
                        if m[i][j] != Ordering::Greater && m[j][k] != Ordering::Greater {
                            assert_ne!(
                                m[i][k],
                                Ordering::Greater,
                                "{:?} <= {:?} <= {:?} at {strength} with {decomposition}",
                                WORDS[i],
                                WORDS[j],
                                WORDS[k]
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn stronger_levels_only_refine_weaker_ones() {
    let mut collator = Collator::root().unwrap();
    let mut previous: Option<Vec<Vec<Ordering>>> = None;
    for strength in Strength::ALL {
        collator.set_strength(strength);
        let current = matrix(&collator);
        if let Some(weaker) = &previous {
            for (i, row) in weaker.iter().enumerate() {
                for (j, ordering) in row.iter().enumerate() {
                    if *ordering != Ordering::Equal {
                        assert_eq!(current[i][j], *ordering, "{:?} vs {:?} at {strength}", WORDS[i], WORDS[j]);
                    }
                }
            }
        }
        previous = Some(current);
    }
}

#[test]
fn sorting_by_level() {
    let collator = Collator::root().unwrap();
    let mut words = vec!["b", "Ab", "\u{00E1}", "ab", "A", "a"];
    collator.sort(&mut words);
    assert_eq!(words, ["a", "A", "\u{00E1}", "ab", "Ab", "b"]);

    let mut accents = vec!["c\u{00F4}t\u{00E9}", "c\u{00F4}te", "cot\u{00E9}", "cote"];
    collator.sort(&mut accents);
    assert_eq!(accents, ["cote", "cot\u{00E9}", "c\u{00F4}te", "c\u{00F4}t\u{00E9}"]);
}

#[test]
fn secondary_strength_ignores_case_only() {
    let mut collator = Collator::root().unwrap();
    collator.set_strength(Strength::Secondary);
    assert!(collator.equals("Hello", "hello"));
    assert!(!collator.equals("hello", "h\u{00E9}llo"));
    assert!(!collator.equals("black bird", "black-bird"));
    collator.set_strength(Strength::Primary);
    assert!(collator.equals("hello", "h\u{00E9}llo"));
    assert!(collator.equals("black bird", "blackbird"));
}

#[test]
fn ligatures_expand_to_their_letters() {
    let mut collator = Collator::root().unwrap();
    assert_eq!(collator.compare("\u{00E6}", "ae"), Ordering::Greater);
    assert_eq!(collator.compare("\u{00E6}", "af"), Ordering::Less);
    assert_eq!(collator.compare("\u{00DF}", "st"), Ordering::Less);
    collator.set_strength(Strength::Primary);
    assert!(collator.equals("\u{00E6}", "ae"));
    assert!(collator.equals("Stra\u{00DF}e", "strasse"));
}

#[test]
fn decomposition_makes_equivalent_forms_equal() {
    let mut collator = Collator::root().unwrap();
    // precomposed and decomposed letters match without any decomposition
    assert!(collator.equals("\u{00E4}", "a\u{0308}"));

    assert!(!collator.equals("\u{212B}", "\u{00C5}"));
    collator.set_decomposition(Decomposition::Canonical);
    assert!(collator.equals("\u{212B}", "\u{00C5}"));
    assert!(!collator.equals("\u{FB01}", "fi"));

    collator.set_decomposition(Decomposition::Full);
    assert!(collator.equals("\u{FB01}", "fi"));
    assert!(collator.equals("x\u{00B2}", "x2"));

    collator.set_decomposition(Decomposition::None);
    assert_eq!(collator.compare("x2", "x\u{00B2}"), Ordering::Less);
    collator.set_strength(Strength::Secondary);
    assert!(collator.equals("x2", "x\u{00B2}"));
}

#[test]
fn collators_compare_from_many_threads() {
    let collator = Collator::root().unwrap();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for a in WORDS {
                    for b in WORDS {
                        assert_eq!(collator.compare(a, b), collator.compare(b, a).reverse());
                    }
                }
            });
        }
    });
}

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use collate::collator::Collator;
use collate::element::Strength;
use collate::locale::ROOT_RULES;
use collate::normalize::Decomposition;
use collate::rules::RuleTable;

const SENTENCE: &str =
    "XFILE What subset of all possible test cases has the highest probability of detecting the most errors?";
const SIMILAR: &str =
    "Xf ile What subset of all possible test cases has the lowest probability of detecting the least errors?";

fn words(n: usize) -> Vec<String> {
    let stems = ["péché", "Peach", "pêche", "black-bird", "blackbird", "Straße", "cote", "côté", "Ærø", "zebra"];
    (0..n).map(|i| format!("{}{}", stems[i % stems.len()], i % 97)).collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("parse root rules", |b| b.iter(|| RuleTable::parse(black_box(ROOT_RULES))));

    let mut collator = Collator::root().unwrap();
    for strength in [Strength::Primary, Strength::Tertiary, Strength::Identical] {
        collator.set_strength(strength);
        c.bench_function(&format!("compare {strength}"), |b| {
            b.iter(|| collator.compare(black_box(SENTENCE), black_box(SIMILAR)))
        });
    }
    collator.set_strength(Strength::Tertiary);
    collator.set_decomposition(Decomposition::Full);
    c.bench_function("compare full decomposition", |b| {
        b.iter(|| collator.compare(black_box(SENTENCE), black_box(SIMILAR)))
    });
    collator.set_decomposition(Decomposition::None);

    c.bench_function("collation key", |b| b.iter(|| collator.collation_key(black_box(SENTENCE))));
    c.bench_function("element iterator", |b| b.iter(|| collator.element_iterator(black_box(SENTENCE)).count()));

    for n in [100, 10_000] {
        let unsorted = words(n);
        c.bench_function(&format!("sort {n}"), |b| {
            b.iter(|| {
                let mut items = unsorted.clone();
                collator.sort(&mut items);
                items
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

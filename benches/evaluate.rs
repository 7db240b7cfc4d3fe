use automaton_eval::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Builds the classic non-deterministic automaton over `{a, b}` that accepts every word whose
/// `n`-th symbol from the end is an `a`. It has `n + 1` states.
fn nth_from_last(n: usize) -> AutomatonDefinition {
    let states = (0..=n).map(|i| format!("q{i}")).collect::<Vec<_>>();
    let mut builder = AutomatonDefinition::builder()
        .with_alphabet(["a", "b", "&"])
        .with_states(states.iter().cloned())
        .with_initial("q0")
        .with_final_states([format!("q{n}")])
        .with_transitions([("q0", "a", "q0"), ("q0", "b", "q0"), ("q0", "a", "q1")]);
    for i in 1..n {
        for symbol in ["a", "b"] {
            builder.push_transition((states[i].as_str(), symbol, states[i + 1].as_str()));
        }
    }
    builder.build().expect("benchmark automaton is well formed")
}

fn evaluation(c: &mut Criterion) {
    let definition = nth_from_last(16);
    let word = "ab".repeat(512);

    c.bench_function("evaluate nth-from-last(16), |w| = 1024", |b| {
        b.iter(|| definition.evaluate(black_box(&word)))
    });

    let words = (0..256)
        .map(|i| format!("{}{}", "ab".repeat(i % 32), "a".repeat(i % 17)))
        .collect::<Vec<_>>();
    c.bench_function("batch of 256 words", |b| {
        b.iter(|| definition.evaluate_batch(black_box(&words)))
    });
    #[cfg(feature = "parallel")]
    c.bench_function("parallel batch of 256 words", |b| {
        b.iter(|| definition.evaluator().par_evaluate_batch(black_box(&words)))
    });
}

fn loading(c: &mut Criterion) {
    let text = nth_from_last(64).to_string();
    c.bench_function("parse nth-from-last(64)", |b| {
        b.iter(|| black_box(&text).parse::<AutomatonDefinition>())
    });
}

criterion_group!(benches, evaluation, loading);
criterion_main!(benches);

//! # Text Feature Benchmarks
//!
//! Measures tokenization and shared-vocabulary vectorization.
//!
//! Run: `cargo bench --bench text_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qsim_core::{text_to_vectors, tokenize, FeatureMode};

const TEXT_A: &str = "The quick brown fox jumps over the lazy dog. It's a classic pangram, \
    used to display fonts and test keyboards since the late 19th century.";
const TEXT_B: &str = "A lazy dog sleeps while the quick fox runs away; keyboards and fonts \
    have nothing to do with it, the dog said.";

fn bench_tokenize(c: &mut Criterion) {
    let long = TEXT_A.repeat(100);
    c.bench_function("tokenize_long", |b| b.iter(|| black_box(tokenize(black_box(&long)))));
}

fn bench_text_to_vectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_to_vectors");

    group.bench_function("tf", |b| {
        b.iter(|| black_box(text_to_vectors(TEXT_A, TEXT_B, FeatureMode::Tf, 1024)))
    });

    group.bench_function("bin", |b| {
        b.iter(|| black_box(text_to_vectors(TEXT_A, TEXT_B, FeatureMode::Bin, 1024)))
    });

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_text_to_vectors);
criterion_main!(benches);

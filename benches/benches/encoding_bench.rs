//! # Encoding Benchmarks
//!
//! Measures padding + normalization of raw vectors into statevectors.
//! Linear in the padded length.
//!
//! Run: `cargo bench --bench encoding_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qsim_core::{encode, encode_pair};

fn raw_vector(len: usize) -> Vec<f64> {
    (0..len).map(|i| ((i * 7 + 3) % 11) as f64 - 5.0).collect()
}

/// Benchmark encode for growing input lengths
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for len in [3usize, 100, 1000, 1024, 10_000] {
        let raw = raw_vector(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &raw, |b, raw| {
            b.iter(|| black_box(encode(black_box(raw))))
        });
    }

    group.finish();
}

/// Benchmark encode_pair (both operands + qubit check)
fn bench_encode_pair(c: &mut Criterion) {
    let a = raw_vector(1000);
    let b = raw_vector(1000).into_iter().rev().collect::<Vec<_>>();

    c.bench_function("encode_pair_1000", |bench| {
        bench.iter(|| black_box(encode_pair(black_box(&a), black_box(&b))))
    });
}

criterion_group!(benches, bench_encode, bench_encode_pair);
criterion_main!(benches);

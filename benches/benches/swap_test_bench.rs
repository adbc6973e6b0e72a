//! # SWAP Test Benchmarks
//!
//! Measures circuit construction and simulation. Simulation cost grows as
//! 2^(2n+1) with n qubits per register; sampling is O(shots).
//!
//! Run: `cargo bench --bench swap_test_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qsim_core::prelude::*;
use qsim_core::build_swap_test;

fn pair(len: usize) -> (StateVector, StateVector) {
    let a: Vec<f64> = (0..len).map(|i| (i + 1) as f64).collect();
    let b: Vec<f64> = (0..len).map(|i| (len - i) as f64).collect();
    encode_pair(&a, &b).expect("non-zero vectors")
}

/// Benchmark circuit construction
fn bench_build_circuit(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_swap_test");

    for n in [1usize, 4, 8] {
        let (a, b) = pair(1 << n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| black_box(build_swap_test(a.amplitudes(), b.amplitudes())))
        });
    }

    group.finish();
}

/// Benchmark full estimation per register size
fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate_similarity");
    group.sample_size(20);

    for n in [1usize, 3, 5, 7] {
        let (a, b) = pair(1 << n);
        let swap_test = SwapTest::new(StatevectorSimulator::new().with_seed(1)).with_shots(8192);
        group.bench_with_input(BenchmarkId::new("sampled", n), &n, |bench, _| {
            bench.iter(|| black_box(swap_test.estimate(&a, &b)))
        });

        let exact = SwapTest::new(ExactBackend::new());
        group.bench_with_input(BenchmarkId::new("exact", n), &n, |bench, _| {
            bench.iter(|| black_box(exact.estimate(&a, &b)))
        });
    }

    group.finish();
}

/// Benchmark sampling cost alone
fn bench_shots(c: &mut Criterion) {
    let mut group = c.benchmark_group("shots");
    let (a, b) = pair(4);

    for shots in [256u64, 8192, 65_536] {
        let swap_test = SwapTest::new(StatevectorSimulator::new().with_seed(1)).with_shots(shots);
        group.bench_with_input(BenchmarkId::from_parameter(shots), &shots, |bench, _| {
            bench.iter(|| black_box(swap_test.estimate(&a, &b)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_circuit, bench_estimate, bench_shots);
criterion_main!(benches);

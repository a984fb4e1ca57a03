//! Benchmarks for Bernoulli log-mass, sampling and entropy.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench -p tensorlogic-distributions
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scirs2_core::ndarray::ArrayD;
use std::hint::black_box;
use tensorlogic_distributions::{Bernoulli, BernoulliConfig, Distribution};

fn create_logits(size: usize) -> ArrayD<f64> {
    ArrayD::from_shape_vec(
        vec![size],
        (0..size).map(|i| (i as f64 * 0.37).sin() * 8.0).collect(),
    )
    .unwrap()
}

fn create_events(size: usize) -> ArrayD<i32> {
    ArrayD::from_shape_vec(vec![size], (0..size).map(|i| (i % 2) as i32).collect()).unwrap()
}

fn bench_log_prob(c: &mut Criterion) {
    let mut group = c.benchmark_group("bernoulli_log_prob");

    for size in [64, 1024, 16384, 262144] {
        let dist = Bernoulli::from_logits(create_logits(size), BernoulliConfig::default()).unwrap();
        let events = create_events(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| dist.log_prob(black_box(&events)).unwrap());
        });
    }

    group.finish();
}

fn bench_log_prob_broadcast(c: &mut Criterion) {
    let mut group = c.benchmark_group("bernoulli_log_prob_broadcast");

    for rows in [16, 256, 4096] {
        let logits = ArrayD::from_elem(vec![rows, 64], 0.25);
        let dist = Bernoulli::from_logits(logits, BernoulliConfig::default()).unwrap();
        let events = create_events(64);

        group.throughput(Throughput::Elements((rows * 64) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |bench, _| {
            bench.iter(|| dist.log_prob(black_box(&events)).unwrap());
        });
    }

    group.finish();
}

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("bernoulli_sample");
    let dist = Bernoulli::from_logits(create_logits(256), BernoulliConfig::default()).unwrap();

    for n in [1, 64, 1024] {
        group.throughput(Throughput::Elements((n * 256) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, &n| {
            bench.iter(|| dist.sample(black_box(n), Some(42)).unwrap());
        });
    }

    group.finish();
}

fn bench_entropy(c: &mut Criterion) {
    let mut group = c.benchmark_group("bernoulli_entropy");

    for size in [1024, 65536] {
        let dist = Bernoulli::from_logits(create_logits(size), BernoulliConfig::default()).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| black_box(&dist).entropy().unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_log_prob,
    bench_log_prob_broadcast,
    bench_sample,
    bench_entropy
);

criterion_main!(benches);

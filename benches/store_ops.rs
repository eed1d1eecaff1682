//! Benchmark history store suite
//!
//! Benchmarks for the append-only run history:
//! - Append throughput at various history sizes
//! - History and lastUpdate lookup cost
//! - JSON serialize/deserialize of full histories

use bench_ledger::sample::{sample_history, sample_runs, SampleConfig};
use bench_ledger::{io, BenchmarkStore};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn config(runs: usize) -> SampleConfig {
    SampleConfig {
        runs,
        ..Default::default()
    }
}

/// Benchmark appending runs into histories of various sizes
fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_append");

    for n in [100usize, 1_000, 10_000] {
        let runs = sample_runs(&config(n));

        group.bench_with_input(BenchmarkId::new("append_all", n), &n, |bencher, _| {
            bencher.iter(|| {
                let mut store = BenchmarkStore::new("https://example.com/repo");
                for run in &runs {
                    store.append(black_box(run.clone())).unwrap();
                }
                black_box(store)
            })
        });

        // Single append onto an already-populated store.
        let populated = sample_history(&config(n));
        let extra = sample_runs(&SampleConfig {
            runs: 1,
            seed: 7,
            ..Default::default()
        })
        .remove(0);
        group.bench_with_input(BenchmarkId::new("append_one", n), &n, |bencher, _| {
            bencher.iter_with_setup(
                || populated.clone(),
                |mut store| {
                    store.append(black_box(extra.clone())).unwrap();
                    black_box(store)
                },
            )
        });
    }

    group.finish();
}

/// Benchmark read-side lookups
fn bench_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_lookups");

    for n in [100usize, 1_000, 10_000] {
        let store = sample_history(&config(n));

        group.bench_with_input(BenchmarkId::new("history", n), &n, |bencher, _| {
            bencher.iter(|| black_box(store.history(black_box("cargo"))))
        });

        group.bench_with_input(BenchmarkId::new("history_unknown_tool", n), &n, |bencher, _| {
            bencher.iter(|| black_box(store.history(black_box("no-such-tool"))))
        });

        group.bench_with_input(BenchmarkId::new("last_update", n), &n, |bencher, _| {
            bencher.iter(|| black_box(store.last_update()))
        });
    }

    group.finish();
}

/// Benchmark full-document serialization, both directions and both shapes
fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_serialization");
    group.sample_size(20);

    for n in [100usize, 1_000, 10_000] {
        let store = sample_history(&config(n));
        let json = io::render_history(store.data(), false).unwrap();
        let script = io::render_history(store.data(), true).unwrap();

        group.bench_with_input(BenchmarkId::new("render_json", n), &n, |bencher, _| {
            bencher.iter(|| black_box(io::render_history(black_box(store.data()), false).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("parse_json", n), &n, |bencher, _| {
            bencher.iter(|| black_box(io::parse_history(black_box(&json), false).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("parse_script", n), &n, |bencher, _| {
            bencher.iter(|| black_box(io::parse_history(black_box(&script), true).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_append, bench_lookups, bench_serialization);
criterion_main!(benches);

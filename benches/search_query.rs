//! Search index benchmark suite
//!
//! Benchmarks for the docs search index:
//! - Substring query latency at various index sizes
//! - Hit-heavy vs miss-only terms
//! - Wholesale replace cost

use bench_ledger::sample::sample_index;
use bench_ledger::SearchIndexStore;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Benchmark query latency over synthetic indexes
fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_query");

    for n in [100usize, 1_000, 10_000] {
        let store = SearchIndexStore::from_entries(sample_index(n, 42));

        // "contract" is in the generator vocabulary, so a large share of
        // entries match; the miss term matches nothing.
        group.bench_with_input(BenchmarkId::new("hit_heavy", n), &n, |bencher, _| {
            bencher.iter(|| black_box(store.query(black_box("contract"))))
        });

        group.bench_with_input(BenchmarkId::new("miss", n), &n, |bencher, _| {
            bencher.iter(|| black_box(store.query(black_box("zzzz-no-match"))))
        });

        group.bench_with_input(BenchmarkId::new("mixed_case", n), &n, |bencher, _| {
            bencher.iter(|| black_box(store.query(black_box("CONTRACT"))))
        });
    }

    group.finish();
}

/// Benchmark wholesale index replacement
fn bench_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_replace");
    group.sample_size(20);

    for n in [100usize, 1_000, 10_000] {
        let fresh = sample_index(n, 7);

        group.bench_with_input(BenchmarkId::new("replace", n), &n, |bencher, _| {
            bencher.iter_with_setup(
                || {
                    (
                        SearchIndexStore::from_entries(sample_index(n, 42)),
                        fresh.clone(),
                    )
                },
                |(mut store, entries)| {
                    store.replace(entries);
                    black_box(store)
                },
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_query, bench_replace);
criterion_main!(benches);

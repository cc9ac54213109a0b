//! Benchmark for PersistentVector.
//!
//! PersistentVector copies its backing storage on every update, so these
//! numbers track the cost of that copy against the standard Vec and show
//! how much the runtime's dispatch adds on top.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use persistent_runtime::persistent::PersistentVector;
use persistent_runtime::prelude::{Runtime, Value};
use std::hint::black_box;

// =============================================================================
// conj Benchmark
// =============================================================================

fn benchmark_conj(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("conj");

    for size in [100_i64, 1_000] {
        group.bench_with_input(
            BenchmarkId::new("PersistentVector", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut vector = PersistentVector::new();
                    for index in 0..size {
                        vector = vector.conj(black_box(index));
                    }
                    black_box(vector)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut vector = Vec::new();
                for index in 0..size {
                    vector.push(black_box(index));
                }
                black_box(vector)
            });
        });
    }

    group.finish();
}

// =============================================================================
// nth Benchmark
// =============================================================================

fn benchmark_nth(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("nth");

    for size in [1_000_i64, 100_000] {
        let vector: PersistentVector<i64> = (0..size).collect();
        group.bench_with_input(
            BenchmarkId::new("PersistentVector", size),
            &vector,
            |bencher, vector| {
                bencher.iter(|| {
                    for index in 0..vector.len() {
                        black_box(vector.get(black_box(index)));
                    }
                });
            },
        );

        let runtime = Runtime::new();
        let value = Value::vector((0..size).map(Value::from));
        group.bench_with_input(BenchmarkId::new("Runtime", size), &size, |bencher, &size| {
            bencher.iter(|| {
                for index in 0..size {
                    black_box(runtime.nth(&value, black_box(index)).ok());
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// reduce Benchmark
// =============================================================================

fn benchmark_reduce(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("reduce");
    let runtime = Runtime::new();
    let plus = Value::function("+", |_, args| {
        Ok(Value::from(args.iter().filter_map(Value::as_integer).sum::<i64>()))
    });

    for size in [1_000_i64, 10_000] {
        let vector = Value::vector((0..size).map(Value::from));
        group.bench_with_input(BenchmarkId::new("vector", size), &vector, |bencher, vector| {
            bencher.iter(|| black_box(runtime.reduce_with(vector, &plus, Value::from(0)).ok()));
        });

        let range = Value::range(0, size, 1).unwrap_or(Value::Nil);
        group.bench_with_input(BenchmarkId::new("range", size), &range, |bencher, range| {
            bencher.iter(|| black_box(runtime.reduce_with(range, &plus, Value::from(0)).ok()));
        });

        let lazy = runtime.map(&Value::function("identity", |_, args| Ok(args[0].clone())), &vector);
        group.bench_with_input(BenchmarkId::new("lazy", size), &lazy, |bencher, lazy| {
            bencher.iter(|| black_box(runtime.reduce_with(lazy, &plus, Value::from(0)).ok()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_conj, benchmark_nth, benchmark_reduce);
criterion_main!(benches);

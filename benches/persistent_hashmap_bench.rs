//! Benchmark for PersistentHashMap and the map value representations.
//!
//! Compares the bucketed PersistentHashMap against the standard HashMap, and
//! the flat ObjMap representation against a promoted hash map through the
//! runtime.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use persistent_runtime::persistent::PersistentHashMap;
use persistent_runtime::prelude::{Runtime, RuntimeConfig, Value};
use std::collections::HashMap;
use std::hint::black_box;

// =============================================================================
// assoc Benchmark
// =============================================================================

fn benchmark_assoc(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("assoc");

    for size in [100_i64, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("PersistentHashMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = PersistentHashMap::new();
                    for index in 0..size {
                        map = map.assoc(black_box(index), black_box(index * 2));
                    }
                    black_box(map)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("HashMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = HashMap::new();
                    for index in 0..size {
                        map.insert(black_box(index), black_box(index * 2));
                    }
                    black_box(map)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100_i64, 1_000, 10_000] {
        let persistent: PersistentHashMap<i64, i64> =
            (0..size).map(|index| (index, index * 2)).collect();
        group.bench_with_input(
            BenchmarkId::new("PersistentHashMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    for index in 0..size {
                        black_box(persistent.get(black_box(&index)));
                    }
                });
            },
        );

        let standard: HashMap<i64, i64> = (0..size).map(|index| (index, index * 2)).collect();
        group.bench_with_input(BenchmarkId::new("HashMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                for index in 0..size {
                    black_box(standard.get(black_box(&index)));
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// Map value representation Benchmark
// =============================================================================

fn benchmark_string_keyed_map(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("string_keyed_map");
    let keys: Vec<Value> = (0..32).map(|index| Value::from(format!("key-{index}"))).collect();

    // The default threshold keeps 32 string keys flat; a threshold of zero
    // promotes on the first insertion.
    for (label, threshold) in [("ObjMap", 32), ("HashMap", 0)] {
        let runtime = Runtime::with_config(RuntimeConfig::default().with_hash_map_threshold(threshold));
        group.bench_function(BenchmarkId::new("assoc", label), |bencher| {
            bencher.iter(|| {
                keys.iter().fold(Value::empty_map(), |map, key| {
                    runtime
                        .assoc(&map, black_box(key.clone()), Value::Nil)
                        .unwrap_or(map)
                })
            });
        });

        let map = keys.iter().fold(Value::empty_map(), |map, key| {
            runtime.assoc(&map, key.clone(), Value::Nil).unwrap_or(map)
        });
        group.bench_function(BenchmarkId::new("get", label), |bencher| {
            bencher.iter(|| {
                for key in &keys {
                    black_box(runtime.get(&map, black_box(key)).ok());
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_assoc,
    benchmark_get,
    benchmark_string_keyed_map
);
criterion_main!(benches);

//! Benchmarks for the primitive hash maps
//!
//! Compares `IntIntMap` against `std::HashMap` for inserts and lookups, and
//! measures eager versus lazy decoding and the pending merge path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::HashMap;
use std::time::Duration;

use primap::{DecodeOptions, IntFloatMap, IntIntMap, VectorOps, WireCodec};

// =============================================================================
// BENCHMARK CONFIGURATION
// =============================================================================

const SIZES: &[usize] = &[100, 1_000, 10_000];

fn sample_map(size: usize) -> IntIntMap {
    (0..size as i32).map(|i| (i.wrapping_mul(2_654_435), i)).collect()
}

// =============================================================================
// INSERT / LOOKUP
// =============================================================================

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertion");
    group.measurement_time(Duration::from_secs(2));

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("std::HashMap", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = HashMap::new();
                for i in 0..size as i32 {
                    map.insert(black_box(i), black_box(i));
                }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("IntIntMap", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = IntIntMap::new();
                for i in 0..size as i32 {
                    map.put(black_box(i), black_box(i));
                }
                black_box(map)
            });
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for &size in SIZES {
        let map = sample_map(size);
        let keys: Vec<i32> = map.keys().collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("IntIntMap", size), &keys, |b, keys| {
            b.iter(|| {
                let mut sum = 0i64;
                for &k in keys {
                    sum += i64::from(map.get(black_box(k)));
                }
                black_box(sum)
            });
        });
    }
    group.finish();
}

// =============================================================================
// DECODING
// =============================================================================

fn bench_decode_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for &size in SIZES {
        let bytes = sample_map(size).to_bytes().unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        for (name, options) in [("eager", DecodeOptions::eager()), ("lazy", DecodeOptions::lazy())] {
            group.bench_with_input(BenchmarkId::new(name, size), &bytes, |b, bytes| {
                b.iter(|| black_box(IntIntMap::from_bytes(bytes, &options).unwrap()));
            });
        }
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("plus");

    for &size in SIZES {
        let bytes = sample_map(size).to_bytes().unwrap();
        let pending = IntIntMap::from_bytes(&bytes, &DecodeOptions::lazy()).unwrap();
        let materialized = IntIntMap::from_bytes(&bytes, &DecodeOptions::eager()).unwrap();

        group.bench_with_input(BenchmarkId::new("pending_operand", size), &size, |b, _| {
            b.iter(|| {
                let mut acc = IntIntMap::new();
                acc.plus(&pending);
                black_box(acc)
            });
        });
        group.bench_with_input(BenchmarkId::new("materialized_operand", size), &size, |b, _| {
            b.iter(|| {
                let mut acc = IntIntMap::new();
                acc.plus(&materialized);
                black_box(acc)
            });
        });
    }
    group.finish();
}

fn bench_dot(c: &mut Criterion) {
    let a: IntFloatMap = (0..10_000).map(|i| (i, i as f32 * 0.5)).collect();
    let b: IntFloatMap = (5_000..6_000).map(|i| (i, 1.0)).collect();

    c.bench_function("dot_10000x1000", |bench| {
        bench.iter(|| black_box(a.dot(black_box(&b))))
    });
}

criterion_group!(
    benches,
    bench_insertion,
    bench_lookup,
    bench_decode_policies,
    bench_merge,
    bench_dot
);
criterion_main!(benches);

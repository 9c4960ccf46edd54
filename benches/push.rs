//! Criterion micro-benchmarks for appends, front inserts and clones.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use dyn_array::DynArr;

fn push_back_10k(c: &mut Criterion) {
    c.bench_function("push_back_10k", |b| {
        b.iter(|| {
            let mut arr = DynArr::new();
            for i in 0..10_000u64 {
                arr.push_back(black_box(i)).unwrap();
            }
            arr
        });
    });
}

fn push_back_reserved_10k(c: &mut Criterion) {
    c.bench_function("push_back_reserved_10k", |b| {
        b.iter(|| {
            let mut arr = DynArr::with_capacity(10_000).unwrap();
            for i in 0..10_000u64 {
                arr.push_back(black_box(i)).unwrap();
            }
            arr
        });
    });
}

fn insert_front_1k(c: &mut Criterion) {
    c.bench_function("insert_front_1k", |b| {
        b.iter(|| {
            let mut arr = DynArr::new();
            for i in 0..1_000u64 {
                arr.insert(0, black_box(i)).unwrap();
            }
            arr
        });
    });
}

fn clone_strings(c: &mut Criterion) {
    let mut arr = DynArr::new();
    for i in 0..1_000 {
        arr.push_back(format!("value-{i}")).unwrap();
    }
    c.bench_function("clone_1k_strings", |b| {
        b.iter(|| black_box(&arr).clone());
    });
}

criterion_group!(benches, push_back_10k, push_back_reserved_10k, insert_front_1k, clone_strings);
criterion_main!(benches);

//! Benchmarks for the coordination core.
//!
//! Benchmarks cover:
//! - Semaphore acquire/release fast path
//! - Waiting-area submit/take hand-off
//! - Burst fill-and-drain at full capacity

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use forecourt::core::{Vehicle, WaitingArea};
use forecourt::Semaphore;

fn bench_semaphore(c: &mut Criterion) {
    let mut group = c.benchmark_group("semaphore");
    group.throughput(Throughput::Elements(1));

    group.bench_function("acquire_release_uncontended", |b| {
        let sem = Semaphore::new(1);
        b.iter(|| {
            sem.acquire().unwrap();
            black_box(&sem).release();
        });
    });

    group.bench_function("try_acquire_release", |b| {
        let sem = Semaphore::new(1);
        b.iter(|| {
            assert!(sem.try_acquire());
            black_box(&sem).release();
        });
    });

    group.finish();
}

fn bench_waiting_area(c: &mut Criterion) {
    let mut group = c.benchmark_group("waiting_area");
    group.throughput(Throughput::Elements(1));

    group.bench_function("submit_take_cycle", |b| {
        let area = WaitingArea::new(10).unwrap();
        let mut sequence = 0u64;
        b.iter(|| {
            sequence += 1;
            area.submit(Vehicle::new("B", sequence)).unwrap();
            black_box(area.take().unwrap());
        });
    });

    group.bench_function("fill_and_drain_at_capacity", |b| {
        let area = WaitingArea::new(10).unwrap();
        let mut sequence = 0u64;
        b.iter(|| {
            for _ in 0..10 {
                sequence += 1;
                area.submit(Vehicle::new("B", sequence)).unwrap();
            }
            for _ in 0..10 {
                black_box(area.take().unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_semaphore, bench_waiting_area);
criterion_main!(benches);

//! Benchmarks for the bounded queue's send paths.
//!
//! Covers the hot pair of operations an active object performs per
//! message (send then drain) and the interrupt-context path that must
//! never block.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use pact_native::Queue;

const BATCH: usize = 256;

/// Batch of task-context sends followed by a full drain.
fn bench_send_then_drain(c: &mut Criterion) {
    let queue: Queue<u64> = Queue::new(BATCH);

    let mut group = c.benchmark_group("queue");
    group.throughput(Throughput::Elements(BATCH as u64));
    group.bench_function("send_then_drain", |b| {
        b.iter(|| {
            for n in 0..BATCH as u64 {
                queue.send(black_box(n)).unwrap();
            }
            for _ in 0..BATCH {
                black_box(queue.try_receive());
            }
        });
    });
    group.finish();
}

/// Same shape through the try-lock interrupt path.
fn bench_interrupt_send_then_drain(c: &mut Criterion) {
    let queue: Queue<u64> = Queue::new(BATCH);

    let mut group = c.benchmark_group("queue");
    group.throughput(Throughput::Elements(BATCH as u64));
    group.bench_function("interrupt_send_then_drain", |b| {
        b.iter(|| {
            for n in 0..BATCH as u64 {
                queue.send_from_interrupt(black_box(n)).unwrap();
            }
            for _ in 0..BATCH {
                black_box(queue.try_receive());
            }
        });
    });
    group.finish();
}

/// One element through a capacity-1 queue, the tightest hop.
fn bench_single_hop(c: &mut Criterion) {
    let queue: Queue<u64> = Queue::new(1);

    let mut group = c.benchmark_group("queue");
    group.bench_function("single_hop", |b| {
        b.iter(|| {
            queue.send(black_box(7)).unwrap();
            black_box(queue.receive())
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_send_then_drain,
    bench_interrupt_send_then_drain,
    bench_single_hop
);
criterion_main!(benches);

mod common;

use boundcache::policy::fifo::FifoQueue;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

fn bench_fifo_add_remove(c: &mut Criterion) {
    c.bench_function("fifo_add_remove", |b| {
        b.iter_batched(
            || FifoQueue::with_capacity(1024),
            |mut queue| {
                for i in 0..4096u64 {
                    queue.add(std::hint::black_box(i));
                    if i % 2 == 1 {
                        let _ = std::hint::black_box(queue.remove_first());
                    }
                }
                std::hint::black_box(queue.max_size())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_fifo_equality(c: &mut Criterion) {
    let keys = common::uniform_keys(4096, u64::MAX, 7);
    let left: FifoQueue<u64> = keys.iter().copied().collect();
    let right: FifoQueue<u64> = keys.iter().copied().collect();
    c.bench_function("fifo_equality", |b| {
        b.iter(|| std::hint::black_box(&left) == std::hint::black_box(&right))
    });
}

criterion_group!(benches, bench_fifo_add_remove, bench_fifo_equality);
criterion_main!(benches);

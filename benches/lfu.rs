mod common;

use boundcache::policy::lfu::LfuCache;
use boundcache::traits::{CoreCache, LfuCacheTrait};
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};

fn filled(capacity: usize, factor: f64) -> LfuCache<u64, u64> {
    let mut cache = LfuCache::new(capacity, factor);
    for i in 0..capacity as u64 {
        cache.insert(i, i);
    }
    cache
}

fn bench_lfu_promotion(c: &mut Criterion) {
    c.bench_function("lfu_promotion", |b| {
        b.iter_batched(
            || filled(1024, 0.25),
            |mut cache| {
                for round in 0..4u64 {
                    for i in 0..1024u64 {
                        let key = std::hint::black_box((i + round) % 1024);
                        let _ = std::hint::black_box(cache.get(&key));
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lfu_batch_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_batch_eviction");
    for factor in [0.01, 0.1, 0.25, 0.5] {
        group.bench_with_input(BenchmarkId::from_parameter(factor), &factor, |b, &factor| {
            b.iter_batched(
                || filled(1024, factor),
                |mut cache| {
                    for i in 0..4096u64 {
                        cache.insert(std::hint::black_box(10_000 + i), i);
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_lfu_pop_lfu(c: &mut Criterion) {
    c.bench_function("lfu_pop_lfu", |b| {
        b.iter_batched(
            || {
                let mut cache = filled(1024, 0.25);
                for i in (0..1024u64).step_by(3) {
                    cache.get(&i);
                }
                cache
            },
            |mut cache| {
                for _ in 0..1024 {
                    let _ = std::hint::black_box(cache.pop_lfu());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lfu_hotset_read_through(c: &mut Criterion) {
    let keys = common::hotset_keys(8192, 16_384, 0.1, 0.9, 42);
    c.bench_function("lfu_hotset_read_through", |b| {
        b.iter_batched(
            || LfuCache::new(1024, 0.1),
            |mut cache| {
                for &key in &keys {
                    if cache.get(&key).is_none() {
                        cache.insert(key, key);
                    }
                }
                std::hint::black_box(cache.len())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_lfu_promotion,
    bench_lfu_batch_eviction,
    bench_lfu_pop_lfu,
    bench_lfu_hotset_read_through
);
criterion_main!(benches);

#![no_main]

use boundcache::policy::lru::LruCache;
use boundcache::traits::{CoreCache, LruCacheTrait, MutableCache};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on LruCache
//
// Keys come from a small domain so updates, hits and evictions all occur.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 32);
    let mut cache: LruCache<u8, u8> = LruCache::new(capacity);

    for pair in ops.chunks_exact(2) {
        let (op, key) = (pair[0] % 6, pair[1] % 64);
        match op {
            0 => {
                cache.insert(key, pair[0]);
            }
            1 => {
                let _ = cache.get(&key);
            }
            2 => {
                cache.remove(&key);
            }
            3 => {
                cache.pop_lru();
            }
            4 => {
                cache.touch(&key);
            }
            _ => {
                let _ = cache.recency_rank(&key);
                let _ = cache.peek(&key);
            }
        }

        assert!(cache.len() <= capacity);
        cache.check_invariants().unwrap();
    }
});

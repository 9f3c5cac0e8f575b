#![no_main]

use boundcache::policy::lfu::LfuCache;
use boundcache::traits::{CoreCache, LfuCacheTrait, MutableCache};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on LfuCache
//
// The first two bytes choose capacity and eviction factor.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let capacity = usize::from(data[0] % 32) + 1;
    let factor = (f64::from(data[1]) + 1.0) / 257.0;
    let mut cache: LfuCache<u8, u8> = LfuCache::new(capacity, factor);

    for pair in data[2..].chunks_exact(2) {
        let (op, key) = (pair[0] % 5, pair[1] % 64);
        match op {
            0 | 1 => {
                cache.insert(key, pair[0]);
            }
            2 => {
                let before = cache.frequency(&key);
                if cache.get(&key).is_some() {
                    let after = cache.frequency(&key);
                    assert!(after >= before);
                }
            }
            3 => {
                cache.remove(&key);
            }
            _ => {
                cache.pop_lfu();
            }
        }

        assert!(cache.len() <= capacity);
        assert!(cache.lowest_frequency() <= cache.max_frequency());
        cache.check_invariants().unwrap();
    }
});

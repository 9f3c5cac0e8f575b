/// Counters and gauges of an [`LruCache`](crate::policy::lru::LruCache).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,

    pub remove_calls: u64,
    pub remove_found: u64,
    pub clears: u64,

    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub peek_calls: u64,
    pub peek_found: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl LruMetricsSnapshot {
    /// Fraction of `get` calls that hit, or 0.0 before the first call.
    pub fn hit_ratio(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

/// Counters and gauges of an [`LfuCache`](crate::policy::lfu::LfuCache).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LfuMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    // evict_calls counts batches triggered by inserts; evicted_entries counts
    // every entry they removed
    pub evict_calls: u64,
    pub evicted_entries: u64,

    pub remove_calls: u64,
    pub remove_found: u64,
    pub clears: u64,

    pub promotions: u64,
    pub saturated_refreshes: u64,
    pub pop_lfu_calls: u64,
    pub pop_lfu_found: u64,
    pub peek_calls: u64,
    pub peek_found: u64,

    pub cache_len: usize,
    pub capacity: usize,
    pub lowest_frequency: usize,
}

impl LfuMetricsSnapshot {
    /// Fraction of `get` calls that hit, or 0.0 before the first call.
    pub fn hit_ratio(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

/// Counters and gauges of a [`FifoQueue`](crate::policy::fifo::FifoQueue).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FifoMetricsSnapshot {
    pub add_calls: u64,
    pub first_calls: u64,
    pub first_empty: u64,
    pub remove_first_calls: u64,
    pub remove_first_empty: u64,
    pub clears: u64,

    pub len: usize,
    pub max_size: usize,
}

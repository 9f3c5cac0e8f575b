use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{
    CoreMetricsRecorder, FifoMetricsReadRecorder, FifoMetricsRecorder, LfuMetricsReadRecorder,
    LfuMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder,
};

#[derive(Debug, Default)]
pub struct LruMetrics {
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
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
}

#[derive(Debug, Default)]
pub struct LfuMetrics {
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
    pub promotions: u64,
    pub saturated_refreshes: u64,
    pub pop_lfu_calls: u64,
    pub pop_lfu_found: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
}

#[derive(Debug, Default)]
pub struct FifoMetrics {
    pub add_calls: u64,
    pub remove_first_calls: u64,
    pub remove_first_empty: u64,
    pub clears: u64,
    pub first_calls: MetricsCell,
    pub first_empty: MetricsCell,
}

// Both keyed policies share the same core counter layout.
macro_rules! impl_core_recorder {
    ($ty:ty) => {
        impl CoreMetricsRecorder for $ty {
            fn record_get_hit(&mut self) {
                self.get_calls += 1;
                self.get_hits += 1;
            }

            fn record_get_miss(&mut self) {
                self.get_calls += 1;
                self.get_misses += 1;
            }

            fn record_insert_call(&mut self) {
                self.insert_calls += 1;
            }

            fn record_insert_new(&mut self) {
                self.insert_new += 1;
            }

            fn record_insert_update(&mut self) {
                self.insert_updates += 1;
            }

            fn record_evict_call(&mut self) {
                self.evict_calls += 1;
            }

            fn record_evicted_entry(&mut self) {
                self.evicted_entries += 1;
            }

            fn record_remove_call(&mut self) {
                self.remove_calls += 1;
            }

            fn record_remove_found(&mut self) {
                self.remove_found += 1;
            }

            fn record_clear(&mut self) {
                self.clears += 1;
            }
        }
    };
}

impl_core_recorder!(LruMetrics);
impl_core_recorder!(LfuMetrics);

impl LruMetricsRecorder for LruMetrics {
    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }
}

impl LruMetricsReadRecorder for &LruMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_found(&self) {
        self.peek_found.incr();
    }
}

impl LfuMetricsRecorder for LfuMetrics {
    fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    fn record_saturated_refresh(&mut self) {
        self.saturated_refreshes += 1;
    }

    fn record_eviction_batch(&mut self) {
        self.evict_calls += 1;
    }

    fn record_pop_lfu_call(&mut self) {
        self.pop_lfu_calls += 1;
    }

    fn record_pop_lfu_found(&mut self) {
        self.pop_lfu_found += 1;
    }
}

impl LfuMetricsReadRecorder for &LfuMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_found(&self) {
        self.peek_found.incr();
    }
}

impl FifoMetricsRecorder for FifoMetrics {
    fn record_add(&mut self) {
        self.add_calls += 1;
    }

    fn record_remove_first_call(&mut self) {
        self.remove_first_calls += 1;
    }

    fn record_remove_first_empty(&mut self) {
        self.remove_first_empty += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl FifoMetricsReadRecorder for &FifoMetrics {
    fn record_first_call(&self) {
        self.first_calls.incr();
    }

    fn record_first_empty(&self) {
        self.first_empty.incr();
    }
}

//! # Metrics Trait Hierarchy
//!
//! Recording and snapshotting are split into small traits so the cache
//! policies only ever write counters, while tests and benches read copies.
//!
//! ```text
//!                       ┌─────────────────────────────┐
//!                       │     CoreMetricsRecorder     │
//!                       │  get_hit/get_miss/insert    │
//!                       │  evict/remove/clear         │
//!                       └──────────────┬──────────────┘
//!                                      │
//!               ┌──────────────────────┴──────────────────────┐
//!               ▼                                             ▼
//!        ┌──────────────┐                              ┌──────────────┐
//!        │ Lru Recorder │                              │ Lfu Recorder │
//!        └──────────────┘                              └──────────────┘
//!
//!        ┌──────────────┐        ┌──────────────────────────────┐
//!        │ Fifo Recorder│        │ MetricsSnapshotProvider<S>   │
//!        └──────────────┘        └──────────────────────────────┘
//! ```

/// Common counters for the keyed stores.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for LRU behavior (recency order).
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Read-only LRU metrics for `&self` methods.
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
}

/// Metrics for LFU behavior (frequency buckets).
pub trait LfuMetricsRecorder: CoreMetricsRecorder {
    fn record_promotion(&mut self);
    fn record_saturated_refresh(&mut self);
    fn record_eviction_batch(&mut self);
    fn record_pop_lfu_call(&mut self);
    fn record_pop_lfu_found(&mut self);
}

/// Read-only LFU metrics for `&self` methods.
pub trait LfuMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
}

/// Metrics for the FIFO queue.
pub trait FifoMetricsRecorder {
    fn record_add(&mut self);
    fn record_remove_first_call(&mut self);
    fn record_remove_first_empty(&mut self);
    fn record_clear(&mut self);
}

/// Read-only FIFO metrics for `&self` methods.
pub trait FifoMetricsReadRecorder {
    fn record_first_call(&self);
    fn record_first_empty(&self);
}

/// Produces a point-in-time copy of a structure's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

//! # Least Frequently Used (LFU) Cache
//!
//! A bounded key/value store that evicts rarely accessed entries in batches.
//!
//! Each entry carries an access counter that starts at 0 and saturates at
//! `capacity - 1`. Entries are grouped into [`FrequencyBuckets`] by that
//! counter; inside one bucket the oldest arrival (insertion or last
//! promotion) leaves first.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                              │
//!   │                                                                      │
//!   │   FxHashMap<K, SlotId> ──────────────────┐                           │
//!   │                                          ▼                           │
//!   │   FrequencyBuckets<(K, V)>                                           │
//!   │                                                                      │
//!   │     lowest_frequency ─► [0]: (d) (e)           oldest ─► newest      │
//!   │                         [1]: (b)                                     │
//!   │                         [2]:                                         │
//!   │                         [3]: (a) (c)   ◄── max_frequency             │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Batch Eviction
//!
//! Inserting a new key into a full cache first removes
//! `ceil(capacity × eviction_factor)` entries, draining the lowest-frequency
//! bucket from its oldest end and moving up as buckets empty.
//!
//! ```text
//!   capacity = 4, eviction_factor = 0.5  →  2 entries per batch
//!
//!   [0]: (x) (y)      insert(z)      [0]: (z)
//!   [1]: (a)         ──────────►     [1]: (a)
//!   [2]: (b)                         [2]: (b)
//! ```
//!
//! | Operation  | Time         | Notes                                      |
//! |------------|--------------|--------------------------------------------|
//! | `insert`   | O(1) / O(k)  | O(k) when a batch of k entries is evicted  |
//! | `get`      | O(1)         | promotes one bucket, or refreshes at cap   |
//! | `remove`   | O(1) / O(b)  | cursor rescan only if its bucket empties   |
//! | `peek`     | O(1)         | no counter change                          |
//!
//! ## Example Usage
//!
//! ```
//! use boundcache::policy::lfu::LfuCache;
//! use boundcache::traits::{CoreCache, LfuCacheTrait};
//!
//! let mut cache = LfuCache::new(4, 0.5);
//! for key in 1..=4 {
//!     cache.insert(key, key * 10);
//! }
//! cache.get(&1);
//! cache.get(&2);
//!
//! // 3 and 4 were never read: one batch removes both
//! cache.insert(5, 50);
//! assert_eq!(cache.len(), 3);
//! assert!(!cache.contains(&3));
//! assert!(!cache.contains(&4));
//! assert_eq!(cache.frequency(&1), Some(1));
//! ```
//!
//! ## Thread Safety
//!
//! `LfuCache` is not synchronized. Use
//! [`ConcurrentLfuCache`](crate::concurrent::ConcurrentLfuCache) to share it.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::ds::{FrequencyBuckets, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LfuMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LfuMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LfuMetricsReadRecorder, LfuMetricsRecorder, MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache};

/// Bounded store ordered by access frequency, evicting in batches.
pub struct LfuCache<K, V> {
    map: FxHashMap<K, SlotId>,
    buckets: FrequencyBuckets<(K, V)>,
    capacity: usize,
    eviction_factor: f64,
    batch_size: usize,
    #[cfg(feature = "metrics")]
    metrics: LfuMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache, panicking on invalid parameters.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or `eviction_factor` is not strictly
    /// between 0 and 1. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize, eviction_factor: f64) -> Self {
        match Self::try_new(capacity, eviction_factor) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache, returning an error on invalid parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero or `eviction_factor`
    /// lies outside the open interval `(0, 1)`.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::policy::lfu::LfuCache;
    ///
    /// assert!(LfuCache::<u32, u32>::try_new(8, 0.25).is_ok());
    /// assert!(LfuCache::<u32, u32>::try_new(8, 0.0).is_err());
    /// assert!(LfuCache::<u32, u32>::try_new(0, 0.5).is_err());
    /// ```
    pub fn try_new(capacity: usize, eviction_factor: f64) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("cache capacity must be greater than zero"));
        }
        if !eviction_factor.is_finite() || eviction_factor <= 0.0 || eviction_factor >= 1.0 {
            return Err(ConfigError::new(format!(
                "eviction factor must be in (0, 1), got {}",
                eviction_factor
            )));
        }

        // `while removed < capacity * factor` removes the ceiling
        let batch_size = ((capacity as f64 * eviction_factor).ceil() as usize).clamp(1, capacity);

        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FrequencyBuckets::with_capacity(capacity, capacity - 1),
            capacity,
            eviction_factor,
            batch_size,
            #[cfg(feature = "metrics")]
            metrics: LfuMetrics::default(),
        })
    }

    pub fn eviction_factor(&self) -> f64 {
        self.eviction_factor
    }

    /// Number of entries one eviction pass removes.
    pub fn eviction_batch_size(&self) -> usize {
        self.batch_size
    }

    /// Counter value at which accesses stop promoting (`capacity - 1`).
    pub fn max_frequency(&self) -> usize {
        self.buckets.max_frequency()
    }

    /// Frequency the next eviction drains from; 0 when empty.
    pub fn lowest_frequency(&self) -> usize {
        self.buckets.lowest_frequency()
    }

    /// Returns the value for `key` without counting an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let id = *self.map.get(key)?;
        let (_, value) = self.buckets.get(id)?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_found();

        Some(value)
    }

    /// Iterates entries in eviction order with their frequencies.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V, usize)> {
        self.buckets.iter().map(|(_, (k, v), freq)| (k, v, freq))
    }

    fn evict_batch(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_eviction_batch();

        let target = self.batch_size;
        let mut evicted = 0usize;
        while evicted < target {
            let Some(((key, _), _)) = self.buckets.pop_lowest() else {
                break;
            };
            self.map.remove(&key);
            evicted += 1;

            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }

        debug!(
            batch = target,
            evicted,
            lowest_frequency = self.buckets.lowest_frequency(),
            len = self.buckets.len(),
            "evicted least frequently used batch"
        );
    }

    /// Checks index/bucket agreement and the bucket structure itself.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.buckets.check_invariants()?;

        if self.map.len() != self.buckets.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but buckets hold {} entries",
                self.map.len(),
                self.buckets.len()
            )));
        }
        if self.buckets.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.buckets.len(),
                self.capacity
            )));
        }
        for (id, (key, _), _) in self.buckets.iter() {
            if self.map.get(key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "bucket entry {:?} is not indexed by its key",
                    id
                )));
            }
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Replaces the value of a present key without touching its counter;
    /// otherwise evicts a batch if full and adds the key at frequency 0.
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.map.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            return self
                .buckets
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.1, value));
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.buckets.len() >= self.capacity {
            self.evict_batch();
        }

        let id = self.buckets.insert((key.clone(), value));
        self.map.insert(key, id);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.map.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_get_hit();
            let before = self.buckets.frequency(id);
            let after = self.buckets.touch(id);
            if before == after {
                self.metrics.record_saturated_refresh();
            } else {
                self.metrics.record_promotion();
            }
        }
        #[cfg(not(feature = "metrics"))]
        self.buckets.touch(id);

        self.buckets.get(id).map(|(_, v)| v)
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.buckets.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.map.clear();
        self.buckets.clear();
    }
}

impl<K, V> MutableCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.map.remove(key)?;
        let (_, value) = self.buckets.remove(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        Some(value)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lfu_call();

        let ((key, value), _) = self.buckets.pop_lowest()?;
        self.map.remove(&key);

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lfu_found();

        Some((key, value))
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let (_, (key, value)) = self.buckets.peek_lowest()?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_found();

        Some((key, value))
    }

    fn frequency(&self, key: &K) -> Option<usize> {
        let id = *self.map.get(key)?;
        self.buckets.frequency(id)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        LfuMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            clears: self.metrics.clears,
            promotions: self.metrics.promotions,
            saturated_refreshes: self.metrics.saturated_refreshes,
            pop_lfu_calls: self.metrics.pop_lfu_calls,
            pop_lfu_found: self.metrics.pop_lfu_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            cache_len: self.buckets.len(),
            capacity: self.capacity,
            lowest_frequency: self.buckets.lowest_frequency(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LfuMetricsSnapshot> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LfuMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("len", &self.buckets.len())
            .field("capacity", &self.capacity)
            .field("eviction_factor", &self.eviction_factor)
            .field("lowest_frequency", &self.buckets.lowest_frequency())
            .finish_non_exhaustive()
    }
}

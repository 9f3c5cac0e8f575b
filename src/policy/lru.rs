//! # Least Recently Used (LRU) Cache
//!
//! A bounded key/value store that evicts the entry touched longest ago.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>  (index into the recency list)         │   │
//!   │   │                                                              │   │
//!   │   │  ┌─────────┬───────────────────────────────────────────┐     │   │
//!   │   │  │   Key   │  SlotId                                   │     │   │
//!   │   │  ├─────────┼───────────────────────────────────────────┤     │   │
//!   │   │  │  "a"    │  ──────────────────────────────────┐      │     │   │
//!   │   │  │  "b"    │  ────────────────────────────┐     │      │     │   │
//!   │   │  │  "c"    │  ──────────────────────┐     │     │      │     │   │
//!   │   │  └─────────┴────────────────────────┼─────┼─────┼──────┘     │   │
//!   │   └─────────────────────────────────────┼─────┼─────┼────────────┘   │
//!   │                                         │     │     │                │
//!   │   ┌─────────────────────────────────────┼─────┼─────┼────────────┐   │
//!   │   │  IntrusiveList<(K, V)>              ▼     ▼     ▼            │   │
//!   │   │                                                              │   │
//!   │   │  head ──► [c, 3] ◄──► [b, 2] ◄──► [a, 1] ◄── tail            │   │
//!   │   │            MRU                      LRU                      │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   INSERT new key (cache full, capacity = 3)
//!
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!
//!     insert(D):  1. evict [C] from the tail
//!                 2. push [D] at the head
//!
//!     head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   GET existing key
//!
//!     get(B):     head ──► [B] ◄──► [D] ◄──► [A] ◄── tail
//! ```
//!
//! | Operation      | Time | Notes                                  |
//! |----------------|------|----------------------------------------|
//! | `insert`       | O(1) | may evict the tail                     |
//! | `get`          | O(1) | promotes to head                       |
//! | `peek`         | O(1) | no promotion                           |
//! | `remove`       | O(1) |                                        |
//! | `recency_rank` | O(n) | walks from the head                    |
//!
//! A capacity of 0 is accepted; such a cache stores nothing.
//!
//! ## Example Usage
//!
//! ```
//! use boundcache::policy::lru::LruCache;
//! use boundcache::traits::{CoreCache, LruCacheTrait};
//!
//! let mut cache = LruCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a");
//! cache.insert("c", 3); // evicts "b"
//!
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.peek_lru(), Some((&"a", &1)));
//! assert_eq!(cache.to_string(), "c:3 a:1 ");
//! ```
//!
//! ## Thread Safety
//!
//! `LruCache` is not synchronized. Use
//! [`ConcurrentLruCache`](crate::concurrent::ConcurrentLruCache) to share it.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Bounded store ordered by recency of access.
///
/// Entries live in an [`IntrusiveList`] ordered most recent → least recent;
/// a hash index maps each key to its list node.
pub struct LruCache<K, V> {
    map: FxHashMap<K, SlotId>,
    list: IntrusiveList<(K, V)>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::policy::lru::LruCache;
    /// use boundcache::traits::CoreCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: IntrusiveList::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Returns the value for `key` without changing its recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let id = *self.map.get(key)?;
        let (_, value) = self.list.get(id)?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_found();

        Some(value)
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|(k, v)| (k, v))
    }

    fn evict_lru(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        if let Some((key, _)) = self.list.pop_back() {
            self.map.remove(&key);
            trace!(
                len = self.list.len(),
                capacity = self.capacity,
                "evicted least recently used entry"
            );

            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }
    }

    /// Checks that the index and the recency list describe the same entries.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;

        if self.map.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} entries",
                self.map.len(),
                self.list.len()
            )));
        }
        if self.list.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.list.len(),
                self.capacity
            )));
        }
        for (id, (key, _)) in self.list.iter_entries() {
            if self.map.get(key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "list node {:?} is not indexed by its key",
                    id
                )));
            }
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.map.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = self
                .list
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.1, value));
            self.list.move_to_front(id);
            return previous;
        }

        if self.capacity == 0 {
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.list.len() >= self.capacity {
            self.evict_lru();
        }

        let id = self.list.push_front((key.clone(), value));
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
        self.metrics.record_get_hit();

        self.list.move_to_front(id);
        self.list.get(id).map(|(_, v)| v)
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.map.clear();
        self.list.clear();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.map.remove(key)?;
        let (_, value) = self.list.remove(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        Some(value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let (key, value) = self.list.pop_back()?;
        self.map.remove(&key);

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some((key, value))
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let (key, value) = self.list.back()?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_found();

        Some((key, value))
    }

    fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.map.get(key) else {
            return false;
        };
        self.list.move_to_front(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        true
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        let target = *self.map.get(key)?;
        self.list.iter_entries().position(|(id, _)| id == target)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
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
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            cache_len: self.list.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

/// Renders `key:value ` for every entry, most recent first.
impl<K, V> fmt::Display for LruCache<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.list.iter() {
            write!(f, "{}:{} ", key, value)?;
        }
        Ok(())
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.list.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

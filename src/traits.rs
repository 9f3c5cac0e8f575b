//! # Cache Trait Hierarchy
//!
//! Shared contract for the keyed stores. The LRU and LFU caches implement
//! every trait here; the FIFO queue is an unkeyed sequence and stands apart.
//!
//! ```text
//!                  ┌─────────────────────────────────────┐
//!                  │          CoreCache<K, V>            │
//!                  │                                     │
//!                  │  insert(&mut, K, V) → Option<V>     │
//!                  │  get(&mut, &K) → Option<&V>         │
//!                  │  contains / len / capacity / clear  │
//!                  └──────────────────┬──────────────────┘
//!                                     │
//!                                     ▼
//!                  ┌─────────────────────────────────────┐
//!                  │         MutableCache<K, V>          │
//!                  │  remove(&K) → Option<V>             │
//!                  └──────────────────┬──────────────────┘
//!                                     │
//!                ┌────────────────────┴───────────────────┐
//!                ▼                                        ▼
//!   ┌────────────────────────────┐          ┌────────────────────────────┐
//!   │   LruCacheTrait<K, V>      │          │   LfuCacheTrait<K, V>      │
//!   │                            │          │                            │
//!   │  pop_lru() → (K, V)        │          │  pop_lfu() → (K, V)        │
//!   │  peek_lru() → (&K, &V)     │          │  peek_lfu() → (&K, &V)     │
//!   │  touch(&K) → bool          │          │  frequency(&K) → usize     │
//!   │  recency_rank(&K) → usize  │          │                            │
//!   └────────────────────────────┘          └────────────────────────────┘
//! ```
//!
//! | Policy | Eviction Basis                     | Eviction Unit          |
//! |--------|------------------------------------|------------------------|
//! | LRU    | Last access time                   | One entry (the tail)   |
//! | LFU    | Access count, oldest first on ties | `capacity × factor`    |
//!
//! ## Thread Safety
//!
//! None of the implementations synchronize internally. Wrap them in
//! [`Concurrent`](crate::concurrent::Concurrent) for shared access.

/// Core operations every keyed store supports.
///
/// # Example
///
/// ```
/// use boundcache::traits::CoreCache;
/// use boundcache::policy::lru::LruCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key existed.
    ///
    /// If the key is new and the cache is full, the policy evicts before
    /// inserting. Updating an existing key never evicts.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::traits::CoreCache;
    /// use boundcache::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// assert_eq!(cache.insert(1, "first"), None);
    /// assert_eq!(cache.insert(1, "second"), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a value by key, updating the policy's recency or frequency state.
    ///
    /// Use [`contains`](Self::contains) to test membership without
    /// affecting eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;

    /// Removes all entries.
    fn clear(&mut self);
}

/// Stores that support removal by key.
///
/// # Example
///
/// ```
/// use boundcache::traits::{CoreCache, MutableCache};
/// use boundcache::policy::lfu::LfuCache;
///
/// fn invalidate_keys<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = LfuCache::new(100, 0.25);
/// cache.insert(1, "one".to_string());
/// cache.insert(2, "two".to_string());
/// cache.insert(3, "three".to_string());
///
/// invalidate_keys(&mut cache, &[1, 3]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// assert!(!cache.contains(&3));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a key, returning its value. Absent keys return `None`.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes several keys, returning results in input order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LRU-specific operations over the recency order.
///
/// # Example
///
/// ```
/// use boundcache::traits::{CoreCache, LruCacheTrait};
/// use boundcache::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(3);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.insert(3, "third");
///
/// cache.get(&1);
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// assert!(cache.touch(&2));
/// assert_eq!(cache.pop_lru(), Some((3, "third")));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without reordering.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry most recently used; returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position in the recency order: 0 is most recent. O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// LFU-specific operations over the frequency buckets.
///
/// # Example
///
/// ```
/// use boundcache::traits::{CoreCache, LfuCacheTrait};
/// use boundcache::policy::lfu::LfuCache;
///
/// let mut cache = LfuCache::new(10, 0.5);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.get(&2);
///
/// assert_eq!(cache.frequency(&2), Some(1));
/// assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some(1));
/// assert_eq!(cache.pop_lfu(), Some((1, "first")));
/// ```
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the oldest entry of the lowest frequency.
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Returns the next eviction candidate without changing any counter.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Returns the access count recorded for `key` (0 right after insertion).
    fn frequency(&self, key: &K) -> Option<usize>;
}

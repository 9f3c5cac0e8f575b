//! Coarse-grained thread-safe wrapper.
//!
//! [`Concurrent<C>`] puts any structure from [`policy`](crate::policy) behind
//! one `Arc<parking_lot::RwLock<C>>`. Calls that change state or access order
//! take the write lock; pure observers take the read lock.
//!
//! ```text
//!   Concurrent<C>  (Clone = another handle to the same cache)
//!   ┌────────────────────────────────────────────────┐
//!   │  Arc<RwLock<C>>                                │
//!   │                                                │
//!   │   write: insert, get, remove, clear, touch     │
//!   │   read:  len, is_empty, contains, capacity,    │
//!   │          peek                                  │
//!   └────────────────────────────────────────────────┘
//! ```
//!
//! `get` promotes entries, so it needs exclusive access and returns an owned
//! clone of the value rather than a borrow into the guarded structure.
//!
//! ## Example
//!
//! ```
//! use std::thread;
//!
//! use boundcache::concurrent::{Concurrent, ConcurrentLruCache};
//! use boundcache::policy::lru::LruCache;
//!
//! let cache: ConcurrentLruCache<u32, String> = Concurrent::new(LruCache::new(64));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = cache.clone();
//!         thread::spawn(move || {
//!             for i in 0..8 {
//!                 cache.insert(t * 8 + i, format!("v{}", i));
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 32);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::EmptyQueueError;
use crate::policy::fifo::FifoQueue;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::traits::{CoreCache, MutableCache};

/// Shared handle to a structure guarded by one reader-writer lock.
pub struct Concurrent<C> {
    inner: Arc<RwLock<C>>,
}

pub type ConcurrentLruCache<K, V> = Concurrent<LruCache<K, V>>;
pub type ConcurrentLfuCache<K, V> = Concurrent<LfuCache<K, V>>;
pub type ConcurrentFifoQueue<T> = Concurrent<FifoQueue<T>>;

impl<C> Concurrent<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    /// Runs `f` under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Runs `f` under the write lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Returns the wrapped structure if this is the last handle.
    pub fn try_unwrap(self) -> Result<C, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

// Keyed operations shared by every `CoreCache`.
impl<C> Concurrent<C> {
    pub fn insert<K, V>(&self, key: K, value: V) -> Option<V>
    where
        C: CoreCache<K, V>,
    {
        self.inner.write().insert(key, value)
    }

    /// Looks up `key`, recording the access, and clones the value out.
    pub fn get<K, V>(&self, key: &K) -> Option<V>
    where
        C: CoreCache<K, V>,
        V: Clone,
    {
        self.inner.write().get(key).cloned()
    }

    pub fn remove<K, V>(&self, key: &K) -> Option<V>
    where
        C: MutableCache<K, V>,
    {
        self.inner.write().remove(key)
    }

    pub fn contains<K, V>(&self, key: &K) -> bool
    where
        C: CoreCache<K, V>,
    {
        self.inner.read().contains(key)
    }

    pub fn len<K, V>(&self) -> usize
    where
        C: CoreCache<K, V>,
    {
        self.inner.read().len()
    }

    pub fn is_empty<K, V>(&self) -> bool
    where
        C: CoreCache<K, V>,
    {
        self.inner.read().is_empty()
    }

    pub fn capacity<K, V>(&self) -> usize
    where
        C: CoreCache<K, V>,
    {
        self.inner.read().capacity()
    }

    pub fn clear<K, V>(&self)
    where
        C: CoreCache<K, V>,
    {
        self.inner.write().clear()
    }
}

impl<K, V> Concurrent<LruCache<K, V>>
where
    K: Eq + std::hash::Hash + Clone,
    V: Clone,
{
    /// Clones the value for `key` out under the read lock, without promotion.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.read().peek(key).cloned()
    }
}

impl<K, V> Concurrent<LfuCache<K, V>>
where
    K: Eq + std::hash::Hash + Clone,
    V: Clone,
{
    /// Clones the value for `key` out under the read lock, without counting an access.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.read().peek(key).cloned()
    }
}

impl<T> Concurrent<FifoQueue<T>> {
    pub fn add(&self, item: T) {
        self.inner.write().add(item)
    }

    pub fn remove_first(&self) -> Result<T, EmptyQueueError> {
        self.inner.write().remove_first()
    }

    pub fn first(&self) -> Result<T, EmptyQueueError>
    where
        T: Clone,
    {
        self.inner.read().first().cloned()
    }

    pub fn max_size(&self) -> usize {
        self.inner.read().max_size()
    }
}

impl<C> Clone for Concurrent<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> From<C> for Concurrent<C> {
    fn from(inner: C) -> Self {
        Self::new(inner)
    }
}

impl<C: fmt::Debug> fmt::Debug for Concurrent<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.inner.read();
        f.debug_tuple("Concurrent").field(&*guard).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::traits::LfuCacheTrait;

    #[test]
    fn handles_share_one_cache() {
        let cache: ConcurrentLruCache<u32, &str> = Concurrent::new(LruCache::new(2));
        let other = cache.clone();
        cache.insert(1, "a");
        assert_eq!(other.get(&1), Some("a"));
        assert!(other.contains(&1));
        assert_eq!(other.capacity(), 2);
    }

    #[test]
    fn peek_leaves_frequency_alone() {
        let cache: ConcurrentLfuCache<u32, u32> = Concurrent::new(LfuCache::new(4, 0.5));
        cache.insert(1, 10);
        assert_eq!(cache.peek(&1), Some(10));
        assert_eq!(cache.read(|inner| inner.frequency(&1)), Some(0));
        assert_eq!(cache.get(&1), Some(10));
        assert_eq!(cache.read(|inner| inner.frequency(&1)), Some(1));
    }

    #[test]
    fn fifo_queue_behind_lock() {
        let queue: ConcurrentFifoQueue<u8> = FifoQueue::new().into();
        queue.add(1);
        queue.add(2);
        assert_eq!(queue.first(), Ok(1));
        assert_eq!(queue.remove_first(), Ok(1));
        assert_eq!(queue.max_size(), 2);
        assert_eq!(queue.read(|q| q.len()), 1);
    }

    #[test]
    fn concurrent_writers_respect_capacity() {
        let cache: ConcurrentLruCache<u64, u64> = Concurrent::new(LruCache::new(50));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..200 {
                        let key = t * 1000 + i;
                        cache.insert(key, i);
                        cache.get(&key);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 50);
        cache.read(|inner| inner.check_invariants()).unwrap();
    }

    #[test]
    fn try_unwrap_returns_inner_for_last_handle() {
        let cache: ConcurrentLruCache<u8, u8> = Concurrent::new(LruCache::new(1));
        let other = cache.clone();
        let cache = cache.try_unwrap().unwrap_err();
        drop(other);
        let inner = cache.try_unwrap().unwrap();
        assert_eq!(inner.capacity(), 1);
    }
}

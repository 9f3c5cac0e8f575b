//! Unified cache builder for the keyed eviction policies.
//!
//! Validates construction parameters once and hands back a [`Cache`] that
//! forwards the common operations to whichever policy was chosen.
//!
//! ## Example
//!
//! ```rust
//! use boundcache::builder::{CacheBuilder, CachePolicy};
//!
//! let mut cache = CacheBuilder::new(100)
//!     .eviction_factor(0.5)
//!     .build::<u64, String>(CachePolicy::Lfu);
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::traits::{CoreCache, MutableCache};

/// Fraction of an LFU cache's capacity evicted per batch unless overridden.
pub const DEFAULT_EVICTION_FACTOR: f64 = 0.25;

/// Available keyed eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
    /// Least Frequently Used eviction, in batches sized by the eviction factor.
    Lfu,
}

/// Cache wrapper that offers one API regardless of policy.
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V> {
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Insert a key-value pair. Returns the previous value if the key existed.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.insert(key, value),
            CacheInner::Lfu(lfu) => lfu.insert(key, value),
        }
    }

    /// Get a reference to a value by key, recording the access.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.get(key),
            CacheInner::Lfu(lfu) => lfu.get(key),
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.remove(key),
            CacheInner::Lfu(lfu) => lfu.remove(key),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(key),
            CacheInner::Lfu(lfu) => lfu.contains(key),
        }
    }

    pub fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::Lfu(lfu) => lfu.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.capacity(),
            CacheInner::Lfu(lfu) => lfu.capacity(),
        }
    }

    pub fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::Lfu(lfu) => lfu.clear(),
        }
    }

    /// The policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Lfu(_) => CachePolicy::Lfu,
        }
    }
}

impl<K, V> std::fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            CacheInner::Lru(lru) => f.debug_tuple("Cache").field(lru).finish(),
            CacheInner::Lfu(lfu) => f.debug_tuple("Cache").field(lfu).finish(),
        }
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
    eviction_factor: f64,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            eviction_factor: DEFAULT_EVICTION_FACTOR,
        }
    }

    /// Fraction of capacity an LFU cache evicts per batch. Ignored by LRU.
    pub fn eviction_factor(mut self, factor: f64) -> Self {
        self.eviction_factor = factor;
        self
    }

    /// Build a cache with the specified policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an LFU cache with zero capacity or an
    /// eviction factor outside `(0, 1)`. An LRU cache accepts any capacity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use boundcache::builder::{CacheBuilder, CachePolicy};
    ///
    /// let lru = CacheBuilder::new(0).try_build::<u64, String>(CachePolicy::Lru);
    /// assert!(lru.is_ok());
    ///
    /// let lfu = CacheBuilder::new(10)
    ///     .eviction_factor(1.0)
    ///     .try_build::<u64, String>(CachePolicy::Lfu);
    /// assert!(lfu.is_err());
    /// ```
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(LruCache::new(self.capacity)),
            CachePolicy::Lfu => {
                CacheInner::Lfu(LfuCache::try_new(self.capacity, self.eviction_factor)?)
            },
        };

        Ok(Cache { inner })
    }

    /// Build a cache with the specified policy.
    ///
    /// # Panics
    ///
    /// Panics if the parameters are invalid. See [`try_build`](Self::try_build).
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }
}

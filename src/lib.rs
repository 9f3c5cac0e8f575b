//! boundcache: bounded in-memory stores with FIFO, LRU and LFU eviction.
//!
//! | Structure                         | Eviction                               |
//! |-----------------------------------|----------------------------------------|
//! | [`FifoQueue`](policy::fifo)       | none; tracks its peak size             |
//! | [`LruCache`](policy::lru)         | least recently used, one entry         |
//! | [`LfuCache`](policy::lfu)         | least frequently used, in batches      |
//!
//! The algorithms are single-threaded; [`concurrent::Concurrent`] adds one
//! coarse reader-writer lock around any of them.
//!
//! ```
//! use boundcache::prelude::*;
//!
//! let mut lru = LruCache::new(2);
//! lru.insert("a", 1);
//! lru.insert("b", 2);
//! lru.get(&"a");
//! lru.insert("c", 3);
//! assert!(!lru.contains(&"b"));
//! ```

pub mod builder;
#[cfg(feature = "concurrency")]
pub mod concurrent;
pub mod ds;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod traits;

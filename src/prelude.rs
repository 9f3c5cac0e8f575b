pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
#[cfg(feature = "concurrency")]
pub use crate::concurrent::{
    Concurrent, ConcurrentFifoQueue, ConcurrentLfuCache, ConcurrentLruCache,
};
pub use crate::ds::{FrequencyBuckets, IntrusiveList, SlotArena, SlotId};
pub use crate::error::{ConfigError, EmptyQueueError, InvariantError, TypeMismatchError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{FifoMetricsSnapshot, LfuMetricsSnapshot, LruMetricsSnapshot};
pub use crate::policy::fifo::FifoQueue;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::traits::{CoreCache, LfuCacheTrait, LruCacheTrait, MutableCache};

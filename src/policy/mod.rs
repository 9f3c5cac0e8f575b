//! Eviction policies.
//!
//! | Module   | Structure          | Evicts                                    |
//! |----------|--------------------|-------------------------------------------|
//! | [`fifo`] | `FifoQueue<T>`     | nothing; items leave via `remove_first`   |
//! | [`lru`]  | `LruCache<K, V>`   | the least recently used entry             |
//! | [`lfu`]  | `LfuCache<K, V>`   | a batch of the least frequently used      |

pub mod fifo;
pub mod lfu;
pub mod lru;

//! Error types for the boundcache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (zero capacity, eviction factor outside `(0, 1)`).
//! - [`EmptyQueueError`]: Returned when the head of an empty
//!   [`FifoQueue`](crate::policy::fifo::FifoQueue) is read or removed.
//! - [`TypeMismatchError`]: Returned when a queue is compared against a value
//!   of another type through [`FifoQueue::eq_any`](crate::policy::fifo::FifoQueue::eq_any).
//! - [`InvariantError`]: Returned by `check_invariants` methods when internal
//!   bookkeeping is inconsistent.
//!
//! ## Example Usage
//!
//! ```
//! use boundcache::error::ConfigError;
//! use boundcache::policy::lfu::LfuCache;
//!
//! let cache: Result<LfuCache<String, i32>, ConfigError> = LfuCache::try_new(100, 0.25);
//! assert!(cache.is_ok());
//!
//! // Eviction factor must lie strictly between 0 and 1
//! let bad = LfuCache::<String, i32>::try_new(100, 1.0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` methods on the data structures and caches
/// (e.g. [`LfuCache::check_invariants`](crate::policy::lfu::LfuCache::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LfuCache::try_new`](crate::policy::lfu::LfuCache::try_new) and
/// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use boundcache::policy::lfu::LfuCache;
///
/// let err = LfuCache::<u64, u64>::try_new(8, 0.0).unwrap_err();
/// assert!(err.to_string().contains("eviction factor"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// EmptyQueueError
// ---------------------------------------------------------------------------

/// Error returned when the head of an empty FIFO queue is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmptyQueueError;

impl fmt::Display for EmptyQueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the FIFO queue is empty")
    }
}

impl std::error::Error for EmptyQueueError {}

// ---------------------------------------------------------------------------
// TypeMismatchError
// ---------------------------------------------------------------------------

/// Error returned when a dynamic comparison receives a value of the wrong type.
///
/// Carries the name of the type that was expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMismatchError {
    expected: &'static str,
}

impl TypeMismatchError {
    /// Creates a new `TypeMismatchError` naming the expected type.
    #[inline]
    pub fn new(expected: &'static str) -> Self {
        Self { expected }
    }

    /// Returns the name of the expected type.
    #[inline]
    pub fn expected(&self) -> &'static str {
        self.expected
    }
}

impl fmt::Display for TypeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected a value of type {}", self.expected)
    }
}

impl std::error::Error for TypeMismatchError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

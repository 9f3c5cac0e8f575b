//! # Bounded FIFO Queue
//!
//! An insertion-ordered sequence with no keyed lookup. Items leave only
//! through [`FifoQueue::remove_first`]; nothing is evicted. The queue
//! remembers the largest size it has ever reached.
//!
//! ```text
//!   add(a), add(b), add(c)
//!
//!   head ──► [a] [b] [c] ◄── tail        len = 3, max_size = 3
//!
//!   remove_first() -> a
//!
//!   head ──► [b] [c] ◄── tail            len = 2, max_size = 3
//! ```
//!
//! | Operation      | Time | Notes                               |
//! |----------------|------|-------------------------------------|
//! | `add`          | O(1) | amortized, updates `max_size`       |
//! | `first`        | O(1) | `EmptyQueueError` when empty        |
//! | `remove_first` | O(1) | `EmptyQueueError` when empty        |
//! | `eq`           | O(n) | pairwise, in order                  |
//!
//! Absent elements are expressed through the element type: a
//! `FifoQueue<Option<T>>` holds `None` entries, and `None` equals only `None`.
//!
//! ## Example Usage
//!
//! ```
//! use boundcache::policy::fifo::FifoQueue;
//!
//! let mut queue = FifoQueue::new();
//! queue.add("a");
//! queue.add("b");
//!
//! assert_eq!(queue.first(), Ok(&"a"));
//! assert_eq!(queue.remove_first(), Ok("a"));
//! assert_eq!(queue.to_string(), "Queue: (b) ");
//! assert_eq!(queue.max_size(), 2);
//! ```

use std::any::{Any, type_name};
use std::collections::VecDeque;
use std::fmt;

use crate::error::{EmptyQueueError, InvariantError, TypeMismatchError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::FifoMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::FifoMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    FifoMetricsReadRecorder, FifoMetricsRecorder, MetricsSnapshotProvider,
};

/// Insertion-ordered queue that tracks its peak size.
pub struct FifoQueue<T> {
    items: VecDeque<T>,
    max_size: usize,
    #[cfg(feature = "metrics")]
    metrics: FifoMetrics,
}

impl<T> FifoQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty queue with room for `capacity` items before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            max_size: 0,
            #[cfg(feature = "metrics")]
            metrics: FifoMetrics::default(),
        }
    }

    /// Appends `item` at the tail. Never fails and never evicts.
    pub fn add(&mut self, item: T) {
        #[cfg(feature = "metrics")]
        self.metrics.record_add();

        self.items.push_back(item);
        if self.items.len() > self.max_size {
            self.max_size = self.items.len();
        }
    }

    /// Returns the head without removing it.
    pub fn first(&self) -> Result<&T, EmptyQueueError> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_first_call();

        match self.items.front() {
            Some(item) => Ok(item),
            None => {
                #[cfg(feature = "metrics")]
                (&self.metrics).record_first_empty();
                Err(EmptyQueueError)
            },
        }
    }

    /// Removes and returns the head.
    pub fn remove_first(&mut self) -> Result<T, EmptyQueueError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_first_call();

        match self.items.pop_front() {
            Some(item) => Ok(item),
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_remove_first_empty();
                Err(EmptyQueueError)
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Largest number of items held at once since construction.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Iterates items from head to tail.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }

    /// Removes every item. `max_size` keeps its value.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.items.clear();
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.items.len() > self.max_size {
            return Err(InvariantError::new(format!(
                "queue holds {} items but max_size is {}",
                self.items.len(),
                self.max_size
            )));
        }
        Ok(())
    }
}

impl<T: PartialEq + 'static> FifoQueue<T> {
    /// Compares against a value of unknown type.
    ///
    /// Returns [`TypeMismatchError`] when `other` is not a `FifoQueue<T>`.
    ///
    /// ```
    /// use boundcache::policy::fifo::FifoQueue;
    ///
    /// let queue: FifoQueue<u32> = [1, 2].into_iter().collect();
    /// let same: FifoQueue<u32> = [1, 2].into_iter().collect();
    ///
    /// assert_eq!(queue.eq_any(&same), Ok(true));
    /// assert!(queue.eq_any(&"not a queue").is_err());
    /// ```
    pub fn eq_any(&self, other: &dyn Any) -> Result<bool, TypeMismatchError> {
        match other.downcast_ref::<FifoQueue<T>>() {
            Some(other) => Ok(self == other),
            None => Err(TypeMismatchError::new(type_name::<FifoQueue<T>>())),
        }
    }
}

#[cfg(feature = "metrics")]
impl<T> FifoQueue<T> {
    pub fn metrics_snapshot(&self) -> FifoMetricsSnapshot {
        FifoMetricsSnapshot {
            add_calls: self.metrics.add_calls,
            first_calls: self.metrics.first_calls.get(),
            first_empty: self.metrics.first_empty.get(),
            remove_first_calls: self.metrics.remove_first_calls,
            remove_first_empty: self.metrics.remove_first_empty,
            clears: self.metrics.clears,
            len: self.items.len(),
            max_size: self.max_size,
        }
    }
}

#[cfg(feature = "metrics")]
impl<T> MetricsSnapshotProvider<FifoMetricsSnapshot> for FifoQueue<T> {
    fn snapshot(&self) -> FifoMetricsSnapshot {
        self.metrics_snapshot()
    }
}

// Equality looks at contents only; `max_size` is history, not state.
impl<T: PartialEq> PartialEq for FifoQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self.items.iter().zip(other.items.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for FifoQueue<T> {}

impl<T: fmt::Display> fmt::Display for FifoQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Queue: ")?;
        for item in &self.items {
            write!(f, "({}) ", item)?;
        }
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for FifoQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FifoQueue")
            .field("items", &self.items)
            .field("max_size", &self.max_size)
            .finish_non_exhaustive()
    }
}

impl<T: Clone> Clone for FifoQueue<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            max_size: self.max_size,
            #[cfg(feature = "metrics")]
            metrics: FifoMetrics::default(),
        }
    }
}

impl<T> Default for FifoQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for FifoQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T> FromIterator<T> for FifoQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<'a, T> IntoIterator for &'a FifoQueue<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod basic_behavior {
        use super::*;

        #[test]
        fn new_queue_is_empty() {
            let queue: FifoQueue<i32> = FifoQueue::new();
            assert!(queue.is_empty());
            assert_eq!(queue.len(), 0);
            assert_eq!(queue.max_size(), 0);
            assert_eq!(queue.first(), Err(EmptyQueueError));
        }

        #[test]
        fn items_leave_in_insertion_order() {
            let mut queue = FifoQueue::new();
            queue.add(1);
            queue.add(2);
            queue.add(3);
            assert_eq!(queue.first(), Ok(&1));
            assert_eq!(queue.remove_first(), Ok(1));
            assert_eq!(queue.remove_first(), Ok(2));
            assert_eq!(queue.remove_first(), Ok(3));
            assert_eq!(queue.remove_first(), Err(EmptyQueueError));
            queue.check_invariants().unwrap();
        }

        #[test]
        fn first_does_not_remove() {
            let mut queue = FifoQueue::new();
            queue.add("x");
            assert_eq!(queue.first(), Ok(&"x"));
            assert_eq!(queue.first(), Ok(&"x"));
            assert_eq!(queue.len(), 1);
        }

        #[test]
        fn none_elements_are_stored() {
            let mut queue: FifoQueue<Option<u8>> = FifoQueue::new();
            queue.add(None);
            queue.add(Some(1));
            assert_eq!(queue.remove_first(), Ok(None));
            assert_eq!(queue.remove_first(), Ok(Some(1)));
        }
    }

    mod max_size {
        use super::*;

        #[test]
        fn tracks_peak_across_removals() {
            let mut queue = FifoQueue::new();
            queue.add('a');
            queue.add('b');
            queue.remove_first().unwrap();
            queue.add('c');
            queue.add('d');
            queue.add('e');
            assert_eq!(queue.len(), 4);
            assert_eq!(queue.max_size(), 4);

            let mut other = FifoQueue::new();
            other.add(1);
            other.add(2);
            other.remove_first().unwrap();
            other.add(3);
            other.add(4);
            assert_eq!(other.max_size(), 3);
        }

        #[test]
        fn clear_keeps_peak() {
            let mut queue: FifoQueue<u32> = (0..5).collect();
            queue.clear();
            assert!(queue.is_empty());
            assert_eq!(queue.max_size(), 5);
            queue.add(9);
            assert_eq!(queue.max_size(), 5);
            queue.check_invariants().unwrap();
        }
    }

    mod equality {
        use super::*;

        #[test]
        fn equal_contents_compare_equal() {
            let a: FifoQueue<i32> = [1, 2, 3].into_iter().collect();
            let mut b = FifoQueue::new();
            b.add(0);
            b.extend([1, 2, 3]);
            b.remove_first().unwrap();
            assert_eq!(a, b);
        }

        #[test]
        fn order_and_length_matter() {
            let a: FifoQueue<i32> = [1, 2].into_iter().collect();
            let b: FifoQueue<i32> = [2, 1].into_iter().collect();
            let c: FifoQueue<i32> = [1, 2, 3].into_iter().collect();
            assert_ne!(a, b);
            assert_ne!(a, c);
        }

        #[test]
        fn none_matches_only_none() {
            let a: FifoQueue<Option<i32>> = [None, Some(1)].into_iter().collect();
            let b: FifoQueue<Option<i32>> = [None, Some(1)].into_iter().collect();
            let c: FifoQueue<Option<i32>> = [Some(0), Some(1)].into_iter().collect();
            assert_eq!(a, b);
            assert_ne!(a, c);
        }

        #[test]
        fn eq_any_rejects_other_types() {
            let queue: FifoQueue<i32> = [1].into_iter().collect();
            let other_elem: FifoQueue<i64> = [1].into_iter().collect();

            let err = queue.eq_any(&other_elem).unwrap_err();
            assert!(err.expected().contains("FifoQueue"));
            assert!(queue.eq_any(&vec![1]).is_err());

            let same: FifoQueue<i32> = [1].into_iter().collect();
            assert_eq!(queue.eq_any(&same), Ok(true));
            let different: FifoQueue<i32> = [2].into_iter().collect();
            assert_eq!(queue.eq_any(&different), Ok(false));
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn display_lists_items_head_first() {
            let queue: FifoQueue<i32> = [1, 2, 3].into_iter().collect();
            assert_eq!(queue.to_string(), "Queue: (1) (2) (3) ");
        }

        #[test]
        fn display_of_empty_queue_is_prefix_only() {
            let queue: FifoQueue<i32> = FifoQueue::new();
            assert_eq!(queue.to_string(), "Queue: ");
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(u8),
            RemoveFirst,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![any::<u8>().prop_map(Op::Add), Just(Op::RemoveFirst)]
        }

        proptest! {
            #[test]
            fn matches_vecdeque_model(ops in prop::collection::vec(op(), 0..200)) {
                let mut queue = FifoQueue::new();
                let mut model = VecDeque::new();
                let mut peak = 0usize;

                for op in ops {
                    match op {
                        Op::Add(v) => {
                            queue.add(v);
                            model.push_back(v);
                            peak = peak.max(model.len());
                        },
                        Op::RemoveFirst => {
                            prop_assert_eq!(queue.remove_first().ok(), model.pop_front());
                        },
                    }
                    prop_assert_eq!(queue.len(), model.len());
                    prop_assert_eq!(queue.max_size(), peak);
                    prop_assert!(queue.check_invariants().is_ok());
                }
                prop_assert!(queue.iter().eq(model.iter()));
            }
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn counts_empty_reads() {
            let mut queue: FifoQueue<u8> = FifoQueue::new();
            let _ = queue.first();
            let _ = queue.remove_first();
            queue.add(1);
            let _ = queue.first();

            let snap = queue.metrics_snapshot();
            assert_eq!(snap.add_calls, 1);
            assert_eq!(snap.first_calls, 2);
            assert_eq!(snap.first_empty, 1);
            assert_eq!(snap.remove_first_calls, 1);
            assert_eq!(snap.remove_first_empty, 1);
            assert_eq!(snap.max_size, 1);
        }
    }
}

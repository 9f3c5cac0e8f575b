//! Frequency-stratified buckets for LFU tracking.
//!
//! Every entry carries an access count and lives in the bucket whose index
//! equals that count. Inside a bucket entries are kept oldest → newest, where
//! "newest" means most recently inserted or promoted, so ties at one frequency
//! resolve oldest-first. A `lowest_frequency` cursor names the bucket the next
//! eviction drains from.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │                     FrequencyBuckets<T> Layout                        │
//! │                                                                       │
//! │   entries: SlotArena<Entry<T>>                                        │
//! │   ┌──────┬──────────────────────────────────┐                         │
//! │   │ Slot │ Entry { freq, prev, next, value } │                        │
//! │   ├──────┼──────────────────────────────────┤                         │
//! │   │ id_0 │ freq:1                           │                         │
//! │   │ id_1 │ freq:0                           │                         │
//! │   │ id_2 │ freq:0                           │                         │
//! │   └──────┴──────────────────────────────────┘                         │
//! │                                                                       │
//! │   buckets: Vec<Bucket>   (index == frequency, grown on demand)        │
//! │                                                                       │
//! │   lowest_frequency = 0                                                │
//! │        │                                                              │
//! │        ▼                                                              │
//! │   [0]: head ──► [id_1] ◄──► [id_2] ◄── tail                           │
//! │              oldest (evict first)   newest                            │
//! │   [1]: head ──► [id_0] ◄── tail                                       │
//! │   ...                                                                 │
//! │   [max_frequency]   (hits here re-append at the tail)                 │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation     | Time | Notes                                           |
//! |---------------|------|-------------------------------------------------|
//! | `insert`      | O(1) | New entry at frequency 0, cursor reset to 0     |
//! | `touch`       | O(1) | Promote one bucket, or refresh at the cap       |
//! | `remove`      | O(b) | Cursor rescan only when its bucket empties      |
//! | `pop_lowest`  | O(b) | Oldest entry of the lowest bucket               |
//! | `frequency`   | O(1) |                                                 |
//!
//! `b` is the number of allocated buckets, bounded by `max_frequency + 1`.
//!
//! ## Example Usage
//!
//! ```
//! use boundcache::ds::FrequencyBuckets;
//!
//! let mut buckets = FrequencyBuckets::new(3);
//! let a = buckets.insert("page_a");
//! let _b = buckets.insert("page_b");
//!
//! buckets.touch(a); // page_a: 0 -> 1
//! assert_eq!(buckets.frequency(a), Some(1));
//!
//! // page_b is alone in the lowest bucket
//! assert_eq!(buckets.pop_lowest(), Some(("page_b", 0)));
//! assert_eq!(buckets.lowest_frequency(), 1);
//! ```

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Entry<T> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    freq: usize,
    value: T,
}

/// One frequency level. `head` is the oldest member, `tail` the newest.
#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

/// Entries grouped by access frequency with a lowest-frequency cursor.
#[derive(Debug)]
pub struct FrequencyBuckets<T> {
    entries: SlotArena<Entry<T>>,
    buckets: Vec<Bucket>,
    lowest: usize,
    max_frequency: usize,
}

impl<T> FrequencyBuckets<T> {
    /// Creates an empty set of buckets whose counters saturate at `max_frequency`.
    pub fn new(max_frequency: usize) -> Self {
        Self::with_capacity(0, max_frequency)
    }

    /// Creates empty buckets with room for `capacity` entries.
    pub fn with_capacity(capacity: usize, max_frequency: usize) -> Self {
        Self {
            entries: SlotArena::with_capacity(capacity),
            buckets: vec![Bucket::default()],
            lowest: 0,
            max_frequency,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_frequency(&self) -> usize {
        self.max_frequency
    }

    /// Frequency of the bucket the next eviction drains from (0 when empty).
    pub fn lowest_frequency(&self) -> usize {
        self.lowest
    }

    /// Number of entries currently at frequency `freq`.
    pub fn bucket_len(&self, freq: usize) -> usize {
        self.buckets.get(freq).map_or(0, |bucket| bucket.len)
    }

    /// Number of bucket slots allocated so far.
    pub fn allocated_buckets(&self) -> usize {
        self.buckets.len()
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.entries.contains(id)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.entries.get(id).map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.entries.get_mut(id).map(|entry| &mut entry.value)
    }

    pub fn frequency(&self, id: SlotId) -> Option<usize> {
        self.entries.get(id).map(|entry| entry.freq)
    }

    /// Adds `value` at frequency 0 as the newest member of bucket 0.
    ///
    /// The cursor moves to 0: a fresh entry is always in the next eviction class.
    pub fn insert(&mut self, value: T) -> SlotId {
        let id = self.entries.insert(Entry {
            prev: None,
            next: None,
            freq: 0,
            value,
        });
        self.link_back(0, id);
        self.lowest = 0;
        id
    }

    /// Records one access to `id` and returns its frequency afterwards.
    ///
    /// Below the cap the entry moves to the next bucket. At the cap it is
    /// re-appended to the newest end of its own bucket instead.
    pub fn touch(&mut self, id: SlotId) -> Option<usize> {
        let freq = self.entries.get(id)?.freq;
        self.unlink(freq, id);

        if freq < self.max_frequency {
            let next = freq + 1;
            self.ensure_bucket(next);
            self.link_back(next, id);
            if let Some(entry) = self.entries.get_mut(id) {
                entry.freq = next;
            }
            if self.lowest == freq && self.buckets[freq].len == 0 {
                self.lowest = next;
            }
            Some(next)
        } else {
            self.link_back(freq, id);
            Some(freq)
        }
    }

    /// Drops `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let freq = self.entries.get(id)?.freq;
        self.unlink(freq, id);
        let entry = self.entries.remove(id)?;
        if self.lowest == freq && self.buckets[freq].len == 0 {
            self.advance_lowest();
        }
        Some(entry.value)
    }

    /// Returns the entry the next [`pop_lowest`](Self::pop_lowest) would remove.
    pub fn peek_lowest(&self) -> Option<(SlotId, &T)> {
        let id = self.buckets.get(self.lowest)?.head?;
        self.entries.get(id).map(|entry| (id, &entry.value))
    }

    /// Removes the oldest entry of the lowest-frequency bucket.
    ///
    /// # Panics
    ///
    /// Panics if entries remain but the cursor names an empty bucket. That
    /// state is unreachable through this API and means the bucket
    /// bookkeeping is corrupt.
    pub fn pop_lowest(&mut self) -> Option<(T, usize)> {
        if self.entries.is_empty() {
            return None;
        }
        let lowest = self.lowest;
        let Some(id) = self.buckets.get(lowest).and_then(|bucket| bucket.head) else {
            panic!(
                "lowest frequency bucket {} is empty while {} entries remain",
                lowest,
                self.entries.len()
            );
        };
        self.unlink(lowest, id);
        let entry = self.entries.remove(id)?;
        if self.buckets[lowest].len == 0 {
            self.advance_lowest();
        }
        Some((entry.value, entry.freq))
    }

    /// Iterates the members of bucket `freq` from oldest to newest.
    pub fn iter_bucket(&self, freq: usize) -> BucketIter<'_, T> {
        BucketIter {
            entries: &self.entries,
            current: self.buckets.get(freq).and_then(|bucket| bucket.head),
        }
    }

    /// Iterates every entry in eviction order: ascending frequency, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T, usize)> {
        (0..self.buckets.len()).flat_map(move |freq| {
            self.iter_bucket(freq).map(move |(id, value)| (id, value, freq))
        })
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.buckets.truncate(1);
        self.buckets[0] = Bucket::default();
        self.lowest = 0;
    }

    fn ensure_bucket(&mut self, freq: usize) {
        if self.buckets.len() <= freq {
            self.buckets.resize(freq + 1, Bucket::default());
        }
    }

    // Scan forward to the next non-empty bucket, wrapping to 0 when all are empty.
    fn advance_lowest(&mut self) {
        while self.lowest < self.buckets.len() && self.buckets[self.lowest].len == 0 {
            self.lowest += 1;
        }
        if self.lowest >= self.buckets.len() {
            self.lowest = 0;
        }
    }

    fn link_back(&mut self, freq: usize, id: SlotId) {
        let old_tail = self.buckets[freq].tail;
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = old_tail;
            entry.next = None;
        }
        match old_tail.and_then(|t| self.entries.get_mut(t)) {
            Some(tail) => tail.next = Some(id),
            None => self.buckets[freq].head = Some(id),
        }
        let bucket = &mut self.buckets[freq];
        bucket.tail = Some(id);
        bucket.len += 1;
    }

    fn unlink(&mut self, freq: usize, id: SlotId) {
        let (prev, next) = match self.entries.get_mut(id) {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };
        match prev.and_then(|p| self.entries.get_mut(p)) {
            Some(prev_entry) => prev_entry.next = next,
            None => self.buckets[freq].head = next,
        }
        match next.and_then(|n| self.entries.get_mut(n)) {
            Some(next_entry) => next_entry.prev = prev,
            None => self.buckets[freq].tail = prev,
        }
        let bucket = &mut self.buckets[freq];
        bucket.len = bucket.len.saturating_sub(1);
    }

    /// Checks bucket links, stored frequencies and the lowest-frequency cursor.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.buckets.len() > self.max_frequency + 1 {
            return Err(InvariantError::new(format!(
                "{} buckets allocated beyond max frequency {}",
                self.buckets.len(),
                self.max_frequency
            )));
        }

        let mut total = 0usize;
        for (freq, bucket) in self.buckets.iter().enumerate() {
            let mut count = 0usize;
            let mut prev = None;
            let mut current = bucket.head;
            while let Some(id) = current {
                let entry = self.entries.get(id).ok_or_else(|| {
                    InvariantError::new(format!("bucket {} links to freed slot {:?}", freq, id))
                })?;
                if entry.freq != freq {
                    return Err(InvariantError::new(format!(
                        "entry {:?} has frequency {} but sits in bucket {}",
                        id, entry.freq, freq
                    )));
                }
                if entry.prev != prev {
                    return Err(InvariantError::new(format!(
                        "entry {:?} in bucket {} has a broken back link",
                        id, freq
                    )));
                }
                count += 1;
                if count > self.entries.len() {
                    return Err(InvariantError::new(format!("cycle in bucket {}", freq)));
                }
                prev = Some(id);
                current = entry.next;
            }
            if bucket.tail != prev {
                return Err(InvariantError::new(format!("bucket {} tail mismatch", freq)));
            }
            if bucket.len != count {
                return Err(InvariantError::new(format!(
                    "bucket {} records {} entries but links {}",
                    freq, bucket.len, count
                )));
            }
            total += count;
        }

        if total != self.entries.len() {
            return Err(InvariantError::new(format!(
                "buckets link {} entries but arena holds {}",
                total,
                self.entries.len()
            )));
        }

        if self.entries.is_empty() {
            if self.lowest != 0 {
                return Err(InvariantError::new(
                    "lowest frequency must be 0 when empty",
                ));
            }
        } else {
            if self.bucket_len(self.lowest) == 0 {
                return Err(InvariantError::new(format!(
                    "lowest frequency {} names an empty bucket",
                    self.lowest
                )));
            }
            if (0..self.lowest).any(|freq| self.bucket_len(freq) > 0) {
                return Err(InvariantError::new(format!(
                    "a non-empty bucket sits below lowest frequency {}",
                    self.lowest
                )));
            }
        }
        Ok(())
    }
}

/// Iterator over one bucket from oldest to newest.
pub struct BucketIter<'a, T> {
    entries: &'a SlotArena<Entry<T>>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for BucketIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let entry = self.entries.get(id)?;
        self.current = entry.next;
        Some((id, &entry.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket_values<T: Copy>(buckets: &FrequencyBuckets<T>, freq: usize) -> Vec<T> {
        buckets.iter_bucket(freq).map(|(_, v)| *v).collect()
    }

    mod basic_behavior {
        use super::*;

        #[test]
        fn insert_places_entries_in_bucket_zero_in_order() {
            let mut buckets = FrequencyBuckets::new(4);
            buckets.insert(1);
            buckets.insert(2);
            buckets.insert(3);
            assert_eq!(bucket_values(&buckets, 0), vec![1, 2, 3]);
            assert_eq!(buckets.lowest_frequency(), 0);
            assert_eq!(buckets.len(), 3);
            buckets.check_invariants().unwrap();
        }

        #[test]
        fn touch_promotes_and_advances_cursor() {
            let mut buckets = FrequencyBuckets::new(4);
            let a = buckets.insert('a');
            assert_eq!(buckets.touch(a), Some(1));
            assert_eq!(buckets.lowest_frequency(), 1);
            assert_eq!(buckets.bucket_len(0), 0);
            assert_eq!(bucket_values(&buckets, 1), vec!['a']);
            buckets.check_invariants().unwrap();
        }

        #[test]
        fn touch_keeps_cursor_when_bucket_still_populated() {
            let mut buckets = FrequencyBuckets::new(4);
            let a = buckets.insert('a');
            buckets.insert('b');
            buckets.touch(a);
            assert_eq!(buckets.lowest_frequency(), 0);
            buckets.check_invariants().unwrap();
        }

        #[test]
        fn touch_at_cap_refreshes_position() {
            let mut buckets = FrequencyBuckets::new(1);
            let a = buckets.insert('a');
            let b = buckets.insert('b');
            buckets.touch(a);
            buckets.touch(b);
            assert_eq!(bucket_values(&buckets, 1), vec!['a', 'b']);

            // a is already at the cap: it moves behind b, frequency unchanged
            assert_eq!(buckets.touch(a), Some(1));
            assert_eq!(bucket_values(&buckets, 1), vec!['b', 'a']);
            assert_eq!(buckets.allocated_buckets(), 2);
            buckets.check_invariants().unwrap();
        }

        #[test]
        fn zero_max_frequency_never_promotes() {
            let mut buckets = FrequencyBuckets::new(0);
            let a = buckets.insert(1);
            buckets.insert(2);
            assert_eq!(buckets.touch(a), Some(0));
            assert_eq!(bucket_values(&buckets, 0), vec![2, 1]);
            assert_eq!(buckets.pop_lowest(), Some((2, 0)));
            buckets.check_invariants().unwrap();
        }

        #[test]
        fn touch_missing_id_is_none() {
            let mut buckets = FrequencyBuckets::new(2);
            let a = buckets.insert(1);
            buckets.remove(a);
            assert_eq!(buckets.touch(a), None);
            assert_eq!(buckets.frequency(a), None);
        }
    }

    mod removal {
        use super::*;

        #[test]
        fn remove_rescans_cursor_forward() {
            let mut buckets = FrequencyBuckets::new(5);
            let a = buckets.insert('a');
            let b = buckets.insert('b');
            buckets.touch(b);
            buckets.touch(b);
            buckets.touch(b);
            assert_eq!(buckets.lowest_frequency(), 0);

            assert_eq!(buckets.remove(a), Some('a'));
            assert_eq!(buckets.lowest_frequency(), 3);
            buckets.check_invariants().unwrap();
        }

        #[test]
        fn remove_last_entry_wraps_cursor_to_zero() {
            let mut buckets = FrequencyBuckets::new(5);
            let a = buckets.insert('a');
            buckets.touch(a);
            buckets.touch(a);
            assert_eq!(buckets.lowest_frequency(), 2);
            buckets.remove(a);
            assert_eq!(buckets.lowest_frequency(), 0);
            assert!(buckets.is_empty());
            buckets.check_invariants().unwrap();
        }

        #[test]
        fn remove_from_higher_bucket_leaves_cursor() {
            let mut buckets = FrequencyBuckets::new(5);
            buckets.insert('a');
            let b = buckets.insert('b');
            buckets.touch(b);
            buckets.remove(b);
            assert_eq!(buckets.lowest_frequency(), 0);
            buckets.check_invariants().unwrap();
        }
    }

    mod eviction {
        use super::*;

        #[test]
        fn pop_lowest_takes_oldest_first() {
            let mut buckets = FrequencyBuckets::new(3);
            buckets.insert(1);
            buckets.insert(2);
            buckets.insert(3);
            assert_eq!(buckets.peek_lowest().map(|(_, v)| *v), Some(1));
            assert_eq!(buckets.pop_lowest(), Some((1, 0)));
            assert_eq!(buckets.pop_lowest(), Some((2, 0)));
            buckets.check_invariants().unwrap();
        }

        #[test]
        fn pop_lowest_advances_across_buckets() {
            let mut buckets = FrequencyBuckets::new(3);
            let a = buckets.insert('a');
            buckets.insert('b');
            buckets.touch(a);

            assert_eq!(buckets.pop_lowest(), Some(('b', 0)));
            assert_eq!(buckets.lowest_frequency(), 1);
            assert_eq!(buckets.pop_lowest(), Some(('a', 1)));
            assert_eq!(buckets.lowest_frequency(), 0);
            assert_eq!(buckets.pop_lowest(), None);
            buckets.check_invariants().unwrap();
        }

        #[test]
        fn promoted_entry_is_newest_in_its_bucket() {
            let mut buckets = FrequencyBuckets::new(3);
            let a = buckets.insert('a');
            let b = buckets.insert('b');
            buckets.touch(b);
            buckets.touch(a);
            assert_eq!(bucket_values(&buckets, 1), vec!['b', 'a']);
            let order: Vec<_> = buckets.iter().map(|(_, v, f)| (*v, f)).collect();
            assert_eq!(order, vec![('b', 1), ('a', 1)]);
        }

        #[test]
        fn clear_resets_everything() {
            let mut buckets = FrequencyBuckets::new(3);
            let a = buckets.insert('a');
            buckets.touch(a);
            buckets.touch(a);
            buckets.clear();
            assert!(buckets.is_empty());
            assert_eq!(buckets.lowest_frequency(), 0);
            assert_eq!(buckets.allocated_buckets(), 1);
            assert_eq!(buckets.peek_lowest(), None);
            buckets.check_invariants().unwrap();
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Insert,
            Touch(usize),
            Remove(usize),
            Pop,
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                3 => Just(Op::Insert),
                4 => any::<usize>().prop_map(Op::Touch),
                1 => any::<usize>().prop_map(Op::Remove),
                1 => Just(Op::Pop),
            ]
        }

        // Reference model: (value, freq, seq) where seq orders entries inside a bucket.
        struct Model {
            entries: Vec<(u32, usize, u64)>,
            clock: u64,
        }

        impl Model {
            fn victim(&self) -> Option<usize> {
                (0..self.entries.len()).min_by_key(|&i| (self.entries[i].1, self.entries[i].2))
            }
        }

        proptest! {
            #[test]
            fn matches_reference_model(
                max_frequency in 0usize..6,
                ops in prop::collection::vec(op_strategy(), 1..200),
            ) {
                let mut buckets = FrequencyBuckets::new(max_frequency);
                let mut ids: Vec<(u32, SlotId)> = Vec::new();
                let mut model = Model { entries: Vec::new(), clock: 0 };
                let mut next_value = 0u32;

                for op in ops {
                    model.clock += 1;
                    match op {
                        Op::Insert => {
                            let id = buckets.insert(next_value);
                            ids.push((next_value, id));
                            model.entries.push((next_value, 0, model.clock));
                            next_value += 1;
                        }
                        Op::Touch(i) if !ids.is_empty() => {
                            let (value, id) = ids[i % ids.len()];
                            let slot = model.entries.iter_mut().find(|e| e.0 == value).unwrap();
                            slot.1 = (slot.1 + 1).min(max_frequency);
                            slot.2 = model.clock;
                            prop_assert_eq!(buckets.touch(id), Some(slot.1));
                        }
                        Op::Remove(i) if !ids.is_empty() => {
                            let (value, id) = ids.swap_remove(i % ids.len());
                            model.entries.retain(|e| e.0 != value);
                            prop_assert_eq!(buckets.remove(id), Some(value));
                        }
                        Op::Pop => {
                            let expected = model.victim().map(|i| model.entries.remove(i));
                            let popped = buckets.pop_lowest();
                            prop_assert_eq!(popped, expected.map(|(v, f, _)| (v, f)));
                            if let Some((value, _)) = popped {
                                ids.retain(|(v, _)| *v != value);
                            }
                        }
                        _ => {}
                    }
                    prop_assert!(buckets.check_invariants().is_ok());
                    prop_assert_eq!(buckets.len(), model.entries.len());
                }
            }
        }
    }
}

//! Min-heap of entry deadlines with lazy staleness.
//!
//! A priority queue ordering keys by expiry deadline. Refreshing a key's
//! deadline does not modify the old heap entry in place: the caller pushes
//! a fresh (deadline, seq, key) triple and the superseded entry is skipped
//! when it eventually surfaces at the top — the caller judges staleness by
//! comparing the popped sequence number against its authoritative index.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  heap: BinaryHeap<Reverse<Deadline<K>>>  (may hold stale entries)│
//! │                                                                 │
//! │    Min order (earliest deadline first, seq breaks ties):        │
//! │                                                                 │
//! │    ("a", t+10ms, seq=1) ← stale if index says seq("a") == 4     │
//! │    ("b", t+20ms, seq=2)                                         │
//! │    ("a", t+60ms, seq=4) ← live replacement pushed on overwrite  │
//! │    ("c", t+60ms, seq=5)                                         │
//! └─────────────────────────────────────────────────────────────────┘
//!
//! Sweep Flow
//! ──────────
//!   loop:
//!     (key, at, seq) = heap.peek()
//!     index[key].seq != seq   → stale, pop and discard
//!     at <= now               → expired, pop and remove from index
//!     otherwise               → earliest entry still live, stop
//! ```
//!
//! Sequence numbers are assigned monotonically at write time by the owning
//! engine, so ties on equal deadlines resolve in write order.
//!
//! The heap deliberately does **not** own the authoritative key→deadline
//! map; the TTL engine's index already is that map, and duplicating it
//! here would leave two sources of truth to keep in lock-step.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Instant;

#[derive(Debug, Clone)]
struct Deadline<K> {
    at: Instant,
    seq: u64,
    key: K,
}

impl<K> PartialEq for Deadline<K> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<K> Eq for Deadline<K> {}

impl<K> PartialOrd for Deadline<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Deadline<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.at.cmp(&other.at) {
            Ordering::Equal => self.seq.cmp(&other.seq),
            ordering => ordering,
        }
    }
}

/// Min-heap of (deadline, seq, key) triples, earliest deadline first.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use evictkit::ds::ExpiryHeap;
///
/// let now = Instant::now();
/// let mut heap: ExpiryHeap<&str> = ExpiryHeap::new();
/// heap.push("slow", now + Duration::from_secs(60), 1);
/// heap.push("fast", now + Duration::from_secs(1), 2);
///
/// let (key, _, seq) = heap.pop().unwrap();
/// assert_eq!((key, seq), ("fast", 2));
/// ```
#[derive(Debug)]
pub struct ExpiryHeap<K> {
    heap: BinaryHeap<Reverse<Deadline<K>>>,
}

impl<K> ExpiryHeap<K> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Creates an empty heap with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Pushes a deadline entry. Any earlier entry for the same key is left
    /// in place and becomes stale by sequence-number mismatch.
    pub fn push(&mut self, key: K, at: Instant, seq: u64) {
        self.heap.push(Reverse(Deadline { at, seq, key }));
    }

    /// Returns the earliest entry without removing it.
    pub fn peek(&self) -> Option<(&K, Instant, u64)> {
        self.heap
            .peek()
            .map(|Reverse(entry)| (&entry.key, entry.at, entry.seq))
    }

    /// Removes and returns the earliest entry.
    pub fn pop(&mut self) -> Option<(K, Instant, u64)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.key, entry.at, entry.seq))
    }

    /// Number of entries in the heap, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if the heap holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drops every entry and releases the backing storage.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.heap.shrink_to_fit();
    }
}

impl<K> Default for ExpiryHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

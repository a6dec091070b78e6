//! FIFO (First In, First Out) cache replacement policy.
//!
//! Evicts entries in the order they were inserted: when the cache is at
//! capacity and a new key arrives, the oldest inserted entry is removed to
//! make room. Accesses and overwrites never change eviction order.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                        FifoCache<K, V> Layout                      │
//! │                                                                    │
//! │   index: FxHashMap<K, SlotId>      queue: SinglyList<Entry<K, V>>  │
//! │          key → slot                       insertion order          │
//! │                                                                    │
//! │   ┌──────────┬────────┐            head              tail          │
//! │   │   Key    │ SlotId │            ┌────┬────┬────┬────┐          │
//! │   ├──────────┼────────┤            │ e1 │ e2 │ e3 │ e4 │          │
//! │   │  "page1" │  id_1  │            └────┴────┴────┴────┘          │
//! │   │  "page2" │  id_2  │              ↑               ↑            │
//! │   │  "page3" │  id_3  │            oldest          newest         │
//! │   │  "page4" │  id_4  │            EVICT           insert         │
//! │   └──────────┴────────┘                                           │
//! └────────────────────────────────────────────────────────────────────┘
//!
//! Set Flow (new key)
//! ──────────────────
//!
//!   set("new_key", value):
//!     1. Check index — not found
//!     2. At capacity? Pop the head of the queue, drop its index entry
//!     3. Append entry at the tail, record its SlotId in the index
//!
//! Set Flow (existing key)
//! ───────────────────────
//!
//!   set("existing_key", value):
//!     1. Check index — found SlotId
//!     2. Overwrite the value in place (no queue change, no eviction)
//! ```
//!
//! ## Operations
//!
//! | Operation   | Time   | Notes                                      |
//! |-------------|--------|--------------------------------------------|
//! | `get`       | O(1)   | Index lookup, no reordering                |
//! | `set`       | O(1)   | May evict exactly one entry                |
//! | `fetch`     | O(1)*  | *Plus the caller's compute function        |
//! | `stop`      | O(n)   | Drops all entries                          |
//!
//! ## Thread Safety
//!
//! Internally synchronized: `get` takes the read lock, `set`/`fetch`/`stop`
//! the write lock. Share an instance across threads via `Arc`.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::traits::Cache;
//! use evictkit::policy::fifo::FifoCache;
//!
//! let cache = FifoCache::new(2);
//! cache.set("a", 1);
//! cache.set("b", 2);
//!
//! // Inserting a third key evicts "a", the oldest.
//! cache.set("c", 3);
//! assert_eq!(cache.get(&"a"), None);
//! assert_eq!(cache.get(&"b"), Some(2));
//! assert_eq!(cache.get(&"c"), Some(3));
//! ```

use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::singly_list::SinglyList;
use crate::ds::slot_arena::SlotId;
use crate::error::ConfigError;
use crate::traits::Cache;

/// An entry in the insertion-order queue.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

#[derive(Debug)]
struct FifoInner<K, V> {
    /// Maps key to its slot in the queue.
    index: FxHashMap<K, SlotId>,
    /// Entries in insertion order; head is the eviction victim.
    queue: SinglyList<Entry<K, V>>,
}

/// First-in-first-out cache: evicts the oldest inserted entry when a new
/// key arrives at capacity.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash`
/// - `V`: Value type, must be `Clone` (use `Arc<V>` for cheap clones)
///
/// # Example
///
/// ```
/// use evictkit::traits::Cache;
/// use evictkit::policy::fifo::FifoCache;
///
/// let cache = FifoCache::new(100);
/// cache.set("key1", "value1");
/// assert!(cache.contains(&"key1"));
///
/// // Reads do not affect eviction order (unlike LRU).
/// cache.get(&"key1");
///
/// // Overwrites keep the entry's queue position.
/// cache.set("key1", "new_value");
/// assert_eq!(cache.get(&"key1"), Some("new_value"));
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug)]
pub struct FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    inner: RwLock<FifoInner<K, V>>,
    capacity: usize,
    stopped: AtomicBool,
}

impl<K, V> FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a new FIFO cache with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::fifo::FifoCache;
    ///
    /// let cache: FifoCache<String, i32> = FifoCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a new FIFO cache, returning an error instead of panicking on
    /// an invalid capacity.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::fifo::FifoCache;
    ///
    /// assert!(FifoCache::<u64, u64>::try_new(10).is_ok());
    /// assert!(FifoCache::<u64, u64>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than 0"));
        }
        Ok(Self {
            inner: RwLock::new(FifoInner {
                index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
                queue: SinglyList::with_capacity(capacity),
            }),
            capacity,
            stopped: AtomicBool::new(false),
        })
    }

    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().index.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `key` is present. Never affects eviction order.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().index.contains_key(key)
    }

    #[inline]
    fn assert_live(&self) {
        assert!(!self.stopped.load(Ordering::Acquire), "cache is stopped");
    }

    /// Insert-or-overwrite under an already-held write lock.
    fn set_locked(&self, inner: &mut FifoInner<K, V>, key: K, value: V) {
        if let Some(&id) = inner.index.get(&key) {
            if let Some(entry) = inner.queue.get_mut(id) {
                entry.value = value;
            }
            return;
        }

        // Evict the oldest entry before admitting a genuinely new key.
        if inner.index.len() >= self.capacity {
            if let Some(evicted) = inner.queue.pop_front() {
                inner.index.remove(&evicted.key);
            }
        }

        let id = inner.queue.push_back(Entry {
            key: key.clone(),
            value,
        });
        inner.index.insert(key, id);

        #[cfg(debug_assertions)]
        validate_invariants(inner);
    }
}

impl<K, V> Cache<K, V> for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn get(&self, key: &K) -> Option<V> {
        let inner = self.inner.read();
        self.assert_live();
        let &id = inner.index.get(key)?;
        inner.queue.get(id).map(|entry| entry.value.clone())
    }

    fn set(&self, key: K, value: V) {
        let mut inner = self.inner.write();
        self.assert_live();
        self.set_locked(&mut inner, key, value);
    }

    fn fetch<F, E>(&self, key: K, f: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let mut inner = self.inner.write();
        self.assert_live();

        if let Some(&id) = inner.index.get(&key) {
            if let Some(entry) = inner.queue.get(id) {
                return Ok(entry.value.clone());
            }
        }

        let value = f()?;
        self.set_locked(&mut inner, key, value.clone());
        Ok(value)
    }

    fn stop(&self) {
        let mut inner = self.inner.write();
        if self
            .stopped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        inner.index.clear();
        inner.queue.clear();
        tracing::debug!(policy = "fifo", "cache stopped");
    }
}

#[cfg(debug_assertions)]
fn validate_invariants<K, V>(inner: &FifoInner<K, V>)
where
    K: Clone + Eq + Hash,
{
    debug_assert_eq!(inner.index.len(), inner.queue.len());
    for (key, &id) in inner.index.iter() {
        let entry = inner.queue.get(id).expect("indexed entry missing");
        debug_assert!(entry.key == *key, "index points at wrong entry");
    }
    inner.queue.debug_validate_invariants();
}

//! LRU (Least Recently Used) cache replacement policy.
//!
//! Evicts the entry that has gone longest without being read or written.
//! Every hit and every write promotes the entry to the hot end of a
//! recency list, so eviction always removes the coldest entry.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                         LruCache<K, V> Layout                      │
//! │                                                                    │
//! │   index: FxHashMap<K, SlotId>      list: LinkedList<Entry<K, V>>   │
//! │          key → slot                      recency order             │
//! │                                                                    │
//! │   ┌──────────┬────────┐          head                  tail        │
//! │   │   Key    │ SlotId │          ┌────┬────┬────┬────┐            │
//! │   ├──────────┼────────┤          │ e1 │ e2 │ e3 │ e4 │            │
//! │   │  "page1" │  id_1  │          └────┴────┴────┴────┘            │
//! │   │  "page2" │  id_2  │            ↑                ↑             │
//! │   │  "page3" │  id_3  │          coldest          hottest         │
//! │   │  "page4" │  id_4  │          EVICT            promote         │
//! │   └──────────┴────────┘                                           │
//! └────────────────────────────────────────────────────────────────────┘
//!
//! Access Flow
//! ───────────
//!
//!   get("page2"):
//!     1. Index lookup → id_2
//!     2. list.move_to_back(id_2)   (promote to hottest; O(1))
//!     3. Return clone of the value
//!
//! Set Flow (new key at capacity)
//! ──────────────────────────────
//!
//!   set("page5", value):
//!     1. Pop the list head (coldest), drop its index entry
//!     2. Append the new entry at the tail, index its SlotId
//! ```
//!
//! Promoting the current tail is a no-op; promoting the current head
//! advances the head to its successor before relinking.
//!
//! ## Thread Safety
//!
//! Internally synchronized behind one `Mutex` — unlike the FIFO/LIFO
//! engines there is no read path, because even `get` rewires the recency
//! list. Share an instance across threads via `Arc`.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::traits::Cache;
//! use evictkit::policy::lru::LruCache;
//!
//! let cache = LruCache::new(3);
//! cache.set("a", 1);
//! cache.set("b", 2);
//! cache.set("c", 3);
//!
//! // Reading "a" promotes it; "b" is now the coldest entry.
//! cache.get(&"a");
//!
//! cache.set("d", 4);
//! assert_eq!(cache.get(&"b"), None);
//! assert_eq!(cache.get(&"a"), Some(1));
//! ```

use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::linked_list::LinkedList;
use crate::ds::slot_arena::SlotId;
use crate::error::ConfigError;
use crate::traits::Cache;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

#[derive(Debug)]
struct LruInner<K, V> {
    /// Maps key to its slot in the recency list.
    index: FxHashMap<K, SlotId>,
    /// Entries coldest-first; head is the eviction victim.
    list: LinkedList<Entry<K, V>>,
}

/// Least-recently-used cache: every read or write promotes the entry, and
/// eviction removes whichever entry has been untouched longest.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash`
/// - `V`: Value type, must be `Clone` (use `Arc<V>` for cheap clones)
#[derive(Debug)]
pub struct LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    inner: Mutex<LruInner<K, V>>,
    capacity: usize,
    stopped: AtomicBool,
}

impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a new LRU cache with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u64, String> = LruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a new LRU cache, returning an error instead of panicking on
    /// an invalid capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than 0"));
        }
        Ok(Self {
            inner: Mutex::new(LruInner {
                index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
                list: LinkedList::with_capacity(capacity),
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
        self.inner.lock().index.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `key` is present, without promoting it.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().index.contains_key(key)
    }

    /// Returns a clone of the value for `key` without promoting it.
    ///
    /// Unlike [`get`](Cache::get), peeking leaves the recency order
    /// untouched, so the entry remains as cold as it was.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::Cache;
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let cache = LruCache::new(2);
    /// cache.set("a", 1);
    /// cache.set("b", 2);
    ///
    /// // Peek does not promote; "a" is still the coldest entry.
    /// assert_eq!(cache.peek(&"a"), Some(1));
    /// cache.set("c", 3);
    /// assert_eq!(cache.peek(&"a"), None);
    /// ```
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let inner = self.inner.lock();
        let &id = inner.index.get(key)?;
        inner.list.get(id).map(|entry| entry.value.clone())
    }

    #[inline]
    fn assert_live(&self) {
        assert!(!self.stopped.load(Ordering::Acquire), "cache is stopped");
    }

    fn set_locked(&self, inner: &mut LruInner<K, V>, key: K, value: V) {
        if let Some(&id) = inner.index.get(&key) {
            if let Some(entry) = inner.list.get_mut(id) {
                entry.value = value;
            }
            // A write counts as a use.
            inner.list.move_to_back(id);
            return;
        }

        // Evict the coldest entry before admitting a genuinely new key.
        if inner.index.len() >= self.capacity {
            if let Some(evicted) = inner.list.pop_front() {
                inner.index.remove(&evicted.key);
            }
        }

        let id = inner.list.push_back(Entry {
            key: key.clone(),
            value,
        });
        inner.index.insert(key, id);

        #[cfg(debug_assertions)]
        validate_invariants(inner);
    }
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.lock();
        self.assert_live();
        let &id = inner.index.get(key)?;
        inner.list.move_to_back(id);
        inner.list.get(id).map(|entry| entry.value.clone())
    }

    fn set(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        self.assert_live();
        self.set_locked(&mut inner, key, value);
    }

    fn fetch<F, E>(&self, key: K, f: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let mut inner = self.inner.lock();
        self.assert_live();

        if let Some(&id) = inner.index.get(&key) {
            // A fetch hit carries get's promotion side effect.
            inner.list.move_to_back(id);
            if let Some(entry) = inner.list.get(id) {
                return Ok(entry.value.clone());
            }
        }

        let value = f()?;
        self.set_locked(&mut inner, key, value.clone());
        Ok(value)
    }

    fn stop(&self) {
        let mut inner = self.inner.lock();
        if self
            .stopped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        inner.index.clear();
        inner.list.clear();
        tracing::debug!(policy = "lru", "cache stopped");
    }
}

#[cfg(debug_assertions)]
fn validate_invariants<K, V>(inner: &LruInner<K, V>)
where
    K: Clone + Eq + Hash,
{
    debug_assert_eq!(inner.index.len(), inner.list.len());
    for (key, &id) in inner.index.iter() {
        let entry = inner.list.get(id).expect("indexed entry missing");
        debug_assert!(entry.key == *key, "index points at wrong entry");
    }
    inner.list.debug_validate_invariants();
}

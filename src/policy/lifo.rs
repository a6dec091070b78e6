//! LIFO (Last In, First Out) cache replacement policy.
//!
//! The structural mirror of [`fifo`](crate::policy::fifo): both engines keep
//! a singly linked queue over a key→slot index and evict from the queue
//! head, but LIFO *inserts* new entries at the head too. The head is
//! therefore always the most recently inserted entry, and eviction removes
//! newest-first while the oldest entries survive indefinitely.
//!
//! ```text
//!   insert ──► head ─► [newest] ─► ... ─► [oldest] ◄── tail
//!              evict ──┘
//! ```
//!
//! Accesses and overwrites never change eviction order. Useful for
//! scratch-space workloads where the most recent insertions are the least
//! likely to be needed again; for temporal locality use
//! [`lru`](crate::policy::lru) instead.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::traits::Cache;
//! use evictkit::policy::lifo::LifoCache;
//!
//! let cache = LifoCache::new(2);
//! cache.set("a", 1);
//! cache.set("b", 2);
//!
//! // Inserting a third key evicts "b", the newest.
//! cache.set("c", 3);
//! assert_eq!(cache.get(&"a"), Some(1));
//! assert_eq!(cache.get(&"b"), None);
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

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

#[derive(Debug)]
struct LifoInner<K, V> {
    /// Maps key to its slot in the stack.
    index: FxHashMap<K, SlotId>,
    /// Entries newest-first; head is both insertion point and eviction victim.
    stack: SinglyList<Entry<K, V>>,
}

/// Last-in-first-out cache: evicts the most recently inserted entry when a
/// new key arrives at capacity.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash`
/// - `V`: Value type, must be `Clone` (use `Arc<V>` for cheap clones)
#[derive(Debug)]
pub struct LifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    inner: RwLock<LifoInner<K, V>>,
    capacity: usize,
    stopped: AtomicBool,
}

impl<K, V> LifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a new LIFO cache with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::lifo::LifoCache;
    ///
    /// let cache: LifoCache<String, i32> = LifoCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a new LIFO cache, returning an error instead of panicking on
    /// an invalid capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than 0"));
        }
        Ok(Self {
            inner: RwLock::new(LifoInner {
                index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
                stack: SinglyList::with_capacity(capacity),
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

    fn set_locked(&self, inner: &mut LifoInner<K, V>, key: K, value: V) {
        if let Some(&id) = inner.index.get(&key) {
            if let Some(entry) = inner.stack.get_mut(id) {
                entry.value = value;
            }
            return;
        }

        // Evict the newest entry before admitting a genuinely new key.
        if inner.index.len() >= self.capacity {
            if let Some(evicted) = inner.stack.pop_front() {
                inner.index.remove(&evicted.key);
            }
        }

        let id = inner.stack.push_front(Entry {
            key: key.clone(),
            value,
        });
        inner.index.insert(key, id);

        #[cfg(debug_assertions)]
        validate_invariants(inner);
    }
}

impl<K, V> Cache<K, V> for LifoCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn get(&self, key: &K) -> Option<V> {
        let inner = self.inner.read();
        self.assert_live();
        let &id = inner.index.get(key)?;
        inner.stack.get(id).map(|entry| entry.value.clone())
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
            if let Some(entry) = inner.stack.get(id) {
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
        inner.stack.clear();
        tracing::debug!(policy = "lifo", "cache stopped");
    }
}

#[cfg(debug_assertions)]
fn validate_invariants<K, V>(inner: &LifoInner<K, V>)
where
    K: Clone + Eq + Hash,
{
    debug_assert_eq!(inner.index.len(), inner.stack.len());
    for (key, &id) in inner.index.iter() {
        let entry = inner.stack.get(id).expect("indexed entry missing");
        debug_assert!(entry.key == *key, "index points at wrong entry");
    }
    inner.stack.debug_validate_invariants();
}

#[cfg(test)]
mod tests {
    use super::*;

    mod basic_operations {
        use super::*;

        #[test]
        fn new_cache_is_empty() {
            let cache: LifoCache<&str, i32> = LifoCache::new(100);
            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 100);
        }

        #[test]
        fn set_and_get() {
            let cache = LifoCache::new(100);
            cache.set("key1", "value1");
            assert_eq!(cache.get(&"key1"), Some("value1"));
            assert_eq!(cache.get(&"missing"), None);
        }

        #[test]
        fn try_new_rejects_zero_capacity() {
            let err = LifoCache::<u64, u64>::try_new(0).unwrap_err();
            assert_eq!(err.to_string(), "capacity must be greater than 0");
        }

        #[test]
        #[should_panic(expected = "capacity must be greater than 0")]
        fn new_panics_on_zero_capacity() {
            let _ = LifoCache::<u64, u64>::new(0);
        }
    }

    mod lifo_behavior {
        use super::*;

        #[test]
        fn evicts_most_recently_inserted() {
            let cache = LifoCache::new(3);
            cache.set("first", 1);
            cache.set("second", 2);
            cache.set("third", 3);

            cache.set("fourth", 4);

            assert_eq!(cache.len(), 3);
            assert!(cache.contains(&"first"));
            assert!(cache.contains(&"second"));
            assert!(!cache.contains(&"third"));
            assert!(cache.contains(&"fourth"));
        }

        #[test]
        fn oldest_entries_survive() {
            let cache = LifoCache::new(3);
            cache.set(1, ());
            cache.set(2, ());
            cache.set(3, ());

            for i in 4..=10 {
                cache.set(i, ());
            }

            assert!(cache.contains(&1));
            assert!(cache.contains(&2));
            assert!(cache.contains(&10));
            assert_eq!(cache.len(), 3);
        }

        #[test]
        fn opposite_of_fifo() {
            let cache = LifoCache::new(2);
            cache.set("oldest", 1);
            cache.set("newest", 2);

            // FIFO would evict "oldest"; LIFO evicts "newest".
            cache.set("new", 3);

            assert!(cache.contains(&"oldest"));
            assert!(!cache.contains(&"newest"));
            assert!(cache.contains(&"new"));
        }

        #[test]
        fn get_does_not_change_eviction_order() {
            let cache = LifoCache::new(2);
            cache.set("a", 1);
            cache.set("b", 2);

            for _ in 0..100 {
                cache.get(&"b");
            }

            // "b" is still the newest insertion and is evicted.
            cache.set("c", 3);
            assert!(cache.contains(&"a"));
            assert!(!cache.contains(&"b"));
        }
    }

    mod overwrite_behavior {
        use super::*;

        #[test]
        fn overwrite_updates_value_in_place() {
            let cache = LifoCache::new(100);
            cache.set("key", "v1");
            cache.set("key", "v2");

            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&"key"), Some("v2"));
        }

        #[test]
        fn overwrite_preserves_stack_position() {
            let cache = LifoCache::new(2);
            cache.set("a", 1);
            cache.set("b", 2);

            // Overwriting "a" (the older entry) does not make it newest.
            cache.set("a", 10);

            cache.set("c", 3);
            assert_eq!(cache.get(&"a"), Some(10));
            assert!(!cache.contains(&"b"));
        }

        #[test]
        fn overwrite_at_capacity_never_evicts() {
            let cache = LifoCache::new(2);
            cache.set("a", 1);
            cache.set("b", 2);

            cache.set("b", 20);

            assert_eq!(cache.len(), 2);
            assert_eq!(cache.get(&"a"), Some(1));
            assert_eq!(cache.get(&"b"), Some(20));
        }
    }

    mod fetch_behavior {
        use super::*;

        #[test]
        fn fetch_round_trip() {
            let cache: LifoCache<&str, i32> = LifoCache::new(10);

            let value: Result<i32, &str> = cache.fetch("k", || Ok(7));
            assert_eq!(value.unwrap(), 7);

            let value: Result<i32, &str> = cache.fetch("k", || unreachable!());
            assert_eq!(value.unwrap(), 7);
        }

        #[test]
        fn fetch_error_leaves_cache_unmodified() {
            let cache: LifoCache<&str, i32> = LifoCache::new(10);

            let value: Result<i32, &str> = cache.fetch("k", || Err("boom"));
            assert_eq!(value.unwrap_err(), "boom");
            assert!(!cache.contains(&"k"));
        }
    }

    mod stop_behavior {
        use super::*;

        #[test]
        fn stop_drops_all_entries_and_is_idempotent() {
            let cache = LifoCache::new(10);
            cache.set(1, "one");
            cache.stop();
            cache.stop();
            assert_eq!(cache.len(), 0);
        }

        #[test]
        #[should_panic(expected = "cache is stopped")]
        fn get_after_stop_panics() {
            let cache: LifoCache<u32, ()> = LifoCache::new(10);
            cache.stop();
            cache.get(&1);
        }

        #[test]
        #[should_panic(expected = "cache is stopped")]
        fn set_after_stop_panics() {
            let cache = LifoCache::new(10);
            cache.stop();
            cache.set(1, ());
        }
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn single_capacity_cache_replaces_its_entry() {
            let cache = LifoCache::new(1);
            cache.set("a", 1);
            cache.set("b", 2);

            assert!(!cache.contains(&"a"));
            assert_eq!(cache.get(&"b"), Some(2));
        }

        #[test]
        fn churn_keeps_structures_consistent() {
            let cache = LifoCache::new(4);
            for i in 0..100u32 {
                cache.set(i, i);
            }
            // Three oldest entries plus the latest insertion.
            assert_eq!(cache.len(), 4);
            assert!(cache.contains(&0));
            assert!(cache.contains(&1));
            assert!(cache.contains(&2));
            assert!(cache.contains(&99));
        }
    }
}

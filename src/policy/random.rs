//! Random replacement cache policy.
//!
//! The simplest engine in the crate: a flat key→value map with no order
//! structure at all. When a new key arrives at capacity, a uniformly
//! random existing entry is evicted. Accesses carry no information — an
//! entry's survival odds are independent of how recently or how often it
//! was used.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                     RandomCache<K, V> Layout                   │
//! │                                                                │
//! │   map: FxHashMap<K, (usize, V)>       keys: Vec<K>             │
//! │        key → (slot in keys, value)    dense victim pool        │
//! │                                                                │
//! │   Evict:                                                       │
//! │     1. idx = xorshift64* % keys.len()                          │
//! │     2. victim = keys.swap_remove(idx)                          │
//! │     3. map.remove(victim); re-index the key swapped into idx   │
//! │                                                                │
//! │   All O(1); the dense key vector exists only so a uniformly    │
//! │   random victim can be picked without scanning the map.        │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The PRNG is an embedded xorshift64* seeded per instance from
//! [`std::collections::hash_map::RandomState`], so victim selection
//! differs across runs without pulling in an RNG dependency.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::traits::Cache;
//! use evictkit::policy::random::RandomCache;
//!
//! let cache = RandomCache::new(3);
//! for i in 0..4 {
//!     cache.set(i, i * 10);
//! }
//!
//! // Exactly one of the four keys was evicted; which one varies by run.
//! assert_eq!(cache.len(), 3);
//! ```

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::ConfigError;
use crate::traits::Cache;

#[derive(Debug)]
struct RandomInner<K, V> {
    /// Maps key to (index in `keys`, value).
    map: FxHashMap<K, (usize, V)>,
    /// Dense array of keys for O(1) random victim selection.
    keys: Vec<K>,
    /// xorshift64* state; never zero.
    rng_state: u64,
}

/// Random replacement cache: evicts a uniformly random entry when a new
/// key arrives at capacity.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash`
/// - `V`: Value type, must be `Clone` (use `Arc<V>` for cheap clones)
#[derive(Debug)]
pub struct RandomCache<K, V>
where
    K: Clone + Eq + Hash,
{
    inner: RwLock<RandomInner<K, V>>,
    capacity: usize,
    stopped: AtomicBool,
}

impl<K, V> RandomCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a new random replacement cache with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::random::RandomCache;
    ///
    /// let cache: RandomCache<String, i32> = RandomCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a new random replacement cache, returning an error instead
    /// of panicking on an invalid capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than 0"));
        }
        Ok(Self {
            inner: RwLock::new(RandomInner {
                map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
                keys: Vec::with_capacity(capacity),
                rng_state: seed(),
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
        self.inner.read().map.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().map.contains_key(key)
    }

    #[inline]
    fn assert_live(&self) {
        assert!(!self.stopped.load(Ordering::Acquire), "cache is stopped");
    }

    fn set_locked(&self, inner: &mut RandomInner<K, V>, key: K, value: V) {
        if let Some(slot) = inner.map.get_mut(&key) {
            slot.1 = value;
            return;
        }

        // Evict an arbitrary entry before admitting a genuinely new key.
        if inner.map.len() >= self.capacity {
            evict_random(inner);
        }

        let idx = inner.keys.len();
        inner.keys.push(key.clone());
        inner.map.insert(key, (idx, value));

        #[cfg(debug_assertions)]
        validate_invariants(inner);
    }
}

impl<K, V> Cache<K, V> for RandomCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn get(&self, key: &K) -> Option<V> {
        let inner = self.inner.read();
        self.assert_live();
        inner.map.get(key).map(|(_, value)| value.clone())
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

        if let Some((_, value)) = inner.map.get(&key) {
            return Ok(value.clone());
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

        inner.map.clear();
        inner.keys.clear();
        tracing::debug!(policy = "random", "cache stopped");
    }
}

/// Removes one uniformly random entry via swap-remove.
fn evict_random<K, V>(inner: &mut RandomInner<K, V>)
where
    K: Clone + Eq + Hash,
{
    if inner.keys.is_empty() {
        return;
    }

    let idx = (next_u64(&mut inner.rng_state) % inner.keys.len() as u64) as usize;
    let victim = inner.keys.swap_remove(idx);
    inner.map.remove(&victim);

    // swap_remove moved the former last key into `idx`; re-point its slot.
    if idx < inner.keys.len() {
        let moved = inner.keys[idx].clone();
        if let Some(slot) = inner.map.get_mut(&moved) {
            slot.0 = idx;
        }
    }
}

/// xorshift64* step.
#[inline]
fn next_u64(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *state = x;
    x.wrapping_mul(0x2545_f491_4f6c_dd1d)
}

/// Per-instance seed drawn from std's process-random hasher keys.
fn seed() -> u64 {
    let hasher = RandomState::new().build_hasher();
    // finish() on the keyed hasher differs per RandomState; force non-zero
    // because xorshift has a fixed point at zero.
    hasher.finish() | 1
}

#[cfg(debug_assertions)]
fn validate_invariants<K, V>(inner: &RandomInner<K, V>)
where
    K: Clone + Eq + Hash,
{
    debug_assert_eq!(inner.map.len(), inner.keys.len());
    for (idx, key) in inner.keys.iter().enumerate() {
        let slot = inner.map.get(key).expect("key in pool missing from map");
        debug_assert_eq!(slot.0, idx, "stale pool index");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    mod basic_operations {
        use super::*;

        #[test]
        fn new_cache_is_empty() {
            let cache: RandomCache<&str, i32> = RandomCache::new(100);
            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 100);
        }

        #[test]
        fn set_and_get() {
            let cache = RandomCache::new(100);
            cache.set("key", 42);
            assert_eq!(cache.get(&"key"), Some(42));
            assert_eq!(cache.get(&"missing"), None);
        }

        #[test]
        fn overwrite_updates_value_without_eviction() {
            let cache = RandomCache::new(2);
            cache.set("a", 1);
            cache.set("b", 2);

            cache.set("a", 10);

            assert_eq!(cache.len(), 2);
            assert_eq!(cache.get(&"a"), Some(10));
            assert_eq!(cache.get(&"b"), Some(2));
        }

        #[test]
        fn try_new_rejects_zero_capacity() {
            let err = RandomCache::<u64, u64>::try_new(0).unwrap_err();
            assert_eq!(err.to_string(), "capacity must be greater than 0");
        }

        #[test]
        #[should_panic(expected = "capacity must be greater than 0")]
        fn new_panics_on_zero_capacity() {
            let _ = RandomCache::<u64, u64>::new(0);
        }
    }

    mod eviction_behavior {
        use super::*;

        #[test]
        fn evicts_exactly_one_entry_at_capacity() {
            let cache = RandomCache::new(5);
            for i in 0..6u32 {
                cache.set(i, i);
            }

            assert_eq!(cache.len(), 5);
            // Every surviving key is one of the inserted ones, and the new
            // key is always admitted.
            assert!(cache.contains(&5));
            let survivors: Vec<u32> = (0..6).filter(|k| cache.contains(k)).collect();
            assert_eq!(survivors.len(), 5);
        }

        #[test]
        fn capacity_never_exceeded_under_churn() {
            let cache = RandomCache::new(16);
            for i in 0..5000u32 {
                cache.set(i, i);
            }
            assert_eq!(cache.len(), 16);
        }

        #[test]
        fn victims_are_spread_across_the_key_space() {
            // With 64 evictions from a 64-entry pool, a victim picker that
            // always chose the same position would leave a recognizable
            // survivor pattern. Require at least a handful of distinct
            // original keys to be gone.
            let cache = RandomCache::new(64);
            for i in 0..64u32 {
                cache.set(i, ());
            }
            for i in 64..128u32 {
                cache.set(i, ());
            }

            let evicted_originals: HashSet<u32> =
                (0..64).filter(|k| !cache.contains(k)).collect();
            assert!(
                evicted_originals.len() >= 8,
                "expected eviction spread, got {} distinct victims",
                evicted_originals.len()
            );
        }

        #[test]
        fn two_instances_use_distinct_seeds() {
            let a: RandomCache<u32, ()> = RandomCache::new(8);
            let b: RandomCache<u32, ()> = RandomCache::new(8);
            let (sa, sb) = (a.inner.read().rng_state, b.inner.read().rng_state);
            assert_ne!(sa, sb);
        }
    }

    mod fetch_behavior {
        use super::*;

        #[test]
        fn fetch_round_trip() {
            let cache: RandomCache<&str, i32> = RandomCache::new(10);

            let value: Result<i32, &str> = cache.fetch("k", || Ok(5));
            assert_eq!(value.unwrap(), 5);

            let value: Result<i32, &str> = cache.fetch("k", || unreachable!());
            assert_eq!(value.unwrap(), 5);
        }

        #[test]
        fn fetch_error_leaves_cache_unmodified() {
            let cache: RandomCache<&str, i32> = RandomCache::new(10);

            let value: Result<i32, &str> = cache.fetch("k", || Err("boom"));
            assert_eq!(value.unwrap_err(), "boom");
            assert!(!cache.contains(&"k"));
        }
    }

    mod stop_behavior {
        use super::*;

        #[test]
        fn stop_drops_all_entries_and_is_idempotent() {
            let cache = RandomCache::new(10);
            cache.set(1, "one");
            cache.stop();
            cache.stop();
            assert_eq!(cache.len(), 0);
        }

        #[test]
        #[should_panic(expected = "cache is stopped")]
        fn get_after_stop_panics() {
            let cache: RandomCache<u32, ()> = RandomCache::new(10);
            cache.stop();
            cache.get(&1);
        }

        #[test]
        #[should_panic(expected = "cache is stopped")]
        fn set_after_stop_panics() {
            let cache = RandomCache::new(10);
            cache.stop();
            cache.set(1, ());
        }
    }

    #[test]
    fn xorshift_is_nonzero_and_varies() {
        let mut state = seed();
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let value = next_u64(&mut state);
            assert_ne!(state, 0);
            seen.insert(value);
        }
        assert!(seen.len() > 990, "xorshift output cycling too quickly");
    }
}

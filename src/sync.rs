//! Exclusive-lock decorator over any cache implementation.
//!
//! [`SyncCache`] wraps a [`Cache`] behind one `parking_lot::Mutex` and
//! re-exposes the identical contract. It adds no policy of its own — only
//! mutual exclusion around each delegated operation.
//!
//! The engines in this crate are already internally synchronized, so they
//! do not need the decorator; it exists for caller-supplied
//! implementations that are not, and for callers who want to force full
//! serialization of an engine's read path (FIFO/LIFO/Random/TTL reads
//! otherwise proceed in parallel under a read lock).

use parking_lot::Mutex;

use crate::traits::Cache;

/// Serializes every operation of the wrapped cache behind one exclusive
/// lock.
///
/// # Example
///
/// ```
/// use evictkit::traits::Cache;
/// use evictkit::policy::lru::LruCache;
/// use evictkit::sync::SyncCache;
///
/// let cache = SyncCache::new(LruCache::new(100));
/// cache.set("key", 1);
/// assert_eq!(cache.get(&"key"), Some(1));
/// ```
pub struct SyncCache<C> {
    inner: Mutex<C>,
}

impl<C> SyncCache<C> {
    /// Wraps `cache` behind an exclusive lock.
    pub fn new(cache: C) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    /// Consumes the decorator, returning the wrapped cache.
    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }
}

impl<K, V, C> Cache<K, V> for SyncCache<C>
where
    C: Cache<K, V>,
{
    fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key)
    }

    fn set(&self, key: K, value: V) {
        self.inner.lock().set(key, value)
    }

    fn fetch<F, E>(&self, key: K, f: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        self.inner.lock().fetch(key, f)
    }

    fn stop(&self) {
        self.inner.lock().stop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::fifo::FifoCache;

    #[test]
    fn delegates_all_operations() {
        let cache = SyncCache::new(FifoCache::new(2));
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);

        // FIFO semantics pass through untouched.
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(2));
        assert_eq!(cache.get(&"c"), Some(3));
    }

    #[test]
    fn fetch_passes_through() {
        let cache: SyncCache<FifoCache<&str, i32>> = SyncCache::new(FifoCache::new(10));

        let value: Result<i32, &str> = cache.fetch("k", || Ok(9));
        assert_eq!(value.unwrap(), 9);

        let value: Result<i32, &str> = cache.fetch("k", || unreachable!());
        assert_eq!(value.unwrap(), 9);
    }

    #[test]
    #[should_panic(expected = "cache is stopped")]
    fn stop_passes_through() {
        let cache = SyncCache::new(FifoCache::new(10));
        cache.set(1, ());
        cache.stop();
        cache.get(&1);
    }

    #[test]
    fn into_inner_returns_wrapped_cache() {
        let cache = SyncCache::new(FifoCache::new(10));
        cache.set("k", 5);

        let inner = cache.into_inner();
        assert_eq!(inner.get(&"k"), Some(5));
    }
}

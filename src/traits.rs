//! # The Shared Cache Contract
//!
//! This module defines the one trait every eviction engine in this crate
//! implements, so callers can treat the policies polymorphically through a
//! single capability set.
//!
//! ## Architecture
//!
//! ```text
//!                     ┌─────────────────────────────────────────┐
//!                     │              Cache<K, V>                │
//!                     │                                         │
//!                     │  get(&K) → Option<V>                    │
//!                     │  set(K, V)                              │
//!                     │  fetch(K, FnOnce) → Result<V, E>        │
//!                     │  stop()                                 │
//!                     └──────────────────┬──────────────────────┘
//!                                        │
//!        ┌──────────┬──────────┬─────────┼─────────┬─────────────┐
//!        ▼          ▼          ▼         ▼         ▼             ▼
//!   FifoCache  LifoCache  LruCache  RandomCache  TtlCache  SyncCache<C>
//!   (oldest    (newest    (coldest  (arbitrary   (expired  (decorator,
//!    evicted)   evicted)   evicted)  evicted)     swept)    no policy)
//! ```
//!
//! ## Design Notes
//!
//! There is deliberately **one** trait, not a hierarchy: the five engines
//! share no behavior beyond this contract, and each is structurally
//! independent. Policy-specific surface (capacity, ttl, `len`, `contains`)
//! lives as inherent methods on the concrete types.
//!
//! Values are returned **by clone**. All engines are internally
//! synchronized and hand out owned values rather than references into their
//! locked state. Wrap expensive-to-clone values in [`std::sync::Arc`].
//!
//! ## Lifecycle
//!
//! ```text
//!   new(capacity | ttl) ──► active ──► stop() ──► stopped (terminal)
//!
//!   active:  get / set / fetch operate normally
//!   stopped: get / set / fetch panic; stop() is a no-op
//! ```
//!
//! A stopped cache is permanently unusable. Calling `get`, `set`, or `fetch`
//! on it is a lifecycle bug in the caller and panics rather than being
//! masked as a miss.

/// Uniform contract implemented by every eviction engine in this crate.
///
/// # Type Parameters
///
/// - `K`: Key type (implementations require `Eq + Hash + Clone`)
/// - `V`: Value type (implementations require `Clone`; use `Arc<V>` when
///   clones must be cheap)
///
/// # Example
///
/// ```
/// use evictkit::traits::Cache;
/// use evictkit::policy::fifo::FifoCache;
/// use evictkit::policy::lru::LruCache;
///
/// // Generic code sees every policy through the same four operations.
/// fn warm<C: Cache<u64, String>>(cache: &C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.set(*key, value.clone());
///     }
/// }
///
/// let fifo = FifoCache::new(100);
/// let lru = LruCache::new(100);
/// warm(&fifo, &[(1, "one".to_string())]);
/// warm(&lru, &[(1, "one".to_string())]);
/// assert_eq!(fifo.get(&1), Some("one".to_string()));
/// assert_eq!(lru.get(&1), Some("one".to_string()));
/// ```
pub trait Cache<K, V> {
    /// Looks up `key`, returning a clone of the cached value if present.
    ///
    /// Policy side effects apply: an LRU hit promotes the entry to
    /// most-recently-used. A TTL entry whose deadline has passed reports
    /// `None` even if it has not been physically swept yet — expired data
    /// is never returned.
    ///
    /// # Panics
    ///
    /// Panics if the cache has been stopped.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::Cache;
    /// use evictkit::policy::fifo::FifoCache;
    ///
    /// let cache = FifoCache::new(10);
    /// cache.set("key", 42);
    ///
    /// assert_eq!(cache.get(&"key"), Some(42));
    /// assert_eq!(cache.get(&"missing"), None);
    /// ```
    fn get(&self, key: &K) -> Option<V>;

    /// Inserts or overwrites `key`.
    ///
    /// If the key is new and the cache is at capacity, exactly one entry is
    /// evicted first according to the policy. If the key already exists,
    /// the value is overwritten in place: FIFO/LIFO keep the entry's
    /// structural position, LRU re-promotes it, TTL resets its deadline.
    /// Overwrites never trigger eviction.
    ///
    /// # Panics
    ///
    /// Panics if the cache has been stopped.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::Cache;
    /// use evictkit::policy::fifo::FifoCache;
    ///
    /// let cache = FifoCache::new(10);
    /// cache.set("key", "initial");
    /// cache.set("key", "updated");
    ///
    /// assert_eq!(cache.get(&"key"), Some("updated"));
    /// ```
    fn set(&self, key: K, value: V);

    /// Returns the cached value for `key`, computing and storing it on miss.
    ///
    /// On a hit the cached value is returned with the same side effects as
    /// [`get`](Self::get) and `f` is not invoked. On a miss `f` runs; an
    /// `Err` propagates to the caller verbatim and the cache is left
    /// unmodified (no negative caching), while an `Ok` value is stored via
    /// the [`set`](Self::set) path and returned.
    ///
    /// The whole operation executes under one critical section per cache
    /// instance: while `f` runs, **all** other operations on this instance
    /// block, including those for unrelated keys. This is a deliberate
    /// simplicity trade-off — keep compute functions short, and retry
    /// failed computes by calling `fetch` again.
    ///
    /// # Panics
    ///
    /// Panics if the cache has been stopped.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::Cache;
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<&str, String> = LruCache::new(10);
    ///
    /// let value: Result<String, &str> = cache.fetch("config", || Ok("from-disk".to_string()));
    /// assert_eq!(value.unwrap(), "from-disk");
    ///
    /// // Second fetch hits the cache; the closure is not invoked.
    /// let value: Result<String, &str> = cache.fetch("config", || unreachable!());
    /// assert_eq!(value.unwrap(), "from-disk");
    /// ```
    fn fetch<F, E>(&self, key: K, f: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>;

    /// Stops the cache, dropping every entry.
    ///
    /// Idempotent: the first call wins an atomic transition, clears all
    /// internal structures, and (for TTL) signals the background sweeper to
    /// terminate; later calls return immediately. `stop` does not wait for
    /// the TTL sweeper thread to exit, but no further mutation of cache
    /// state occurs after it returns. Once stopped, the handle is
    /// permanently unusable.
    ///
    /// # Example
    ///
    /// ```should_panic
    /// use evictkit::traits::Cache;
    /// use evictkit::policy::fifo::FifoCache;
    ///
    /// let cache = FifoCache::new(10);
    /// cache.set(1, "one");
    /// cache.stop();
    /// cache.stop(); // second stop is a no-op
    ///
    /// cache.get(&1); // panics: cache is stopped
    /// ```
    fn stop(&self);
}

//! TTL (time-to-live) cache expiry policy.
//!
//! Entries are evicted by age, not by capacity: every entry written to the
//! cache expires one fixed duration after the write, and a background
//! sweeper thread physically removes expired entries. There is no capacity
//! bound.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         TtlCache<K, V> Layout                       │
//! │                                                                     │
//! │   index: FxHashMap<K, TtlEntry>       queue: ExpiryHeap<K>          │
//! │          key → value,deadline,seq            earliest-deadline-first│
//! │                                                                     │
//! │   ┌─────────┬──────────────────┐      ┌──────────────────────────┐  │
//! │   │  Key    │ (value, t, seq)  │      │ ("a", t+10ms, seq=1)     │  │
//! │   ├─────────┼──────────────────┤      │ ("b", t+20ms, seq=2)     │  │
//! │   │  "a"    │ (.., t+50, 4)    │      │ ("a", t+50ms, seq=4) ←live│ │
//! │   │  "b"    │ (.., t+20, 2)    │      └──────────────────────────┘  │
//! │   └─────────┴──────────────────┘        seq 1 is stale: the index   │
//! │                                         says "a" is now seq 4       │
//! │                                                                     │
//! │   sweeper thread: every ttl/4 (min 50ms), pop expired + stale       │
//! │   heap entries until the earliest remaining entry is still live     │
//! └─────────────────────────────────────────────────────────────────────┘
//!
//! Entry States
//! ────────────
//!
//!   live                 now < deadline; returned by get
//!   expired-but-present  deadline passed, not yet swept; get says None,
//!                        still counted by len()
//!   absent               removed from index and heap
//! ```
//!
//! Reads never return expired data even when physical sweeping lags: `get`
//! re-checks the deadline on every hit. Conversely, physical removal may
//! lag expiry by up to roughly one sweep interval.
//!
//! ## Shutdown
//!
//! `stop` flips the stop flag under the write lock, clears both structures,
//! and then wakes the sweeper, which re-checks the flag at the top of every
//! iteration, after every wakeup, and once more under the write lock before
//! sweeping — whichever fires first, no cache state is mutated after `stop`
//! returns. Dropping the last handle stops the cache and joins the sweeper
//! thread, so no detached thread outlives it.
//!
//! ## Example Usage
//!
//! ```
//! use std::time::Duration;
//! use evictkit::traits::Cache;
//! use evictkit::policy::ttl::TtlCache;
//!
//! let cache: TtlCache<&str, i32> = TtlCache::new(Duration::from_secs(60));
//! cache.set("session", 42);
//!
//! // Within the ttl the value is served from cache.
//! assert_eq!(cache.get(&"session"), Some(42));
//! ```

use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, RwLock};
use rustc_hash::FxHashMap;

use crate::ds::expiry_heap::ExpiryHeap;
use crate::error::ConfigError;
use crate::traits::Cache;

/// Floor for the sweep period, so tiny TTLs do not busy-loop the sweeper.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug)]
struct TtlEntry<V> {
    value: V,
    deadline: Instant,
    /// Write sequence number; heap entries with an older seq for this key
    /// are stale.
    seq: u64,
}

#[derive(Debug)]
struct TtlInner<K, V> {
    index: FxHashMap<K, TtlEntry<V>>,
    queue: ExpiryHeap<K>,
    seq: u64,
}

impl<K, V> TtlInner<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Insert-or-overwrite under an already-held write lock. An overwrite
    /// leaves the superseded heap entry in place; it is skipped as stale
    /// when it surfaces.
    fn set_locked(&mut self, ttl: Duration, key: K, value: V, now: Instant) {
        self.seq += 1;
        let seq = self.seq;
        let deadline = now + ttl;
        self.index.insert(
            key.clone(),
            TtlEntry {
                value,
                deadline,
                seq,
            },
        );
        self.queue.push(key, deadline, seq);
    }
}

/// State shared between user handles and the sweeper thread.
#[derive(Debug)]
struct Shared<K, V> {
    inner: RwLock<TtlInner<K, V>>,
    stopped: AtomicBool,
    ttl: Duration,
    /// Gate mutex + condvar the sweeper parks on between passes; `stop`
    /// notifies through it so shutdown is observed before the next tick.
    sweeper_gate: Mutex<()>,
    sweeper_signal: Condvar,
}

impl<K, V> Shared<K, V>
where
    K: Clone + Eq + Hash,
{
    /// One sweep pass: pop stale and expired heap entries until the
    /// earliest remaining entry is live, removing expired ones from the
    /// index as well.
    fn sweep(&self, now: Instant) {
        enum Top {
            Expired,
            Stale,
            Live,
        }

        let mut inner = self.inner.write();
        // A stop that won the lock first has already cleared everything.
        if self.stopped.load(Ordering::Acquire) {
            return;
        }

        let state = &mut *inner;
        let mut removed = 0usize;
        loop {
            let top = match state.queue.peek() {
                None => break,
                Some((key, at, seq)) => match state.index.get(key) {
                    Some(entry) if entry.seq == seq => {
                        if at <= now {
                            Top::Expired
                        } else {
                            Top::Live
                        }
                    }
                    _ => Top::Stale,
                },
            };

            match top {
                Top::Live => break,
                Top::Expired => {
                    if let Some((key, _, _)) = state.queue.pop() {
                        state.index.remove(&key);
                        removed += 1;
                    }
                }
                Top::Stale => {
                    state.queue.pop();
                }
            }
        }

        if removed > 0 {
            tracing::trace!(
                removed,
                remaining = state.index.len(),
                "swept expired entries"
            );
        }
    }
}

/// Sweep period for a given ttl: a quarter of the ttl, floored at
/// [`MIN_SWEEP_INTERVAL`].
fn sweep_interval(ttl: Duration) -> Duration {
    (ttl / 4).max(MIN_SWEEP_INTERVAL)
}

fn run_sweeper<K, V>(shared: Arc<Shared<K, V>>, interval: Duration)
where
    K: Clone + Eq + Hash,
{
    tracing::debug!(interval_ms = interval.as_millis() as u64, "ttl sweeper started");
    let mut gate = shared.sweeper_gate.lock();
    loop {
        if shared.stopped.load(Ordering::Acquire) {
            break;
        }
        let _ = shared.sweeper_signal.wait_for(&mut gate, interval);
        if shared.stopped.load(Ordering::Acquire) {
            break;
        }
        shared.sweep(Instant::now());
    }
    tracing::debug!("ttl sweeper exited");
}

/// Time-based cache: every entry expires a fixed duration after it was
/// written, and a per-instance background thread sweeps expired entries.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash` (plus `Send + Sync +
///   'static` to construct, since keys are dropped on the sweeper thread)
/// - `V`: Value type, must be `Clone` to read (same `Send + Sync` note)
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use evictkit::traits::Cache;
/// use evictkit::policy::ttl::TtlCache;
///
/// let cache: TtlCache<String, String> = TtlCache::new(Duration::from_secs(30));
/// cache.set("token".to_string(), "abc123".to_string());
/// assert_eq!(cache.get(&"token".to_string()), Some("abc123".to_string()));
/// ```
#[derive(Debug)]
pub struct TtlCache<K, V>
where
    K: Clone + Eq + Hash,
{
    shared: Arc<Shared<K, V>>,
    sweeper: Option<JoinHandle<()>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Creates a new TTL cache. The ttl applies to every entry; items are
    /// not guaranteed to be purged at their exact deadline, but they are
    /// guaranteed never to be returned past it.
    ///
    /// # Panics
    ///
    /// Panics if `ttl` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use evictkit::policy::ttl::TtlCache;
    ///
    /// let cache: TtlCache<u64, String> = TtlCache::new(Duration::from_secs(300));
    /// assert_eq!(cache.ttl(), Duration::from_secs(300));
    /// ```
    pub fn new(ttl: Duration) -> Self {
        match Self::try_new(ttl) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a new TTL cache, returning an error instead of panicking on
    /// a zero ttl.
    pub fn try_new(ttl: Duration) -> Result<Self, ConfigError> {
        if ttl.is_zero() {
            return Err(ConfigError::new("ttl must be greater than 0"));
        }

        let shared = Arc::new(Shared {
            inner: RwLock::new(TtlInner {
                index: FxHashMap::default(),
                queue: ExpiryHeap::new(),
                seq: 0,
            }),
            stopped: AtomicBool::new(false),
            ttl,
            sweeper_gate: Mutex::new(()),
            sweeper_signal: Condvar::new(),
        });

        let interval = sweep_interval(ttl);
        let sweeper_shared = Arc::clone(&shared);
        let sweeper = thread::Builder::new()
            .name("evictkit-ttl-sweeper".into())
            .spawn(move || run_sweeper(sweeper_shared, interval))
            .expect("failed to spawn ttl sweeper thread");

        Ok(Self {
            shared,
            sweeper: Some(sweeper),
        })
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Returns the ttl applied to every entry.
    #[inline]
    pub fn ttl(&self) -> Duration {
        self.shared.ttl
    }

    /// Returns the number of entries not yet physically removed.
    ///
    /// Includes expired-but-present entries the sweeper has not reached;
    /// use [`contains`](Self::contains) for logical liveness.
    pub fn len(&self) -> usize {
        self.shared.inner.read().index.len()
    }

    /// Returns `true` if no entries are physically present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `key` is present and live (its deadline has not
    /// passed).
    pub fn contains(&self, key: &K) -> bool {
        let now = Instant::now();
        let inner = self.shared.inner.read();
        inner
            .index
            .get(key)
            .map(|entry| now < entry.deadline)
            .unwrap_or(false)
    }

    #[inline]
    fn assert_live(&self) {
        assert!(
            !self.shared.stopped.load(Ordering::Acquire),
            "cache is stopped"
        );
    }

    /// Idempotent teardown shared by `stop` and `Drop`.
    fn halt(&self) {
        {
            let mut inner = self.shared.inner.write();
            if self
                .shared
                .stopped
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                return;
            }
            inner.index.clear();
            inner.queue.clear();
        }

        // Wake the sweeper so it observes the flag now rather than at its
        // next tick. Taken after the write lock is released; the sweeper
        // acquires these two locks in the opposite order.
        let _gate = self.shared.sweeper_gate.lock();
        self.shared.sweeper_signal.notify_all();
        tracing::debug!(policy = "ttl", "cache stopped");
    }
}

impl<K, V> Cache<K, V> for TtlCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let inner = self.shared.inner.read();
        self.assert_live();
        let entry = inner.index.get(key)?;
        // Expired-but-present entries are invisible; removal is the
        // sweeper's job.
        if entry.deadline <= now {
            return None;
        }
        Some(entry.value.clone())
    }

    fn set(&self, key: K, value: V) {
        let now = Instant::now();
        let mut inner = self.shared.inner.write();
        self.assert_live();
        inner.set_locked(self.shared.ttl, key, value, now);
    }

    fn fetch<F, E>(&self, key: K, f: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let now = Instant::now();
        let mut inner = self.shared.inner.write();
        self.assert_live();

        if let Some(entry) = inner.index.get(&key) {
            if now < entry.deadline {
                return Ok(entry.value.clone());
            }
        }

        let value = f()?;
        inner.set_locked(self.shared.ttl, key, value.clone(), now);
        Ok(value)
    }

    fn stop(&self) {
        self.halt();
    }
}

impl<K, V> Drop for TtlCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn drop(&mut self) {
        self.halt();
        if let Some(handle) = self.sweeper.take() {
            let _ = handle.join();
        }
    }
}

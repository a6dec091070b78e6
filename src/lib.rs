//! evictkit: interchangeable cache eviction policies behind one contract.
//!
//! A collection of in-process caching algorithms with strong typing over
//! the key and value. The implementations are the purely "academic"
//! definitions of the algorithms — correctness-first and predictable;
//! more finely-tuned libraries might be a better fit for high-throughput
//! or high-storage use cases.
//!
//! Five engines implement the [`Cache`](traits::Cache) contract:
//!
//! | Engine | Evicts | Order structure |
//! |---|---|---|
//! | [`FifoCache`] | oldest inserted | singly linked queue |
//! | [`LifoCache`] | newest inserted | singly linked stack |
//! | [`LruCache`] | least recently used | doubly linked recency list |
//! | [`RandomCache`] | uniformly random | none (dense key pool) |
//! | [`TtlCache`] | entries past a fixed age | deadline min-heap + sweeper |
//!
//! In addition to `get` and `set`, every engine offers `fetch`, a
//! write-through operation that computes the value on miss and stores it:
//!
//! ```
//! use evictkit::traits::Cache;
//! use evictkit::policy::lru::LruCache;
//!
//! let lru: LruCache<String, String> = LruCache::new(15);
//!
//! let value: Result<String, std::io::Error> =
//!     lru.fetch("foo".to_string(), || Ok("bar".to_string()));
//! assert_eq!(value.unwrap(), "bar");
//! ```
//!
//! Every engine is internally synchronized; share one across threads with
//! `Arc`. The [`SyncCache`] decorator additionally serializes all
//! operations of any `Cache` implementation behind a single exclusive
//! lock:
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use evictkit::traits::Cache;
//! use evictkit::policy::lru::LruCache;
//!
//! let lru: Arc<LruCache<String, String>> = Arc::new(LruCache::new(15));
//! let worker = Arc::clone(&lru);
//! thread::spawn(move || worker.set("foo".to_string(), "bar".to_string()))
//!     .join()
//!     .unwrap();
//! ```
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod ds;
pub mod error;
pub mod policy;
pub mod sync;
pub mod traits;

pub use error::ConfigError;
pub use policy::fifo::FifoCache;
pub use policy::lifo::LifoCache;
pub use policy::lru::LruCache;
pub use policy::random::RandomCache;
pub use policy::ttl::TtlCache;
pub use sync::SyncCache;
pub use traits::Cache;

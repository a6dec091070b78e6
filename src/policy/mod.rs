//! Eviction engines, one module per policy.
//!
//! Every engine composes a key→entry index with a policy-specific order
//! structure behind the shared [`Cache`](crate::traits::Cache) contract,
//! owns its own lock and stop flag, and is safe to share across threads.

pub mod fifo;
pub mod lifo;
pub mod lru;
pub mod random;
pub mod ttl;

pub use fifo::FifoCache;
pub use lifo::LifoCache;
pub use lru::LruCache;
pub use random::RandomCache;
pub use ttl::TtlCache;

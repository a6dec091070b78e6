//! Error types for the evictkit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache construction parameters are invalid
//!   (zero capacity, zero TTL).
//!
//! Construction misuse is a programmer error, so the infallible `new`
//! constructors panic instead. The `try_new` variants exist for callers that
//! feed user-supplied configuration into a cache and want to surface the
//! problem as a value rather than a panic.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::error::ConfigError;
//! use evictkit::policy::lru::LruCache;
//!
//! // Fallible constructor for user-configurable parameters
//! let cache: Result<LruCache<String, i32>, ConfigError> = LruCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! // Invalid capacity is caught without panicking
//! let bad = LruCache::<String, i32>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

/// Error returned when cache construction parameters are invalid.
///
/// Produced by the fallible `try_new` constructors on every engine. Carries a
/// human-readable description of which parameter failed validation; the same
/// text is used as the panic message of the corresponding infallible
/// constructor.
///
/// # Example
///
/// ```
/// use evictkit::policy::fifo::FifoCache;
///
/// let err = FifoCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_message() {
        let err = ConfigError::new("capacity must be greater than 0");
        assert_eq!(err.to_string(), "capacity must be greater than 0");
    }

    #[test]
    fn debug_includes_message() {
        let err = ConfigError::new("bad ttl");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("bad ttl"));
    }

    #[test]
    fn message_accessor() {
        let err = ConfigError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }
}

//! Error types for the cache.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned by the `check_invariants` walks on
//!   [`RecencyList`](crate::list::RecencyList) and [`LruCache`](crate::LruCache)
//!   when the internal structure is inconsistent. Seeing one means the cache
//!   itself has a bug, not that it was misused.
//! - [`ConfigError`]: Returned when a cache is built from an invalid raw
//!   configuration (a zero capacity).
//!
//! Lookups that miss are not errors; they return `None`.
//!
//! ## Example Usage
//!
//! ```
//! use recency_cache::error::ConfigError;
//! use recency_cache::LruCache;
//!
//! let cache: Result<LruCache<&str, i32>, ConfigError> = LruCache::try_new(16);
//! assert!(cache.is_ok());
//!
//! let bad = LruCache::<&str, i32>::try_new(0);
//! assert!(bad.is_err());
//! ```

use alloc::string::String;
use core::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when the cache's internal invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
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

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`LruCache::try_new`](crate::LruCache::try_new) and
/// [`LruCacheConfig::try_from_capacity`](crate::config::LruCacheConfig::try_from_capacity).
///
/// # Example
///
/// ```
/// use recency_cache::LruCache;
///
/// let err = LruCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.message().contains("capacity"));
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

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

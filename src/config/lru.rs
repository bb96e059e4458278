//! Configuration for the Least Recently Used (LRU) cache.
//!
//! # Sizing Guidelines
//!
//! The cache is bounded by entry count only. Every entry occupies one arena
//! slot holding the key, the value and two links, plus one index entry holding
//! a second copy of the key and a handle:
//!
//! ```text
//! Total Memory ≈ capacity × (2 × size_of::<K>() + size_of::<V>() + overhead_per_entry)
//! overhead_per_entry ≈ 24-40 bytes (links, handle, hash table control bytes)
//! ```
//!
//! Slots are allocated lazily as entries are inserted and are recycled on
//! eviction, so a cache never holds more than `capacity` slots.
//!
//! # Examples
//!
//! ```
//! use recency_cache::config::LruCacheConfig;
//! use recency_cache::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(10_000).unwrap(),
//! };
//! let cache: LruCache<String, Vec<u8>> = LruCache::init(config, None);
//! assert_eq!(cache.cap().get(), 10_000);
//! ```

use crate::error::ConfigError;
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold. Fixed for the
///   lifetime of the cache.
///
/// A zero capacity cannot be expressed; use
/// [`try_from_capacity`](Self::try_from_capacity) to validate a raw `usize`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Builds a config from an unchecked capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `capacity` is zero.
    pub fn try_from_capacity(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| ConfigError::new("capacity must be greater than zero"))?;
        Ok(Self { capacity })
    }
}

impl From<NonZeroUsize> for LruCacheConfig {
    fn from(capacity: NonZeroUsize) -> Self {
        Self { capacity }
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_config_creation() {
        let config = LruCacheConfig {
            capacity: NonZeroUsize::new(1000).unwrap(),
        };
        assert_eq!(config.capacity.get(), 1000);
    }

    #[test]
    fn test_lru_config_try_from_capacity() {
        let config = LruCacheConfig::try_from_capacity(8).unwrap();
        assert_eq!(config.capacity.get(), 8);

        let err = LruCacheConfig::try_from_capacity(0).unwrap_err();
        assert_eq!(err.message(), "capacity must be greater than zero");
    }

    #[test]
    fn test_lru_config_from_non_zero() {
        let cap = NonZeroUsize::new(3).unwrap();
        assert_eq!(LruCacheConfig::from(cap), LruCacheConfig { capacity: cap });
    }
}

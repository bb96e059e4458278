//! Cache Configuration Module
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: A zero capacity is unrepresentable
//! - **No boilerplate**: No builder needed; a fallible constructor exists for raw input
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) | Least Recently Used |
//!
//! # Examples
//!
//! ```
//! use recency_cache::config::LruCacheConfig;
//! use recency_cache::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//!
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//! assert!(cache.is_empty());
//! ```

pub mod lru;

pub use lru::LruCacheConfig;

#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Structure
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                           LruCache<K, V>                             │
//! │                                                                      │
//! │   Index<K>                       RecencyList<K, V>                   │
//! │   ┌──────────────┐               ┌────────────────────────────────┐  │
//! │   │ key ─► Handle│──── slot ────►│ head ◄─► ... ◄─► ... ◄─► tail  │  │
//! │   └──────────────┘               │ (MRU)                   (LRU)  │  │
//! │                                  └────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Component | Module | Role |
//! |-----------|--------|------|
//! | [`LruCache`] | [`lru`] | Public API: get, put, eviction |
//! | [`Index`](index::Index) | [`index`] | Key to handle lookup |
//! | [`RecencyList`](list::RecencyList) | [`list`] | Recency order over arena slots |
//! | [`LruCacheConfig`](config::LruCacheConfig) | [`config`] | Construction parameters |
//!
//! ## Performance Characteristics
//!
//! | Operation | Cost | Allocates |
//! |-----------|------|-----------|
//! | `get` / `get_mut` hit | O(1) | never |
//! | `get` miss | O(1) | never |
//! | `put` existing key | O(1) | never |
//! | `put` new key | O(1) | only until the cache first fills |
//! | `remove` / `pop_lru` | O(1) | never |
//!
//! ## Example
//!
//! ```rust
//! use recency_cache::LruCache;
//! use recency_cache::config::LruCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(2).unwrap(),
//! };
//! let mut cache: LruCache<&str, i32> = LruCache::init(config, None);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // "a" becomes most recently used
//! cache.put("c", 3);    // "b" evicted (least recently used)
//! assert!(cache.get(&"b").is_none());
//! assert_eq!(cache.peek_head_key(), Some(&"c"));
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: the cache itself
//! - [`list`]: arena-backed recency list
//! - [`index`]: key to handle map
//! - [`config`]: configuration structures
//! - [`error`]: configuration and invariant errors

#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Cache configuration structures.
pub mod config;

/// Error types.
pub mod error;

/// Key to handle index.
///
/// Maps each live key to the [`Handle`](list::Handle) of its entry.
pub mod index;

/// Arena-backed doubly linked recency list.
///
/// Entries are linked by slot index rather than by pointer, so the list needs
/// no `unsafe` and a handle can be stored in the [`index`] without borrowing.
pub mod list;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used items when
/// the capacity is reached.
pub mod lru;

pub use config::LruCacheConfig;
pub use error::{ConfigError, InvariantError};
pub use list::Handle;
pub use lru::LruCache;

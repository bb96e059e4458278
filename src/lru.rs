//! Least Recently Used (LRU) Cache Implementation
//!
//! A fixed-capacity cache that evicts the entry which has gone the longest
//! without being read or written. Every public operation runs in O(1): a key
//! is resolved through the [`Index`] to a [`Handle`], and the
//! [`RecencyList`] relocates or removes that handle without traversal.
//!
//! # Algorithm
//!
//! ```text
//!   get(k) / put(k, v) on a present key
//!       index[k] ──► handle ──► move_to_head(handle)
//!
//!   put(k, v) on an absent key with len == capacity
//!       remove_tail() ──► (victim_key, _) ──► index.remove(victim_key)
//!       insert_at_head(k, v) ──► handle ──► index.insert(k, handle)
//! ```
//!
//! The list imposes a strict total order by last access, so there is always
//! exactly one eviction candidate.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Get: O(1)
//!   - Put: O(1)
//!   - Remove: O(1)
//!
//! - **Space Complexity**:
//!   - O(n) where n is the capacity of the cache
//!   - The key is stored twice (index and entry), so writes require `K: Clone`
//!
//! Hits never allocate. A miss that inserts allocates a slot only until the
//! cache first fills up; after that every insertion reuses the evicted slot.
//!
//! # Thread Safety
//!
//! The cache is `Send` and `Sync` when its keys, values and hasher are, but
//! every read mutates the recency order and so needs `&mut self`. Wrap it in
//! a `Mutex` to share it between threads.

use crate::config::LruCacheConfig;
use crate::error::{ConfigError, InvariantError};
use crate::index::{DefaultHashBuilder, Index};
use crate::list::{Handle, Iter, RecencyList};
use alloc::format;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use tracing::{debug, trace};

/// Upper bound on the number of slots reserved up front.
const PREALLOCATE_LIMIT: usize = 4096;

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, and updating entries. When the cache reaches capacity,
/// the least recently used entry will be evicted to make room for new entries.
///
/// # Examples
///
/// ```
/// use recency_cache::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// // Add items to the cache
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.peek_head_key(), Some(&"apple"));
///
/// // Adding beyond capacity evicts the least recently used item
/// assert_eq!(cache.put("cherry", 3), Some(("banana", 2)));
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
#[derive(Clone)]
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: RecencyList<K, V>,
    index: Index<K, S>,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a new LRU cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(cap, DefaultHashBuilder::default())
    }

    /// Creates a new LRU cache from an unchecked capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `cap` is zero.
    pub fn try_new(cap: usize) -> Result<LruCache<K, V, DefaultHashBuilder>, ConfigError> {
        let config = LruCacheConfig::try_from_capacity(cap)?;
        Ok(LruCache::init(config, None))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache from a config, using `hasher` or the default
    /// hash builder when `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use recency_cache::config::LruCacheConfig;
    /// use recency_cache::LruCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let config = LruCacheConfig {
    ///     capacity: NonZeroUsize::new(100).unwrap(),
    /// };
    /// let mut cache: LruCache<u64, String> = LruCache::init(config, None);
    /// cache.put(1, "one".to_string());
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn init(config: LruCacheConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self::from_parts(config, hasher.unwrap_or_default())
    }

    /// Creates a new LRU cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        Self::from_parts(LruCacheConfig::from(cap), hash_builder)
    }

    fn from_parts(config: LruCacheConfig, hash_builder: S) -> Self {
        let reserve = config.capacity.get().min(PREALLOCATE_LIMIT);
        debug!(capacity = config.capacity.get(), "creating LRU cache");
        LruCache {
            config,
            list: RecencyList::with_capacity(reserve),
            index: Index::with_capacity_and_hasher(reserve, hash_builder),
        }
    }

    /// Maximum number of entries.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Current number of entries. Never exceeds [`cap`](Self::cap).
    #[inline]
    pub fn len(&self) -> usize {
        let len = self.list.len();
        debug_assert!(len <= self.config.capacity.get());
        len
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss returns `None` and leaves the order untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.promote(key)?;
        self.list.get(handle).map(|(_, v)| v)
    }

    /// Like [`get`](Self::get), but returns a mutable reference.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.promote(key)?;
        self.list.get_mut(handle)
    }

    /// Returns the value for `key` without touching the recency order.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.index.lookup(key)?;
        self.list.get(handle).map(|(_, v)| v)
    }

    /// Returns `true` if `key` is cached, without touching the recency order.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains(key)
    }

    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// Returns:
    /// - `Some((key, old_value))` when `key` was present and its value replaced,
    /// - `Some((evicted_key, evicted_value))` when inserting evicted the least
    ///   recently used entry,
    /// - `None` otherwise.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        if let Some(handle) = self.index.lookup(&key) {
            let old_value = self.list.replace_value(handle, value);
            let promoted = self.list.move_to_head(handle);
            debug_assert!(promoted, "index holds a handle the list does not");
            self.debug_check();
            return old_value.map(|old| (key, old));
        }

        let evicted = if self.list.len() == self.config.capacity.get() {
            self.pop_lru()
        } else {
            None
        };

        let handle = self.list.insert_at_head(key.clone(), value);
        let previous = self.index.insert(key, handle);
        debug_assert!(previous.is_none(), "key was indexed twice");
        self.debug_check();
        evicted
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.index.remove(key)?;
        let removed = self.list.remove(handle);
        debug_assert!(removed.is_some(), "index held a stale handle");
        self.debug_check();
        removed.map(|(_, v)| v)
    }

    /// Evicts and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.remove_tail()?;
        let unindexed = self.index.remove(&key);
        debug_assert!(unindexed.is_some(), "recency list held an unindexed key");
        trace!(
            len = self.list.len(),
            capacity = self.config.capacity.get(),
            "evicted least recently used entry"
        );
        self.debug_check();
        Some((key, value))
    }

    /// The least recently used entry, i.e. the next eviction victim.
    #[inline]
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.peek_tail()
    }

    /// The most recently used entry.
    #[inline]
    pub fn peek_head(&self) -> Option<(&K, &V)> {
        self.list.peek_head()
    }

    /// Key of the most recently used entry; `None` on an empty cache.
    #[inline]
    pub fn peek_head_key(&self) -> Option<&K> {
        self.peek_head().map(|(k, _)| k)
    }

    /// Value of the most recently used entry; `None` on an empty cache.
    #[inline]
    pub fn peek_head_value(&self) -> Option<&V> {
        self.peek_head().map(|(_, v)| v)
    }

    /// Drops every entry. The capacity is unchanged.
    pub fn clear(&mut self) {
        debug!(len = self.list.len(), "clearing LRU cache");
        self.list.clear();
        self.index.clear();
    }

    /// Iterates from most to least recently used without changing the order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.list.iter()
    }

    /// Verifies the whole structure: list links, capacity bound, and that
    /// index and list hold the same keys.
    ///
    /// This walks every entry; it is meant for tests and debugging.
    ///
    /// # Errors
    ///
    /// Returns an [`InvariantError`] naming the first broken invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;

        let cap = self.config.capacity.get();
        if self.list.len() > cap {
            return Err(InvariantError::new(format!(
                "cache holds {} entries but capacity is {}",
                self.list.len(),
                cap
            )));
        }
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index has {} keys but recency list has {} entries",
                self.index.len(),
                self.list.len()
            )));
        }
        for (key, handle) in self.index.handles() {
            match self.list.get(handle) {
                Some((entry_key, _)) if entry_key == key => {}
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "index maps a key to slot {} which holds a different key",
                        handle.index()
                    )))
                }
                None => {
                    return Err(InvariantError::new(format!(
                        "index maps a key to stale or vacant slot {}",
                        handle.index()
                    )))
                }
            }
        }
        Ok(())
    }

    fn promote<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.index.lookup(key)?;
        let promoted = self.list.move_to_head(handle);
        debug_assert!(promoted, "index holds a handle the list does not");
        Some(handle)
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert!(
            self.list.len() <= self.config.capacity.get(),
            "cache holds {} entries but capacity is {}",
            self.list.len(),
            self.config.capacity.get()
        );
        debug_assert_eq!(
            self.list.len(),
            self.index.len(),
            "index and recency list disagree on size"
        );
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> Extend<(K, V)> for LruCache<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.list.len())
            .finish()
    }
}

//! Key to [`Handle`] index.
//!
//! A thin wrapper over a hash map. It never owns entries, only the handles the
//! [`RecencyList`](crate::list::RecencyList) hands out, so resolving a key to
//! its entry is one hash lookup followed by one slot access.

use crate::list::Handle;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};

/// Hash builder used when none is supplied.
#[cfg(feature = "hashbrown")]
pub use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

/// Hash builder used when none is supplied.
#[cfg(not(feature = "hashbrown"))]
pub use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Maps each live key to the handle of its entry.
#[derive(Clone)]
pub struct Index<K, S = DefaultHashBuilder> {
    map: HashMap<K, Handle, S>,
}

impl<K: Hash + Eq> Index<K> {
    /// Creates an empty index with the default hasher.
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(0, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq> Default for Index<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, S: BuildHasher> Index<K, S> {
    /// Creates an empty index that can hold `capacity` keys without rehashing.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Index {
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Number of indexed keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no key is indexed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Resolves `key` to its handle.
    #[inline]
    pub fn lookup<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).copied()
    }

    /// Returns `true` if `key` is indexed.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Registers `key` under `handle`.
    ///
    /// An existing mapping is overwritten and its handle returned; callers are
    /// expected to look the key up first.
    #[inline]
    pub fn insert(&mut self, key: K, handle: Handle) -> Option<Handle> {
        self.map.insert(key, handle)
    }

    /// Forgets `key`. Absent keys are ignored.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.remove(key)
    }

    /// Forgets every key, keeping the allocated table.
    #[inline]
    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub(crate) fn handles(&self) -> impl Iterator<Item = (&K, Handle)> + '_ {
        self.map.iter().map(|(k, h)| (k, *h))
    }
}

impl<K: fmt::Debug, S> fmt::Debug for Index<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.map.iter().map(|(k, h)| (k, h.index())))
            .finish()
    }
}

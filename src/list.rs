//! Arena-backed doubly linked recency list.
//!
//! Entries live in a `Vec` of slots and link to each other by slot index
//! instead of by pointer; "no neighbour" is a sentinel index. Vacant slots
//! form an intrusive free chain so that a slot released by eviction is reused
//! by the next insertion.
//!
//! ```text
//!   slots
//!   ┌───────┬─────┬──────────────────────────────────────────────┐
//!   │ index │ gen │ Slot                                         │
//!   ├───────┼─────┼──────────────────────────────────────────────┤
//!   │ 0     │ 0   │ Occupied { k: A, prev: NIL, next: 2 }        │
//!   │ 1     │ 3   │ Vacant   { next_free: NIL }                  │
//!   │ 2     │ 1   │ Occupied { k: B, prev: 0,   next: 3 }        │
//!   │ 3     │ 0   │ Occupied { k: C, prev: 2,   next: NIL }      │
//!   └───────┴─────┴──────────────────────────────────────────────┘
//!
//!   head ─► [0] ◄──► [2] ◄──► [3] ◄── tail        free ─► [1]
//!   (most recently used)      (least recently used)
//! ```
//!
//! ## Operations
//! - `insert_at_head`: O(1), allocates only when no vacant slot exists
//! - `move_to_head`: O(1) splice; no-op for the current head
//! - `remove_tail` / `remove`: O(1), the slot joins the free chain
//! - `iter`: O(n), head to tail
//!
//! ## Handles
//!
//! A [`Handle`] pairs a slot index with the slot's generation. Every time a
//! slot is released its generation is bumped, so a handle to a removed entry
//! resolves to nothing even after the slot has been reused. Generations are
//! `u32` and wrap; a handle kept across 2^32 reuses of one slot can alias.

use crate::error::InvariantError;
use alloc::format;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;

/// Link value for "no slot".
const NIL: usize = usize::MAX;

/// Position of an entry inside a [`RecencyList`].
///
/// Only valid for the entry it was returned for. Once that entry is removed
/// the handle stops resolving, whether or not the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u32,
}

impl Handle {
    /// Sentinel that never refers to an entry.
    pub const NIL: Handle = Handle {
        index: NIL,
        generation: 0,
    };

    /// Returns the slot index this handle refers to.
    #[inline]
    pub fn index(self) -> usize {
        self.index
    }

    /// Returns the slot generation this handle was issued for.
    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }

    /// Returns `true` for [`Handle::NIL`].
    #[inline]
    pub fn is_nil(self) -> bool {
        self.index == NIL
    }
}

/// A key-value pair plus its links in the recency order.
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    key: K,
    value: V,
    prev: usize,
    next: usize,
}

impl<K, V> Entry<K, V> {
    /// The entry's key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The entry's value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }
}

#[derive(Debug, Clone)]
enum Slot<K, V> {
    Occupied { generation: u32, entry: Entry<K, V> },
    Vacant { generation: u32, next_free: usize },
}

impl<K, V> Slot<K, V> {
    #[inline]
    fn generation(&self) -> u32 {
        match self {
            Slot::Occupied { generation, .. } | Slot::Vacant { generation, .. } => *generation,
        }
    }
}

/// Recency-ordered sequence of entries, most recently used at the head.
#[derive(Clone)]
pub struct RecencyList<K, V> {
    slots: Vec<Slot<K, V>>,
    head: usize,
    tail: usize,
    free: usize,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` entries before the slot
    /// vector reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        RecencyList {
            slots: Vec::with_capacity(capacity),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    /// Returns the number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the most recently used entry.
    #[inline]
    pub fn head(&self) -> Option<Handle> {
        self.handle_at(self.head)
    }

    /// Handle of the least recently used entry.
    #[inline]
    pub fn tail(&self) -> Option<Handle> {
        self.handle_at(self.tail)
    }

    /// Returns `true` if `handle` refers to a live entry.
    #[inline]
    pub fn contains(&self, handle: Handle) -> bool {
        self.entry(handle).is_some()
    }

    /// Returns the entry behind `handle`, if it is live.
    #[inline]
    pub fn entry(&self, handle: Handle) -> Option<&Entry<K, V>> {
        match self.slots.get(handle.index) {
            Some(Slot::Occupied { generation, entry }) if *generation == handle.generation => {
                Some(entry)
            }
            _ => None,
        }
    }

    /// Returns the key and value behind `handle` without changing the order.
    #[inline]
    pub fn get(&self, handle: Handle) -> Option<(&K, &V)> {
        self.entry(handle).map(|entry| (&entry.key, &entry.value))
    }

    /// Returns a mutable reference to the value behind `handle`.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut V> {
        match self.slots.get_mut(handle.index) {
            Some(Slot::Occupied { generation, entry }) if *generation == handle.generation => {
                Some(&mut entry.value)
            }
            _ => None,
        }
    }

    /// Replaces the value behind `handle` in place, returning the old value.
    ///
    /// The entry keeps its position; callers promote it separately.
    pub fn replace_value(&mut self, handle: Handle, value: V) -> Option<V> {
        self.get_mut(handle).map(|slot| mem::replace(slot, value))
    }

    /// Most recently used key and value.
    #[inline]
    pub fn peek_head(&self) -> Option<(&K, &V)> {
        self.occupied(self.head).map(|entry| (&entry.key, &entry.value))
    }

    /// Least recently used key and value.
    #[inline]
    pub fn peek_tail(&self) -> Option<(&K, &V)> {
        self.occupied(self.tail).map(|entry| (&entry.key, &entry.value))
    }

    /// Creates a new entry and makes it the most recently used one.
    ///
    /// Returns the handle under which the entry can be found until it is
    /// removed.
    pub fn insert_at_head(&mut self, key: K, value: V) -> Handle {
        let handle = self.alloc(Entry {
            key,
            value,
            prev: NIL,
            next: NIL,
        });
        self.attach_head(handle.index);
        self.len += 1;
        self.debug_check_ends();
        handle
    }

    /// Moves a live entry to the head without touching its value.
    ///
    /// Returns `false` if `handle` does not refer to a live entry.
    pub fn move_to_head(&mut self, handle: Handle) -> bool {
        if !self.contains(handle) {
            return false;
        }
        if self.head == handle.index {
            return true;
        }

        // Detaching the tail promotes its predecessor to tail; an interior
        // entry is spliced out between its neighbours.
        self.detach(handle.index);
        self.attach_head(handle.index);
        self.debug_check_ends();
        true
    }

    /// Detaches the least recently used entry and returns its key and value.
    ///
    /// Returns `None` on an empty list.
    pub fn remove_tail(&mut self) -> Option<(K, V)> {
        let handle = self.tail()?;
        self.remove(handle)
    }

    /// Detaches the entry behind `handle` and returns its key and value.
    ///
    /// Returns `None` if `handle` does not refer to a live entry.
    pub fn remove(&mut self, handle: Handle) -> Option<(K, V)> {
        if !self.contains(handle) {
            return None;
        }
        self.detach(handle.index);
        self.len -= 1;
        let entry = self.release(handle.index);
        self.debug_check_ends();
        Some((entry.key, entry.value))
    }

    /// Drops every entry.
    ///
    /// Slots are kept for reuse and their generations bumped, so handles
    /// issued before the call no longer resolve.
    pub fn clear(&mut self) {
        let mut free = NIL;
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            let generation = match slot {
                Slot::Occupied { generation, .. } => generation.wrapping_add(1),
                Slot::Vacant { generation, .. } => *generation,
            };
            *slot = Slot::Vacant {
                generation,
                next_free: free,
            };
            free = index;
        }
        self.free = free;
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }

    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Walks the whole list and verifies its structure.
    ///
    /// This is O(n) plus O(slots); use it in tests and debugging only.
    ///
    /// # Errors
    ///
    /// Returns an [`InvariantError`] naming the first broken invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.len == 0 {
            if self.head != NIL || self.tail != NIL {
                return Err(InvariantError::new(
                    "empty recency list must have no head and no tail",
                ));
            }
        } else if self.head == NIL || self.tail == NIL {
            return Err(InvariantError::new(format!(
                "recency list of length {} is missing its head or tail",
                self.len
            )));
        }
        if self.len == 1 && self.head != self.tail {
            return Err(InvariantError::new(
                "single-entry recency list must have head == tail",
            ));
        }

        let mut count = 0usize;
        let mut prev = NIL;
        let mut current = self.head;
        while current != NIL {
            let entry = self.occupied(current).ok_or_else(|| {
                InvariantError::new(format!("link to vacant slot {}", current))
            })?;
            if entry.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {} has prev {}, expected {}",
                    current, entry.prev, prev
                )));
            }
            count += 1;
            if count > self.len {
                return Err(InvariantError::new(
                    "recency list is longer than its length (cycle?)",
                ));
            }
            prev = current;
            current = entry.next;
        }
        if prev != self.tail {
            return Err(InvariantError::new(format!(
                "walk ended at slot {} but tail is slot {}",
                prev, self.tail
            )));
        }
        if count != self.len {
            return Err(InvariantError::new(format!(
                "walked {} entries but length is {}",
                count, self.len
            )));
        }

        let occupied = self
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied { .. }))
            .count();
        if occupied != self.len {
            return Err(InvariantError::new(format!(
                "{} occupied slots but length is {}",
                occupied, self.len
            )));
        }

        let mut vacant = 0usize;
        let mut current = self.free;
        while current != NIL {
            match self.slots.get(current) {
                Some(Slot::Vacant { next_free, .. }) => current = *next_free,
                _ => {
                    return Err(InvariantError::new(format!(
                        "free chain reaches non-vacant slot {}",
                        current
                    )))
                }
            }
            vacant += 1;
            if vacant > self.slots.len() {
                return Err(InvariantError::new("free chain contains a cycle"));
            }
        }
        if vacant + self.len != self.slots.len() {
            return Err(InvariantError::new(format!(
                "{} vacant + {} live slots do not account for {} slots",
                vacant,
                self.len,
                self.slots.len()
            )));
        }

        Ok(())
    }

    fn handle_at(&self, index: usize) -> Option<Handle> {
        match self.slots.get(index) {
            Some(Slot::Occupied { generation, .. }) => Some(Handle {
                index,
                generation: *generation,
            }),
            _ => None,
        }
    }

    #[inline]
    fn occupied(&self, index: usize) -> Option<&Entry<K, V>> {
        match self.slots.get(index) {
            Some(Slot::Occupied { entry, .. }) => Some(entry),
            _ => None,
        }
    }

    fn alloc(&mut self, entry: Entry<K, V>) -> Handle {
        if self.free == NIL {
            self.slots.push(Slot::Occupied {
                generation: 0,
                entry,
            });
            return Handle {
                index: self.slots.len() - 1,
                generation: 0,
            };
        }
        let index = self.free;
        let generation = self.slots[index].generation();
        let occupied = Slot::Occupied { generation, entry };
        match mem::replace(&mut self.slots[index], occupied) {
            Slot::Vacant { next_free, .. } => self.free = next_free,
            Slot::Occupied { .. } => panic!("free chain points at occupied slot {}", index),
        }
        Handle { index, generation }
    }

    fn release(&mut self, index: usize) -> Entry<K, V> {
        let generation = self.slots[index].generation().wrapping_add(1);
        let vacant = Slot::Vacant {
            generation,
            next_free: self.free,
        };
        match mem::replace(&mut self.slots[index], vacant) {
            Slot::Occupied { entry, .. } => {
                self.free = index;
                entry
            }
            Slot::Vacant { .. } => panic!("released vacant slot {}", index),
        }
    }

    fn node(&self, index: usize) -> &Entry<K, V> {
        match self.occupied(index) {
            Some(entry) => entry,
            None => panic!("recency list links to vacant slot {}", index),
        }
    }

    fn node_mut(&mut self, index: usize) -> &mut Entry<K, V> {
        match self.slots.get_mut(index) {
            Some(Slot::Occupied { entry, .. }) => entry,
            _ => panic!("recency list links to vacant slot {}", index),
        }
    }

    fn detach(&mut self, index: usize) {
        let (prev, next) = {
            let entry = self.node(index);
            (entry.prev, entry.next)
        };

        if prev == NIL {
            self.head = next;
        } else {
            self.node_mut(prev).next = next;
        }

        if next == NIL {
            self.tail = prev;
        } else {
            self.node_mut(next).prev = prev;
        }

        let entry = self.node_mut(index);
        entry.prev = NIL;
        entry.next = NIL;
    }

    fn attach_head(&mut self, index: usize) {
        let old_head = self.head;
        {
            let entry = self.node_mut(index);
            entry.prev = NIL;
            entry.next = old_head;
        }
        if old_head == NIL {
            self.tail = index;
        } else {
            self.node_mut(old_head).prev = index;
        }
        self.head = index;
    }

    #[inline]
    fn debug_check_ends(&self) {
        debug_assert_eq!(self.head == NIL, self.len == 0);
        debug_assert_eq!(self.tail == NIL, self.len == 0);
        debug_assert!(self.len != 1 || self.head == self.tail);
        debug_assert!(self.head == NIL || self.node(self.head).prev == NIL);
        debug_assert!(self.tail == NIL || self.node(self.tail).next == NIL);
    }
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RecencyList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over a [`RecencyList`], most recently used first.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.list.occupied(self.front)?;
        self.front = entry.next;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.list.occupied(self.back)?;
        self.back = entry.prev;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

//! Mutex-guarded slot map with stable handles.

use parking_lot::Mutex;
use slotmap::{Key, SlotMap};

/// Keyed collection that hands out stable handles for its elements.
///
/// Insertion returns a key that stays valid until that exact element
/// is removed; removing or compacting other elements never invalidates
/// it. A key whose element is gone simply stops resolving, so stale
/// handles degrade to no-ops instead of dangling.
///
/// Locking and reentrancy follow the same contract as
/// [`SharedVec`](super::SharedVec): operations take `&self`, hold the
/// internal lock for their duration, and visitors must not call back
/// into the same map.
#[derive(Debug)]
pub struct SharedSlotMap<K: Key, V> {
    slots: Mutex<SlotMap<K, V>>,
}

impl<K: Key, V> SharedSlotMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Inserts an element and returns its handle.
    pub fn insert(&self, value: V) -> K {
        self.slots.lock().insert(value)
    }

    /// Removes the element behind `key`, returning it if the handle
    /// still resolved.
    pub fn remove(&self, key: K) -> Option<V> {
        self.slots.lock().remove(key)
    }

    /// True while `key` still resolves to a live element.
    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.slots.lock().contains_key(key)
    }

    /// Runs `read` against the element behind `key`, if it resolves.
    pub fn with<F, R>(&self, key: K, read: F) -> Option<R>
    where
        F: FnOnce(&V) -> R,
    {
        self.slots.lock().get(key).map(read)
    }

    /// Visits every live element.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(K, &V),
    {
        for (key, value) in self.slots.lock().iter() {
            visit(key, value);
        }
    }

    /// Visits every live element mutably.
    pub fn for_each_mut<F>(&self, mut visit: F)
    where
        F: FnMut(K, &mut V),
    {
        for (key, value) in self.slots.lock().iter_mut() {
            visit(key, value);
        }
    }

    /// Drops every element for which `keep` returns false.
    pub fn retain<F>(&self, keep: F)
    where
        F: FnMut(K, &mut V) -> bool,
    {
        self.slots.lock().retain(keep);
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// True when no elements are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

impl<K: Key, V> Default for SharedSlotMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

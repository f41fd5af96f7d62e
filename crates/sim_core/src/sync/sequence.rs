//! Mutex-guarded ordered collection.

use parking_lot::Mutex;

/// Growable ordered collection that may be appended to and visited
/// from any thread.
///
/// Elements keep insertion order. All operations lock the whole
/// collection, so a visitor passed to [`for_each`](Self::for_each) or
/// [`for_each_mut`](Self::for_each_mut) sees every element exactly as
/// some earlier operation left it; elements are never observed
/// half-written.
///
/// Visitors run under the lock and must not touch this collection
/// again, on any thread path that the visitor blocks on.
#[derive(Debug, Default)]
pub struct SharedVec<T> {
    items: Mutex<Vec<T>>,
}

impl<T> SharedVec<T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    /// Creates an empty collection with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Appends an element at the back.
    pub fn push(&self, value: T) {
        self.items.lock().push(value);
    }

    /// Visits every element in insertion order.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        for item in self.items.lock().iter() {
            visit(item);
        }
    }

    /// Visits every element mutably in insertion order.
    pub fn for_each_mut<F>(&self, mut visit: F)
    where
        F: FnMut(&mut T),
    {
        for item in self.items.lock().iter_mut() {
            visit(item);
        }
    }

    /// Drops every element for which `keep` returns false.
    pub fn retain<F>(&self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.items.lock().retain(keep);
    }

    /// Number of elements currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// True when no elements are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

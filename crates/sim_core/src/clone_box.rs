//! Value-semantic ownership of trait objects.

use std::fmt;
use std::ops::{Deref, DerefMut};

/// Owning box over a (usually unsized) value with deep-copy semantics.
///
/// `CloneBox<dyn Trait>` behaves like a plain value: cloning it clones
/// the boxed object itself, moving it transfers ownership, and the
/// copies never share state afterwards. The only requirement is that
/// `Box<T>` implements `Clone`, which object-safe traits provide via
/// the usual `clone_boxed` blanket pattern.
///
/// Method calls pass through [`Deref`]/[`DerefMut`] to the boxed value.
pub struct CloneBox<T: ?Sized>
where
    Box<T>: Clone,
{
    value: Box<T>,
}

impl<T: ?Sized> CloneBox<T>
where
    Box<T>: Clone,
{
    /// Wraps an already boxed value.
    #[must_use]
    pub fn new(value: Box<T>) -> Self {
        Self { value }
    }

    /// Unwraps the inner box.
    #[must_use]
    pub fn into_inner(self) -> Box<T> {
        self.value
    }
}

impl<T: ?Sized> Clone for CloneBox<T>
where
    Box<T>: Clone,
{
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
        }
    }
}

impl<T: ?Sized> Deref for CloneBox<T>
where
    Box<T>: Clone,
{
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: ?Sized> DerefMut for CloneBox<T>
where
    Box<T>: Clone,
{
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: ?Sized> From<Box<T>> for CloneBox<T>
where
    Box<T>: Clone,
{
    fn from(value: Box<T>) -> Self {
        Self::new(value)
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for CloneBox<T>
where
    Box<T>: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

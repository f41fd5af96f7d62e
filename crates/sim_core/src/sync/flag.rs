//! Set-once boolean flag.

use std::sync::atomic::{AtomicBool, Ordering};

/// Atomic flag that starts clear and can only ever be raised.
///
/// Used for latched conditions that never revert, such as marking an
/// entity for removal or ending a round. Cloning captures the current
/// value, so a copy of a raised flag stays raised while the copy of a
/// clear flag remains independently writable.
#[derive(Debug, Default)]
pub struct OnceFlag(AtomicBool);

impl OnceFlag {
    /// Creates a clear flag.
    #[must_use]
    pub fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Raises the flag. Idempotent.
    pub fn set(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns true once the flag has been raised.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Clone for OnceFlag {
    fn clone(&self) -> Self {
        Self(AtomicBool::new(self.is_set()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_clear() {
        assert!(!OnceFlag::new().is_set());
    }

    #[test]
    fn test_set_is_idempotent() {
        let flag = OnceFlag::new();
        flag.set();
        flag.set();
        assert!(flag.is_set());
    }

    #[test]
    fn test_clone_captures_value() {
        let raised = OnceFlag::new();
        raised.set();
        assert!(raised.clone().is_set());

        let clear = OnceFlag::new();
        let copy = clear.clone();
        copy.set();
        assert!(copy.is_set());
        assert!(!clear.is_set());
    }
}

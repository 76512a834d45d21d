//! Open-on-first-entry, close-on-last-exit.

use std::ops::{Deref, DerefMut};

/// Side effects to run at the outermost scope boundary.
///
/// Both methods default to no-ops; implementors supply the real behavior
/// (acquire and release a resource, install and remove a hook).
pub trait OpenClose {
    fn open(&mut self) {}

    fn close(&mut self) {}
}

/// Nesting-aware wrapper around an [`OpenClose`] value: `open()` fires
/// only when the depth goes 0→1 and `close()` only when it returns to 0,
/// so nested scopes on the same instance run the side effects exactly once
/// at the outermost boundary.
///
/// If `open()` panics the depth stays at 0 and `close()` will not run:
/// the scope was never entered. Once a scope is entered, `close()` at
/// the final exit is guaranteed even if the closure panics.
///
/// Not thread-safe: the depth counter is a plain integer, matching the
/// single-threaded nested-scope use case. Wrap the whole interval in your
/// own lock if threads are involved.
#[derive(Debug, Default)]
pub struct Reentrant<T> {
    inner: T,
    depth: usize,
}

impl<T: OpenClose> Reentrant<T> {
    pub fn new(inner: T) -> Self {
        Reentrant { inner, depth: 0 }
    }

    /// Current nesting depth; 0 when no scope is active.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_active(&self) -> bool {
        self.depth > 0
    }

    /// Consume the wrapper. Any active scope is abandoned without running
    /// `close()`, so call this only at depth 0.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Run `f` with this wrapper lent back to it, so scopes nest by
    /// calling `scope` again on the closure argument.
    pub fn scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        if self.depth == 0 {
            log::trace!("entering outermost scope, running open()");
            self.inner.open();
        }
        self.depth += 1;
        let mut guard = ExitGuard(self);
        f(&mut *guard.0)
    }
}

struct ExitGuard<'a, T: OpenClose>(&'a mut Reentrant<T>);

impl<T: OpenClose> Drop for ExitGuard<'_, T> {
    fn drop(&mut self) {
        self.0.depth -= 1;
        if self.0.depth == 0 {
            log::trace!("left outermost scope, running close()");
            self.0.inner.close();
        }
    }
}

impl<T> Deref for Reentrant<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> DerefMut for Reentrant<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reentrant mutual exclusion for operator state.
//!
//! Operators that are entered from more than one source (or from a producer
//! calling back on several threads) keep their mutable state in a
//! [`ReentrantLock`]. The lock is held across both the state update and the
//! downstream dispatch, so events leave an operator in the order its state saw
//! them. Reentrancy lets a downstream observer synchronously push back into
//! the same operator on the same thread.
//!
//! The state itself sits in a `RefCell`: borrow it only for the update and
//! release the borrow before calling any observer.
//!
//! ```
//! use rivulet_core::ReentrantLock;
//!
//! let counter = ReentrantLock::new(0_u32);
//! let guard = counter.lock();
//! let value = {
//!     let mut count = guard.borrow_mut();
//!     *count += 1;
//!     *count
//! };
//! // dispatch `value` here, still serialized by `guard`
//! assert_eq!(value, 1);
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::cell::RefCell;
use std::fmt;

/// A reentrant lock guarding a piece of operator state.
pub struct ReentrantLock<S> {
    inner: ReentrantMutex<RefCell<S>>,
}

impl<S> ReentrantLock<S> {
    /// Wraps `state` in a new lock.
    pub fn new(state: S) -> Self {
        Self {
            inner: ReentrantMutex::new(RefCell::new(state)),
        }
    }

    /// Acquires the lock. The same thread may acquire it again while holding it.
    pub fn lock(&self) -> ReentrantMutexGuard<'_, RefCell<S>> {
        self.inner.lock()
    }

    /// Runs `update` on the state under the lock.
    ///
    /// `update` must not call back into observers.
    pub fn with<R>(&self, update: impl FnOnce(&mut S) -> R) -> R {
        let guard = self.inner.lock();
        let mut state = guard.borrow_mut();
        update(&mut *state)
    }
}

impl<S: Default> Default for ReentrantLock<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> fmt::Debug for ReentrantLock<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReentrantLock").finish_non_exhaustive()
    }
}

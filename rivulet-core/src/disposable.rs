// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cancellation handles.
//!
//! Every subscription returns a [`Disposer`]. Disposing it stops the producer
//! from doing further work. All variants are idempotent and safe to dispose
//! concurrently from several threads.
//!
//! # Example
//!
//! ```
//! use rivulet_core::{ActionDisposable, CompositeDisposable, Disposable};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let released = Arc::new(AtomicUsize::new(0));
//! let composite = CompositeDisposable::new();
//!
//! for _ in 0..2 {
//!     let released = released.clone();
//!     composite.add(ActionDisposable::arc(move || {
//!         released.fetch_add(1, Ordering::SeqCst);
//!     }));
//! }
//!
//! composite.dispose();
//! composite.dispose();
//! assert_eq!(released.load(Ordering::SeqCst), 2);
//! ```

use parking_lot::Mutex;
use std::fmt;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A handle that can cancel the work it represents.
pub trait Disposable: Send + Sync {
    /// Cancels the work. Calling it more than once has no further effect.
    fn dispose(&self);

    /// Returns `true` once `dispose` has been called.
    fn is_disposed(&self) -> bool;
}

/// Shared, type-erased cancellation handle returned by subscriptions.
pub type Disposer = Arc<dyn Disposable>;

/// A disposable that cannot be disposed. Used by producers that hold no resources.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonDisposable;

impl NonDisposable {
    /// Returns a shared handle.
    pub fn arc() -> Disposer {
        Arc::new(NonDisposable)
    }
}

impl Disposable for NonDisposable {
    fn dispose(&self) {}

    fn is_disposed(&self) -> bool {
        false
    }
}

/// A disposable that only records whether it has been disposed.
///
/// Producers poll it to stop their work cooperatively.
#[derive(Debug, Default)]
pub struct BooleanDisposable {
    disposed: AtomicBool,
}

impl BooleanDisposable {
    /// Creates an undisposed flag.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Disposable for BooleanDisposable {
    fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

type Action = Box<dyn FnOnce() + Send>;

/// A disposable that runs an action exactly once, on first disposal.
pub struct ActionDisposable {
    action: Mutex<Option<Action>>,
    disposed: AtomicBool,
}

impl ActionDisposable {
    /// Creates a disposable running `action` on disposal.
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            action: Mutex::new(Some(Box::new(action))),
            disposed: AtomicBool::new(false),
        }
    }

    /// Creates a shared handle running `action` on disposal.
    pub fn arc<F>(action: F) -> Disposer
    where
        F: FnOnce() + Send + 'static,
    {
        Arc::new(Self::new(action))
    }
}

impl Disposable for ActionDisposable {
    fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
        // Run outside the lock: the action may dispose other handles.
        let action = self.action.lock().take();
        if let Some(action) = action {
            action();
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

impl fmt::Debug for ActionDisposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDisposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

#[derive(Default)]
struct CompositeState {
    disposed: bool,
    disposables: Vec<Disposer>,
}

/// Aggregates several disposables and disposes all of them on its own disposal.
///
/// Adding to an already disposed composite disposes the added handle immediately.
#[derive(Default)]
pub struct CompositeDisposable {
    state: Mutex<CompositeState>,
}

impl CompositeDisposable {
    /// Creates an empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a composite owning the given handles.
    pub fn with(disposables: Vec<Disposer>) -> Self {
        Self {
            state: Mutex::new(CompositeState {
                disposed: false,
                disposables,
            }),
        }
    }

    /// Adds a handle to the composite.
    pub fn add(&self, disposable: Disposer) {
        let mut state = self.state.lock();
        if state.disposed {
            drop(state);
            disposable.dispose();
            return;
        }
        // Keep the list from growing with handles that are already gone.
        state.disposables.retain(|d| !d.is_disposed());
        state.disposables.push(disposable);
    }

    /// Number of live handles currently held.
    pub fn len(&self) -> usize {
        self.state.lock().disposables.len()
    }

    /// Returns `true` when no handle is held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Disposable for CompositeDisposable {
    fn dispose(&self) {
        let disposables = {
            let mut state = self.state.lock();
            if state.disposed {
                return;
            }
            state.disposed = true;
            mem::take(&mut state.disposables)
        };
        for disposable in disposables {
            disposable.dispose();
        }
    }

    fn is_disposed(&self) -> bool {
        self.state.lock().disposed
    }
}

impl fmt::Debug for CompositeDisposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("CompositeDisposable")
            .field("disposed", &state.disposed)
            .field("len", &state.disposables.len())
            .finish()
    }
}

#[derive(Default)]
struct SerialState {
    disposed: bool,
    current: Option<Disposer>,
}

/// Holds exactly one disposable at a time.
///
/// Replacing the held handle disposes the previous one. Setting a handle on an
/// already disposed serial disposes the new handle immediately.
#[derive(Default)]
pub struct SerialDisposable {
    state: Mutex<SerialState>,
}

impl SerialDisposable {
    /// Creates an empty serial slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the held handle, disposing the previous one.
    pub fn set(&self, disposable: Disposer) {
        let previous = {
            let mut state = self.state.lock();
            if state.disposed {
                None
            } else {
                Some(state.current.replace(Arc::clone(&disposable)))
            }
        };
        match previous {
            None => disposable.dispose(),
            Some(Some(previous)) => previous.dispose(),
            Some(None) => {}
        }
    }

    /// Returns the currently held handle.
    pub fn get(&self) -> Option<Disposer> {
        self.state.lock().current.clone()
    }
}

impl Disposable for SerialDisposable {
    fn dispose(&self) {
        let current = {
            let mut state = self.state.lock();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.current.take()
        };
        if let Some(current) = current {
            current.dispose();
        }
    }

    fn is_disposed(&self) -> bool {
        self.state.lock().disposed
    }
}

impl fmt::Debug for SerialDisposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialDisposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

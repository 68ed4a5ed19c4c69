// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A manually driven clock for deterministic tests of time-based operators.
//!
//! ```
//! use rivulet_runtime::{Queue, VirtualTimeQueue};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let queue = VirtualTimeQueue::new();
//! let fired = Arc::new(AtomicUsize::new(0));
//!
//! let counter = fired.clone();
//! queue.after(Duration::from_millis(100), Box::new(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! }));
//!
//! queue.advance_by(Duration::from_millis(99));
//! assert_eq!(fired.load(Ordering::SeqCst), 0);
//!
//! queue.advance_by(Duration::from_millis(1));
//! assert_eq!(fired.load(Ordering::SeqCst), 1);
//! ```

use crate::context::{ExecutionContext, Work};
use crate::queue::Queue;
use parking_lot::Mutex;
use rivulet_core::{ActionDisposable, Disposer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

type Key = (Duration, u64);

struct VirtualState {
    elapsed: Duration,
    sequence: u64,
    pending: BTreeMap<Key, Work>,
}

/// A queue whose clock only moves when told to.
///
/// Work never runs on its own. [`advance_by`](Self::advance_by) moves the
/// clock forward, running every unit of work that falls due, in deadline order
/// and in submission order among equal deadlines. Work scheduled while
/// advancing runs in the same pass if it falls due before the target time.
/// `execute` schedules work at the current instant.
#[derive(Clone)]
pub struct VirtualTimeQueue {
    origin: Instant,
    state: Arc<Mutex<VirtualState>>,
}

impl VirtualTimeQueue {
    /// Creates a queue whose clock starts at zero with nothing scheduled.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            state: Arc::new(Mutex::new(VirtualState {
                elapsed: Duration::ZERO,
                sequence: 0,
                pending: BTreeMap::new(),
            })),
        }
    }

    /// Virtual time elapsed since the queue was created.
    pub fn elapsed(&self) -> Duration {
        self.state.lock().elapsed
    }

    /// Number of scheduled units of work that have not run yet.
    pub fn pending(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Moves the clock forward by `step`, running everything that falls due.
    pub fn advance_by(&self, step: Duration) {
        let target = self.elapsed() + step;
        self.advance_to(target);
    }

    /// Runs everything already due without moving the clock.
    pub fn run_pending(&self) {
        self.advance_by(Duration::ZERO);
    }

    fn advance_to(&self, target: Duration) {
        trace!("advancing virtual time to {:?}", target);
        loop {
            let due = {
                let mut state = self.state.lock();
                let next = state.pending.keys().next().map(|&(deadline, _)| deadline);
                match next {
                    Some(deadline) if deadline <= target => {
                        state.elapsed = state.elapsed.max(deadline);
                        state.pending.pop_first().map(|(_, work)| work)
                    }
                    _ => None,
                }
            };
            match due {
                Some(work) => work(),
                None => break,
            }
        }

        let mut state = self.state.lock();
        state.elapsed = state.elapsed.max(target);
    }

    fn schedule(&self, delay: Duration, work: Work) -> Key {
        let mut state = self.state.lock();
        let key = (state.elapsed + delay, state.sequence);
        state.sequence += 1;
        state.pending.insert(key, work);
        key
    }
}

impl Default for VirtualTimeQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionContext for VirtualTimeQueue {
    fn execute(&self, work: Work) {
        self.schedule(Duration::ZERO, work);
    }
}

impl Queue for VirtualTimeQueue {
    fn after(&self, delay: Duration, work: Work) -> Disposer {
        let key = self.schedule(delay, work);
        let state = Arc::downgrade(&self.state);
        ActionDisposable::arc(move || {
            if let Some(state) = state.upgrade() {
                let removed = state.lock().pending.remove(&key);
                drop(removed);
            }
        })
    }

    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}

impl fmt::Debug for VirtualTimeQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("VirtualTimeQueue")
            .field("elapsed", &state.elapsed)
            .field("pending", &state.pending.len())
            .finish()
    }
}

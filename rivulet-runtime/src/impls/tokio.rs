// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::context::{ExecutionContext, Work};
use crate::queue::Queue;
use rivulet_core::{ActionDisposable, Disposer};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;

/// A queue spawning work onto a tokio runtime.
///
/// Timers use `tokio::time`, so a paused test runtime drives them
/// deterministically.
#[derive(Debug, Clone)]
pub struct TokioQueue {
    handle: Handle,
}

impl TokioQueue {
    /// A queue spawning its work on the runtime behind `handle`.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// A queue on the runtime the caller is running in, if any.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl ExecutionContext for TokioQueue {
    fn execute(&self, work: Work) {
        self.handle.spawn(async move { work() });
    }
}

impl Queue for TokioQueue {
    fn after(&self, delay: Duration, work: Work) -> Disposer {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let task = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if !flag.load(Ordering::Acquire) {
                work();
            }
        });

        ActionDisposable::arc(move || {
            cancelled.store(true, Ordering::Release);
            task.abort();
            trace!("tokio timer cancelled");
        })
    }

    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

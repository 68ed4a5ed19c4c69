// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::context::{ExecutionContext, Work};
use rivulet_core::Disposer;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// An execution context with a clock and timers.
///
/// Work scheduled with equal deadlines runs in submission order.
pub trait Queue: ExecutionContext {
    /// Schedules `work` to run once `delay` has elapsed.
    ///
    /// Disposing the returned handle before the deadline prevents `work` from
    /// running. Disposing it afterwards has no effect.
    fn after(&self, delay: Duration, work: Work) -> Disposer;

    /// The queue's notion of the current time.
    fn now(&self) -> Instant;
}

impl<Q: Queue + ?Sized> Queue for Arc<Q> {
    fn after(&self, delay: Duration, work: Work) -> Disposer {
        (**self).after(delay, work)
    }

    fn now(&self) -> Instant {
        (**self).now()
    }
}

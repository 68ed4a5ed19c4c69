// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Streams produced by a queue's clock rather than by an upstream source.
//!
//! ```
//! use rivulet_core::{Disposable, Signal};
//! use rivulet_runtime::VirtualTimeQueue;
//! use rivulet_stream_time::interval;
//! use rivulet_test_utils::Recorder;
//! use std::time::Duration;
//!
//! let queue = VirtualTimeQueue::new();
//! let ticks = interval::<Signal<u64>, _>(Duration::from_millis(10), queue.clone());
//! let (recorder, handle) = Recorder::subscribe_with_handle(&ticks);
//!
//! queue.advance_by(Duration::from_millis(35));
//! handle.dispose();
//! queue.advance_by(Duration::from_millis(100));
//!
//! assert_eq!(recorder.elements(), vec![0, 1, 2]);
//! ```

use rivulet_core::{Disposable, Event, Observer, SerialDisposable, Stream};
use rivulet_runtime::Queue;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shortest period [`interval`] ticks at.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

struct Ticker<E, Q> {
    queue: Arc<Q>,
    period: Duration,
    ticks: AtomicU64,
    observer: Observer<E>,
    timer: Arc<SerialDisposable>,
}

impl<E, Q> Ticker<E, Q>
where
    E: Event<Element = u64>,
    Q: Queue,
{
    fn schedule(self: &Arc<Self>) {
        if self.timer.is_disposed() {
            trace!("interval disposed, not rescheduling");
            return;
        }
        let this = Arc::clone(self);
        self.timer
            .set(self.queue.after(self.period, Box::new(move || this.tick())));
    }

    fn tick(self: &Arc<Self>) {
        if self.timer.is_disposed() {
            return;
        }
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.observer.next(tick);
        self.schedule();
    }
}

/// Emits `0, 1, 2, ...`, one element every `period`, until disposed.
///
/// The next tick is scheduled only after the current one was delivered, and
/// only if the subscription is still live.
///
/// A `period` shorter than [`MIN_PERIOD`] (including zero) is raised to it, so a
/// tick always lands strictly after the one that scheduled it.
pub fn interval<E, Q>(period: Duration, queue: Q) -> Stream<E>
where
    E: Event<Element = u64>,
    Q: Queue,
{
    let period = period.max(MIN_PERIOD);
    let queue = Arc::new(queue);
    Stream::new(move |observer: Observer<E>| {
        let timer = Arc::new(SerialDisposable::new());
        let ticker = Arc::new(Ticker {
            queue: Arc::clone(&queue),
            period,
            ticks: AtomicU64::new(0),
            observer,
            timer: Arc::clone(&timer),
        });
        ticker.schedule();
        timer
    })
}

/// Emits `0` once `delay` has elapsed, then completes.
pub fn timer<E, Q>(delay: Duration, queue: Q) -> Stream<E>
where
    E: Event<Element = u64>,
    Q: Queue,
{
    let queue = Arc::new(queue);
    Stream::new(move |observer: Observer<E>| {
        queue.after(
            delay,
            Box::new(move || {
                observer.next(0);
                observer.completed();
            }),
        )
    })
}

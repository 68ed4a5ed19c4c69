// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Event, Observer, ReentrantLock, Stream};
use rivulet_runtime::Queue;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Extension trait providing the [`throttle`](Self::throttle) operator.
pub trait ThrottleExt<E: Event>: Sized {
    /// Lets at most one element through per `window`.
    ///
    /// The window opens when an element passes, measured on `queue`'s clock.
    /// Elements arriving inside it are dropped; nothing is emitted when the
    /// window closes. Terminations always pass.
    ///
    /// ```
    /// use rivulet_core::Signal;
    /// use rivulet_runtime::VirtualTimeQueue;
    /// use rivulet_stream_time::prelude::*;
    /// use rivulet_test_utils::{test_source, Recorder};
    /// use std::time::Duration;
    ///
    /// let queue = VirtualTimeQueue::new();
    /// let (subject, stream) = test_source::<Signal<i32>>();
    /// let recorder = Recorder::subscribe(&stream.throttle(Duration::from_millis(100), queue.clone()));
    ///
    /// subject.next(1).unwrap();
    /// queue.advance_by(Duration::from_millis(50));
    /// subject.next(2).unwrap();
    /// queue.advance_by(Duration::from_millis(50));
    /// subject.next(3).unwrap();
    ///
    /// assert_eq!(recorder.elements(), vec![1, 3]);
    /// ```
    fn throttle<Q: Queue>(self, window: Duration, queue: Q) -> Stream<E>;
}

impl<E: Event> ThrottleExt<E> for Stream<E> {
    fn throttle<Q: Queue>(self, window: Duration, queue: Q) -> Stream<E> {
        let queue = Arc::new(queue);
        Stream::new(move |observer: Observer<E>| {
            let queue = Arc::clone(&queue);
            let last_passed = ReentrantLock::new(None::<Instant>);
            self.observe(Observer::new(move |event: E| {
                let guard = last_passed.lock();
                if event.is_termination() {
                    observer.on(event);
                    return;
                }

                let now = queue.now();
                let open = {
                    let mut last = guard.borrow_mut();
                    let open = match *last {
                        Some(passed) => now.duration_since(passed) >= window,
                        None => true,
                    };
                    if open {
                        *last = Some(now);
                    }
                    open
                };
                if open {
                    observer.on(event);
                }
            }))
        })
    }
}

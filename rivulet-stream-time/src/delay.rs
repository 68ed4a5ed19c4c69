// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{CompositeDisposable, Disposable, Event, Observer, SerialDisposable, Stream};
use rivulet_runtime::Queue;
use std::sync::Arc;
use std::time::Duration;

/// Extension trait providing the [`delay`](Self::delay) operator.
pub trait DelayExt<E: Event>: Sized {
    /// Forwards every event, terminations included, `duration` after it was received.
    ///
    /// Each event gets its own timer on `queue`, so relative order is kept only
    /// as far as the queue runs equal deadlines in submission order. Disposing
    /// the subscription cancels every timer still pending.
    ///
    /// ```
    /// use rivulet_core::{Signal, Stream};
    /// use rivulet_runtime::VirtualTimeQueue;
    /// use rivulet_stream_time::prelude::*;
    /// use rivulet_test_utils::Recorder;
    /// use std::time::Duration;
    ///
    /// let queue = VirtualTimeQueue::new();
    /// let delayed = Stream::<Signal<i32>>::sequence(vec![1, 2])
    ///     .delay(Duration::from_millis(50), queue.clone());
    /// let recorder = Recorder::subscribe(&delayed);
    ///
    /// queue.advance_by(Duration::from_millis(49));
    /// assert!(recorder.is_empty());
    ///
    /// queue.advance_by(Duration::from_millis(1));
    /// assert_eq!(recorder.elements(), vec![1, 2]);
    /// assert!(recorder.is_completed());
    /// ```
    fn delay<Q: Queue>(self, duration: Duration, queue: Q) -> Stream<E>;
}

impl<E: Event> DelayExt<E> for Stream<E> {
    fn delay<Q: Queue>(self, duration: Duration, queue: Q) -> Stream<E> {
        let queue = Arc::new(queue);
        Stream::new(move |observer: Observer<E>| {
            let subscriptions = Arc::new(CompositeDisposable::new());

            let sink = {
                let queue = Arc::clone(&queue);
                let timers = Arc::clone(&subscriptions);
                Observer::new(move |event: E| {
                    let slot = Arc::new(SerialDisposable::new());
                    timers.add(slot.clone());

                    let observer = observer.clone();
                    let fired = Arc::clone(&slot);
                    slot.set(queue.after(
                        duration,
                        Box::new(move || {
                            observer.on(event);
                            fired.dispose();
                        }),
                    ));
                })
            };

            subscriptions.add(self.observe(sink));
            subscriptions
        })
    }
}

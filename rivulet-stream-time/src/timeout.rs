// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{
    CompositeDisposable, Disposable, Failable, Observer, ReentrantLock, SerialDisposable, Stream,
};
use rivulet_runtime::Queue;
use std::sync::Arc;
use std::time::Duration;

struct Timeout<E: Failable, Q> {
    generation: ReentrantLock<u64>,
    timer: Arc<SerialDisposable>,
    observer: Observer<E>,
    queue: Arc<Q>,
    duration: Duration,
    error: E::Failure,
}

impl<E, Q> Timeout<E, Q>
where
    E: Failable,
    E::Failure: Clone + Sync,
    Q: Queue,
{
    fn arm(self: &Arc<Self>) {
        let generation = self.generation.with(|generation| {
            *generation += 1;
            *generation
        });
        let this = Arc::clone(self);
        self.timer.set(
            self.queue
                .after(self.duration, Box::new(move || this.expire(generation))),
        );
    }

    fn expire(&self, generation: u64) {
        let guard = self.generation.lock();
        if *guard.borrow() != generation {
            return;
        }
        debug!("no event within {:?}, failing", self.duration);
        self.observer.failed(self.error.clone());
    }

    fn forward(self: &Arc<Self>, event: E) {
        let _guard = self.generation.lock();
        if event.is_termination() {
            self.generation.with(|generation| *generation += 1);
            self.timer.dispose();
            self.observer.on(event);
        } else {
            self.observer.on(event);
            self.arm();
        }
    }
}

/// Extension trait providing the [`timeout`](Self::timeout) operator.
pub trait TimeoutExt<E: Failable>: Sized {
    /// Fails with `error` when no event arrives within `duration`.
    ///
    /// The wait starts at subscription and restarts after every element.
    ///
    /// ```
    /// use rivulet_core::{RivuletError, StreamItem};
    /// use rivulet_runtime::VirtualTimeQueue;
    /// use rivulet_stream_time::prelude::*;
    /// use rivulet_test_utils::{test_source, Recorder};
    /// use std::time::Duration;
    ///
    /// let queue = VirtualTimeQueue::new();
    /// let (subject, stream) = test_source::<StreamItem<i32>>();
    /// let guarded = stream.timeout(
    ///     Duration::from_millis(100),
    ///     queue.clone(),
    ///     RivuletError::stream_error("timed out"),
    /// );
    /// let recorder = Recorder::subscribe(&guarded);
    ///
    /// queue.advance_by(Duration::from_millis(80));
    /// subject.next(1).unwrap();
    /// queue.advance_by(Duration::from_millis(100));
    ///
    /// assert_eq!(recorder.elements(), vec![1]);
    /// assert!(recorder.is_failed());
    /// ```
    fn timeout<Q: Queue>(self, duration: Duration, queue: Q, error: E::Failure) -> Stream<E>
    where
        E::Failure: Clone + Sync;
}

impl<E: Failable> TimeoutExt<E> for Stream<E> {
    fn timeout<Q: Queue>(self, duration: Duration, queue: Q, error: E::Failure) -> Stream<E>
    where
        E::Failure: Clone + Sync,
    {
        let queue = Arc::new(queue);
        Stream::new(move |observer: Observer<E>| {
            let timer = Arc::new(SerialDisposable::new());
            let timeout = Arc::new(Timeout {
                generation: ReentrantLock::new(0),
                timer: Arc::clone(&timer),
                observer,
                queue: Arc::clone(&queue),
                duration,
                error: error.clone(),
            });
            timeout.arm();

            let subscriptions = CompositeDisposable::new();
            subscriptions.add(timer);
            subscriptions.add(self.observe(Observer::new(move |event: E| timeout.forward(event))));
            Arc::new(subscriptions)
        })
    }
}

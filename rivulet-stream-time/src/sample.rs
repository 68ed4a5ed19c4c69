// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{
    CompositeDisposable, Disposable, Event, Observer, ReentrantLock, SerialDisposable, Stream,
};
use rivulet_runtime::Queue;
use std::sync::Arc;
use std::time::Duration;

struct Sampler<E, Q> {
    latest: ReentrantLock<Option<E>>,
    ticker: Arc<SerialDisposable>,
    observer: Observer<E>,
    queue: Arc<Q>,
    period: Duration,
}

impl<E: Event, Q: Queue> Sampler<E, Q> {
    fn schedule(self: &Arc<Self>) {
        if self.ticker.is_disposed() {
            return;
        }
        let this = Arc::clone(self);
        self.ticker
            .set(self.queue.after(self.period, Box::new(move || this.tick())));
    }

    fn tick(self: &Arc<Self>) {
        let guard = self.latest.lock();
        if self.ticker.is_disposed() {
            return;
        }
        let latest = guard.borrow_mut().take();
        if let Some(event) = latest {
            self.observer.on(event);
        }
        self.schedule();
    }

    fn record(&self, event: E) {
        if event.is_termination() {
            let _guard = self.latest.lock();
            trace!("upstream terminated, stopping sampler");
            self.ticker.dispose();
            self.observer.on(event);
        } else {
            self.latest.with(|latest| *latest = Some(event));
        }
    }
}

/// Extension trait providing the [`sample`](Self::sample) operator.
pub trait SampleExt<E: Event>: Sized {
    /// Emits the most recent element once per `period`, if one arrived since
    /// the previous sample.
    ///
    /// A termination from upstream is forwarded at once and stops sampling; an
    /// element still held at that point is dropped.
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
    /// let recorder = Recorder::subscribe(&stream.sample(Duration::from_millis(100), queue.clone()));
    ///
    /// subject.next(1).unwrap();
    /// subject.next(2).unwrap();
    /// queue.advance_by(Duration::from_millis(100));
    /// queue.advance_by(Duration::from_millis(100));
    /// subject.next(3).unwrap();
    /// queue.advance_by(Duration::from_millis(100));
    ///
    /// assert_eq!(recorder.elements(), vec![2, 3]);
    /// ```
    fn sample<Q: Queue>(self, period: Duration, queue: Q) -> Stream<E>;
}

impl<E: Event> SampleExt<E> for Stream<E> {
    fn sample<Q: Queue>(self, period: Duration, queue: Q) -> Stream<E> {
        let queue = Arc::new(queue);
        Stream::new(move |observer: Observer<E>| {
            let ticker = Arc::new(SerialDisposable::new());
            let sampler = Arc::new(Sampler {
                latest: ReentrantLock::new(None),
                ticker: Arc::clone(&ticker),
                observer,
                queue: Arc::clone(&queue),
                period,
            });
            sampler.schedule();

            let subscriptions = CompositeDisposable::new();
            subscriptions.add(ticker);
            subscriptions.add(self.observe(Observer::new(move |event: E| sampler.record(event))));
            Arc::new(subscriptions)
        })
    }
}

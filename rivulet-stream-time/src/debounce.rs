// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{
    CompositeDisposable, Event, Observer, ReentrantLock, SerialDisposable, Stream,
};
use rivulet_runtime::Queue;
use std::sync::Arc;
use std::time::Duration;

struct DebounceState<E> {
    pending: Option<E>,
    generation: u64,
}

struct Debounce<E, Q> {
    state: ReentrantLock<DebounceState<E>>,
    timer: Arc<SerialDisposable>,
    observer: Observer<E>,
    queue: Arc<Q>,
    duration: Duration,
}

impl<E: Event, Q: Queue> Debounce<E, Q> {
    fn hold(self: &Arc<Self>, event: E) {
        let _guard = self.state.lock();
        let generation = self.state.with(|state| {
            state.generation += 1;
            state.pending = Some(event);
            state.generation
        });

        let this = Arc::clone(self);
        self.timer.set(
            self.queue
                .after(self.duration, Box::new(move || this.fire(generation))),
        );
    }

    fn fire(&self, generation: u64) {
        let guard = self.state.lock();
        let pending = {
            let mut state = guard.borrow_mut();
            if state.generation != generation {
                return;
            }
            state.pending.take()
        };
        if let Some(event) = pending {
            self.observer.on(event);
        }
    }

    fn terminate(&self, termination: E) {
        let guard = self.state.lock();
        let pending = {
            let mut state = guard.borrow_mut();
            state.generation += 1;
            state.pending.take()
        };
        if let Some(event) = pending {
            trace!("flushing debounced event before termination");
            self.observer.on(event);
        }
        self.observer.on(termination);
    }
}

/// Extension trait providing the [`debounce`](Self::debounce) operator.
pub trait DebounceExt<E: Event>: Sized {
    /// Forwards an element only once `duration` has passed without a newer one.
    ///
    /// Every element restarts the wait and replaces the held one. A termination
    /// flushes the held element immediately and is forwarded right after it.
    ///
    /// ```
    /// use rivulet_core::Signal;
    /// use rivulet_runtime::VirtualTimeQueue;
    /// use rivulet_stream_time::prelude::*;
    /// use rivulet_test_utils::{test_source, Recorder};
    /// use std::time::Duration;
    ///
    /// let queue = VirtualTimeQueue::new();
    /// let (subject, stream) = test_source::<Signal<&str>>();
    /// let recorder = Recorder::subscribe(&stream.debounce(Duration::from_millis(100), queue.clone()));
    ///
    /// subject.next("h").unwrap();
    /// queue.advance_by(Duration::from_millis(60));
    /// subject.next("he").unwrap();
    /// queue.advance_by(Duration::from_millis(60));
    /// subject.next("hey").unwrap();
    /// queue.advance_by(Duration::from_millis(100));
    ///
    /// assert_eq!(recorder.elements(), vec!["hey"]);
    /// ```
    fn debounce<Q: Queue>(self, duration: Duration, queue: Q) -> Stream<E>;
}

impl<E: Event> DebounceExt<E> for Stream<E> {
    fn debounce<Q: Queue>(self, duration: Duration, queue: Q) -> Stream<E> {
        let queue = Arc::new(queue);
        Stream::new(move |observer: Observer<E>| {
            let timer = Arc::new(SerialDisposable::new());
            let debounce = Arc::new(Debounce {
                state: ReentrantLock::new(DebounceState {
                    pending: None,
                    generation: 0,
                }),
                timer: Arc::clone(&timer),
                observer,
                queue: Arc::clone(&queue),
                duration,
            });

            let sink = Observer::new(move |event: E| {
                if event.is_termination() {
                    debounce.terminate(event);
                } else {
                    debounce.hold(event);
                }
            });

            let subscriptions = CompositeDisposable::new();
            subscriptions.add(timer);
            subscriptions.add(self.observe(sink));
            Arc::new(subscriptions)
        })
    }
}

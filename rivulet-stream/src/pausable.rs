// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{CompositeDisposable, Event, Observer, ReentrantLock, Stream};
use std::sync::Arc;

/// Extension trait providing the [`pausable_by`](Self::pausable_by) operator.
pub trait PausableExt<E: Event>: Sized {
    /// Gates elements on the latest boolean emitted by `gate`.
    ///
    /// Elements pass until `gate` first emits. Afterwards an element passes only
    /// while the latest gate value is `true`. Terminations of the source always
    /// pass. Terminations of `gate` leave the last gate value in place.
    ///
    /// ```
    /// use rivulet_core::Signal;
    /// use rivulet_stream::prelude::*;
    /// use rivulet_test_utils::{test_source, Recorder};
    ///
    /// let (tx, source) = test_source::<Signal<i32>>();
    /// let (gate, gate_stream) = test_source::<Signal<bool>>();
    /// let recorder = Recorder::subscribe(&source.pausable_by(gate_stream));
    ///
    /// tx.next(1).unwrap();
    /// gate.next(false).unwrap();
    /// tx.next(2).unwrap();
    /// gate.next(true).unwrap();
    /// tx.next(3).unwrap();
    ///
    /// assert_eq!(recorder.elements(), vec![1, 3]);
    /// ```
    fn pausable_by<G>(self, gate: Stream<G>) -> Stream<E>
    where
        G: Event<Element = bool>;
}

impl<E: Event> PausableExt<E> for Stream<E> {
    fn pausable_by<G>(self, gate: Stream<G>) -> Stream<E>
    where
        G: Event<Element = bool>,
    {
        Stream::new(move |observer: Observer<E>| {
            let allowed = Arc::new(ReentrantLock::new(true));

            let gate_sink = {
                let allowed = Arc::clone(&allowed);
                Observer::new(move |event: G| {
                    if let Some(&value) = event.element() {
                        allowed.with(|allowed| *allowed = value);
                    }
                })
            };

            let source_sink = Observer::new(move |event: E| {
                let guard = allowed.lock();
                let open = *guard.borrow();
                if open || event.is_termination() {
                    observer.on(event);
                }
            });

            let subscriptions = CompositeDisposable::new();
            subscriptions.add(gate.observe(gate_sink));
            subscriptions.add(self.observe(source_sink));
            Arc::new(subscriptions)
        })
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{CompositeDisposable, Event, Observer, ReentrantLock, Stream};
use std::sync::Arc;

/// Extension trait providing the [`take_until`](Self::take_until) operator.
pub trait TakeUntilExt<E: Event>: Sized {
    /// Forwards events until `trigger` emits its first element, then completes.
    ///
    /// Terminations of `trigger` are ignored: a trigger that completes without
    /// emitting leaves the source running.
    ///
    /// ```
    /// use rivulet_core::Signal;
    /// use rivulet_stream::prelude::*;
    /// use rivulet_test_utils::{test_source, Recorder};
    ///
    /// let (tx, source) = test_source::<Signal<i32>>();
    /// let (stop, trigger) = test_source::<Signal<()>>();
    /// let recorder = Recorder::subscribe(&source.take_until(trigger));
    ///
    /// tx.next(1).unwrap();
    /// stop.next(()).unwrap();
    /// tx.next(2).unwrap();
    ///
    /// assert_eq!(recorder.elements(), vec![1]);
    /// assert!(recorder.is_completed());
    /// ```
    fn take_until<T: Event>(self, trigger: Stream<T>) -> Stream<E>;
}

impl<E: Event> TakeUntilExt<E> for Stream<E> {
    fn take_until<T: Event>(self, trigger: Stream<T>) -> Stream<E> {
        Stream::new(move |observer: Observer<E>| {
            let stopped = Arc::new(ReentrantLock::new(false));

            let trigger_sink = {
                let stopped = Arc::clone(&stopped);
                let observer = observer.clone();
                Observer::new(move |event: T| {
                    if event.is_termination() {
                        return;
                    }
                    let guard = stopped.lock();
                    let first = !std::mem::replace(&mut *guard.borrow_mut(), true);
                    if first {
                        observer.completed();
                    }
                })
            };

            let source_sink = Observer::new(move |event: E| {
                let guard = stopped.lock();
                if *guard.borrow() {
                    return;
                }
                if event.is_termination() {
                    *guard.borrow_mut() = true;
                }
                observer.on(event);
            });

            let subscriptions = Arc::new(CompositeDisposable::new());
            subscriptions.add(trigger.observe(trigger_sink));
            subscriptions.add(self.observe(source_sink));
            subscriptions
        })
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Disposable, Event, Observer, SerialDisposable, Stream};
use rivulet_runtime::ExecutionContext;
use std::sync::Arc;

/// Extension trait providing the [`execute_in`](Self::execute_in) operator.
pub trait ExecuteInExt<E: Event>: Sized {
    /// Defers subscribing upstream until `context` runs the subscription.
    ///
    /// Events are delivered wherever the upstream producer emits them. If the
    /// returned handle is disposed before `context` gets to run, upstream is
    /// never subscribed.
    ///
    /// ```
    /// use rivulet_core::{Signal, Stream};
    /// use rivulet_runtime::VirtualTimeQueue;
    /// use rivulet_stream::prelude::*;
    /// use rivulet_test_utils::Recorder;
    ///
    /// let queue = VirtualTimeQueue::new();
    /// let stream = Stream::<Signal<i32>>::sequence(vec![1, 2]).execute_in(queue.clone());
    /// let recorder = Recorder::subscribe(&stream);
    /// assert!(recorder.is_empty());
    ///
    /// queue.run_pending();
    /// assert_eq!(recorder.elements(), vec![1, 2]);
    /// ```
    fn execute_in<C: ExecutionContext>(self, context: C) -> Stream<E>;
}

impl<E: Event> ExecuteInExt<E> for Stream<E> {
    fn execute_in<C: ExecutionContext>(self, context: C) -> Stream<E> {
        let context = Arc::new(context);
        Stream::new(move |observer: Observer<E>| {
            let serial = Arc::new(SerialDisposable::new());
            let source = self.clone();
            let target = Arc::clone(&serial);
            context.execute(Box::new(move || {
                if target.is_disposed() {
                    return;
                }
                target.set(source.observe(observer));
            }));
            serial
        })
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Event, Observer, SerialDisposable, Stream};
use std::sync::Arc;

/// Extension trait providing the [`concat_with`](Self::concat_with) operator.
pub trait ConcatExt<E: Event>: Sized {
    /// Forwards this stream, then, once it completes, a fresh subscription to `other`.
    ///
    /// A failure of this stream ends the sequence without subscribing `other`.
    fn concat_with(self, other: Stream<E>) -> Stream<E>;
}

impl<E: Event> ConcatExt<E> for Stream<E> {
    fn concat_with(self, other: Stream<E>) -> Stream<E> {
        Stream::new(move |observer: Observer<E>| {
            let serial = Arc::new(SerialDisposable::new());
            let first = Arc::new(SerialDisposable::new());
            serial.set(first.clone());

            let sink = {
                let serial = Arc::clone(&serial);
                let other = other.clone();
                Observer::new(move |event: E| {
                    if !event.is_completion() {
                        observer.on(event);
                        return;
                    }
                    let second = Arc::new(SerialDisposable::new());
                    serial.set(second.clone());
                    second.set(other.observe(observer.clone()));
                })
            };

            first.set(self.observe(sink));
            serial
        })
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Failable, Observer, Stream};
use std::sync::Arc;

/// Extension trait providing the [`on_error`](Self::on_error) operator.
pub trait OnErrorExt<E: Failable>: Sized {
    /// Observes failures with `handler`.
    ///
    /// When `handler` returns `true` the failure is consumed and the stream
    /// completes instead. When it returns `false` the failure is forwarded.
    ///
    /// ```
    /// use rivulet_core::{RivuletError, Stream, StreamItem};
    /// use rivulet_stream::prelude::*;
    /// use rivulet_test_utils::Recorder;
    ///
    /// let stream = Stream::<StreamItem<i32>>::failed(RivuletError::stream_error("boom"))
    ///     .on_error(|_| true);
    /// let recorder = Recorder::subscribe(&stream);
    ///
    /// assert!(recorder.is_completed());
    /// ```
    fn on_error<F>(self, handler: F) -> Stream<E>
    where
        F: Fn(&E::Failure) -> bool + Send + Sync + 'static;
}

impl<E: Failable> OnErrorExt<E> for Stream<E> {
    fn on_error<F>(self, handler: F) -> Stream<E>
    where
        F: Fn(&E::Failure) -> bool + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        Stream::new(move |observer: Observer<E>| {
            let handler = Arc::clone(&handler);
            self.observe(Observer::new(move |event: E| {
                let consumed = event.error().is_some_and(|error| handler(error));
                if consumed {
                    observer.completed();
                } else {
                    observer.on(event);
                }
            }))
        })
    }
}

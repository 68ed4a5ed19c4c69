// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Side-effect operator for debugging and troubleshooting streams.

use rivulet_core::{Event, Observer, Stream};
use std::sync::Arc;

/// Extension trait providing the [`tap`](Self::tap) operator.
pub trait TapExt<E: Event>: Sized {
    /// Invokes `effect` for every event, terminations included, then forwards
    /// the event unchanged.
    fn tap<F>(self, effect: F) -> Stream<E>
    where
        F: Fn(&E) + Send + Sync + 'static;
}

impl<E: Event> TapExt<E> for Stream<E> {
    fn tap<F>(self, effect: F) -> Stream<E>
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let effect = Arc::new(effect);
        Stream::new(move |observer: Observer<E>| {
            let effect = Arc::clone(&effect);
            self.observe(Observer::new(move |event: E| {
                effect(&event);
                observer.on(event);
            }))
        })
    }
}

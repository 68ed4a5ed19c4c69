// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Event, Observer, Stream};
use std::sync::Arc;

/// Extension trait providing the [`filter`](Self::filter) operator.
pub trait FilterExt<E: Event>: Sized {
    /// Forwards the elements satisfying `predicate`. Terminations always pass.
    fn filter<F>(self, predicate: F) -> Stream<E>
    where
        F: Fn(&E::Element) -> bool + Send + Sync + 'static;
}

impl<E: Event> FilterExt<E> for Stream<E> {
    fn filter<F>(self, predicate: F) -> Stream<E>
    where
        F: Fn(&E::Element) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        Stream::new(move |observer: Observer<E>| {
            let predicate = Arc::clone(&predicate);
            self.observe(Observer::new(move |event: E| match event.element() {
                Some(element) if !predicate(element) => {}
                _ => observer.on(event),
            }))
        })
    }
}

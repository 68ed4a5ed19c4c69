// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Event, Observer, ReentrantLock, Stream};

/// Extension trait providing the [`default_if_empty`](Self::default_if_empty) operator.
pub trait DefaultIfEmptyExt<E: Event>: Sized {
    /// Emits `element` before completing when the source completes without
    /// emitting any element. Failures pass through unchanged.
    fn default_if_empty(self, element: E::Element) -> Stream<E>
    where
        E::Element: Clone + Sync;
}

impl<E: Event> DefaultIfEmptyExt<E> for Stream<E> {
    fn default_if_empty(self, element: E::Element) -> Stream<E>
    where
        E::Element: Clone + Sync,
    {
        Stream::new(move |observer: Observer<E>| {
            let seen = ReentrantLock::new(false);
            let element = element.clone();
            self.observe(Observer::new(move |event: E| {
                let guard = seen.lock();
                if !event.is_termination() {
                    *guard.borrow_mut() = true;
                } else if event.is_completion() && !*guard.borrow() {
                    observer.next(element.clone());
                }
                observer.on(event);
            }))
        })
    }
}

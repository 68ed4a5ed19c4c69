// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Event, Observer, Stream};

/// Extension trait providing the [`ignore_elements`](Self::ignore_elements) operator.
pub trait IgnoreElementsExt<E: Event>: Sized {
    /// Drops every element, forwarding only the termination.
    fn ignore_elements(self) -> Stream<E>;
}

impl<E: Event> IgnoreElementsExt<E> for Stream<E> {
    fn ignore_elements(self) -> Stream<E> {
        Stream::new(move |observer: Observer<E>| {
            self.observe(Observer::new(move |event: E| {
                if event.is_termination() {
                    observer.on(event);
                }
            }))
        })
    }
}

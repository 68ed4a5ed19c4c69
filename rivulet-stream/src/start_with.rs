// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Event, Observer, Stream};

/// Extension trait providing the [`start_with`](Self::start_with) operator.
pub trait StartWithExt<E: Event>: Sized {
    /// Emits `elements` in order on subscription, then everything the source emits.
    fn start_with<I>(self, elements: I) -> Stream<E>
    where
        I: IntoIterator<Item = E::Element>,
        E::Element: Clone + Sync;
}

impl<E: Event> StartWithExt<E> for Stream<E> {
    fn start_with<I>(self, elements: I) -> Stream<E>
    where
        I: IntoIterator<Item = E::Element>,
        E::Element: Clone + Sync,
    {
        let elements: Vec<E::Element> = elements.into_iter().collect();
        Stream::new(move |observer: Observer<E>| {
            for element in &elements {
                observer.next(element.clone());
            }
            self.observe(observer)
        })
    }
}

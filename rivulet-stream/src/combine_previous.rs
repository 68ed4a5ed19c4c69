// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Event, Observer, ReentrantLock, Stream};

/// Extension trait providing the [`combine_previous`](Self::combine_previous) operator.
pub trait CombinePreviousExt<E: Event>: Sized
where
    E::Element: Clone,
{
    /// Pairs each element with the element before it.
    ///
    /// The first element is paired with `None`.
    ///
    /// ```
    /// use rivulet_core::{Signal, Stream};
    /// use rivulet_stream::prelude::*;
    /// use rivulet_test_utils::Recorder;
    ///
    /// let pairs = Stream::<Signal<i32>>::sequence(vec![1, 2, 3]).combine_previous();
    ///
    /// assert_eq!(
    ///     Recorder::subscribe(&pairs).elements(),
    ///     vec![(None, 1), (Some(1), 2), (Some(2), 3)]
    /// );
    /// ```
    fn combine_previous(self) -> Stream<E::With<(Option<E::Element>, E::Element)>>;
}

impl<E: Event> CombinePreviousExt<E> for Stream<E>
where
    E::Element: Clone,
{
    fn combine_previous(self) -> Stream<E::With<(Option<E::Element>, E::Element)>> {
        Stream::new(
            move |observer: Observer<E::With<(Option<E::Element>, E::Element)>>| {
                let previous = ReentrantLock::new(None);
                self.observe(Observer::new(move |event: E| {
                    match event.retype::<(Option<E::Element>, E::Element)>() {
                        Ok(current) => {
                            let guard = previous.lock();
                            let prior = guard.borrow_mut().replace(current.clone());
                            observer.next((prior, current));
                        }
                        Err(termination) => observer.on(termination),
                    }
                }))
            },
        )
    }
}

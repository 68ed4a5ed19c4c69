// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Suppression of consecutive duplicates.
//!
//! Every element is compared with the element immediately preceding it
//! upstream (not with the last forwarded one). The first element and all
//! terminations always pass.
//!
//! ```
//! use rivulet_core::{Signal, Stream};
//! use rivulet_stream::prelude::*;
//! use rivulet_test_utils::Recorder;
//!
//! let stream = Stream::<Signal<i32>>::sequence(vec![1, 1, 2, 2, 3, 1]).distinct();
//! let recorder = Recorder::subscribe(&stream);
//!
//! assert_eq!(recorder.elements(), vec![1, 2, 3, 1]);
//! ```

use rivulet_core::{Event, Observer, ReentrantLock, Stream};
use std::sync::Arc;

/// Extension trait providing the [`distinct_by`](Self::distinct_by) and
/// [`distinct`](Self::distinct) operators.
pub trait DistinctExt<E: Event>: Sized
where
    E::Element: Clone,
{
    /// Forwards an element when `are_distinct(previous, current)` returns `true`.
    fn distinct_by<F>(self, are_distinct: F) -> Stream<E>
    where
        F: Fn(&E::Element, &E::Element) -> bool + Send + Sync + 'static;

    /// Forwards an element when it differs from its predecessor.
    fn distinct(self) -> Stream<E>
    where
        E::Element: PartialEq,
    {
        self.distinct_by(|previous, current| previous != current)
    }
}

impl<E: Event> DistinctExt<E> for Stream<E>
where
    E::Element: Clone,
{
    fn distinct_by<F>(self, are_distinct: F) -> Stream<E>
    where
        F: Fn(&E::Element, &E::Element) -> bool + Send + Sync + 'static,
    {
        let are_distinct = Arc::new(are_distinct);
        Stream::new(move |observer: Observer<E>| {
            let last: ReentrantLock<Option<E::Element>> = ReentrantLock::new(None);
            let are_distinct = Arc::clone(&are_distinct);
            self.observe(Observer::new(move |event: E| {
                let guard = last.lock();
                let forward = match event.element() {
                    Some(current) => {
                        let mut last = guard.borrow_mut();
                        let forward = last
                            .as_ref()
                            .map_or(true, |previous| are_distinct(previous, current));
                        *last = Some(current.clone());
                        forward
                    }
                    None => true,
                };
                if forward {
                    observer.on(event);
                }
            }))
        })
    }
}

/// Extension trait providing [`distinct_optional`](Self::distinct_optional)
/// for streams of optional elements.
pub trait DistinctOptionalExt<E, T>: Sized
where
    E: Event<Element = Option<T>>,
{
    /// Suppresses consecutive duplicates of optional elements.
    ///
    /// Two absent values are equal; an absent and a present value are distinct;
    /// two present values are compared with `PartialEq`.
    fn distinct_optional(self) -> Stream<E>;
}

impl<E, T> DistinctOptionalExt<E, T> for Stream<E>
where
    E: Event<Element = Option<T>>,
    T: PartialEq + Clone + Send + 'static,
{
    fn distinct_optional(self) -> Stream<E> {
        self.distinct_by(|previous, current| match (previous, current) {
            (None, None) => false,
            (Some(previous), Some(current)) => previous != current,
            _ => true,
        })
    }
}

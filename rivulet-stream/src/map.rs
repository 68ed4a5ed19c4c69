// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Element and event transformation.
//!
//! ```
//! use rivulet_core::{Signal, Stream};
//! use rivulet_stream::prelude::*;
//! use rivulet_test_utils::Recorder;
//!
//! let lengths = Stream::<Signal<&str>>::sequence(vec!["a", "bcd"]).map(|s| s.len());
//! let recorder = Recorder::subscribe(&lengths);
//!
//! assert_eq!(recorder.elements(), vec![1, 3]);
//! assert!(recorder.is_completed());
//! ```

use rivulet_core::{Event, Observer, Stream};
use std::sync::Arc;

/// Extension trait providing the [`map`](Self::map) and
/// [`map_event`](Self::map_event) operators.
pub trait MapExt<E: Event>: Sized {
    /// Transforms every element. Terminations pass through unchanged.
    fn map<U, F>(self, transform: F) -> Stream<E::With<U>>
    where
        U: Send + 'static,
        F: Fn(E::Element) -> U + Send + Sync + 'static;

    /// Transforms every event, including terminations, into an event of another family.
    ///
    /// The transform must keep the observer contract: a termination maps to a
    /// termination.
    fn map_event<R, F>(self, transform: F) -> Stream<R>
    where
        R: Event,
        F: Fn(E) -> R + Send + Sync + 'static;
}

impl<E: Event> MapExt<E> for Stream<E> {
    fn map<U, F>(self, transform: F) -> Stream<E::With<U>>
    where
        U: Send + 'static,
        F: Fn(E::Element) -> U + Send + Sync + 'static,
    {
        let transform = Arc::new(transform);
        Stream::new(move |observer: Observer<E::With<U>>| {
            let transform = Arc::clone(&transform);
            self.observe(Observer::new(move |event: E| {
                observer.on(event.map_element(|element| transform(element)))
            }))
        })
    }

    fn map_event<R, F>(self, transform: F) -> Stream<R>
    where
        R: Event,
        F: Fn(E) -> R + Send + Sync + 'static,
    {
        let transform = Arc::new(transform);
        Stream::new(move |observer: Observer<R>| {
            let transform = Arc::clone(&transform);
            self.observe(Observer::new(move |event: E| observer.on(transform(event))))
        })
    }
}

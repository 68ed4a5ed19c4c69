// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Map-then-flatten shorthands.
//!
//! Each operator maps every element to an inner stream and flattens the result
//! with the matching strategy: [`merge_inner`](crate::MergeInnerExt::merge_inner),
//! [`switch_to_latest`](crate::SwitchToLatestExt::switch_to_latest) or
//! [`concat_inner`](crate::ConcatInnerExt::concat_inner).
//!
//! ```
//! use rivulet_core::{Signal, Stream};
//! use rivulet_stream::prelude::*;
//! use rivulet_test_utils::Recorder;
//!
//! let expanded = Stream::<Signal<i32>>::sequence(vec![1, 2])
//!     .flat_map_concat(|x| Stream::<Signal<i32>>::sequence(vec![x, x * 10]));
//!
//! assert_eq!(Recorder::subscribe(&expanded).elements(), vec![1, 10, 2, 20]);
//! ```

use crate::concat_inner::ConcatInnerExt;
use crate::map::MapExt;
use crate::merge_inner::MergeInnerExt;
use crate::switch_to_latest::SwitchToLatestExt;
use rivulet_core::{Event, Stream};

/// Extension trait providing the `flat_map_*` operators.
pub trait FlatMapExt<E: Event>: Sized {
    /// Maps each element to a stream and subscribes to all of them concurrently.
    fn flat_map_merge<I, F>(self, transform: F) -> Stream<I>
    where
        I: Event<Failure = E::Failure>,
        F: Fn(E::Element) -> Stream<I> + Send + Sync + 'static;

    /// Maps each element to a stream and follows only the newest one.
    fn flat_map_latest<I, F>(self, transform: F) -> Stream<I>
    where
        I: Event<Failure = E::Failure>,
        F: Fn(E::Element) -> Stream<I> + Send + Sync + 'static;

    /// Maps each element to a stream and subscribes to them one after another.
    fn flat_map_concat<I, F>(self, transform: F) -> Stream<I>
    where
        I: Event<Failure = E::Failure>,
        F: Fn(E::Element) -> Stream<I> + Send + Sync + 'static;
}

impl<E: Event> FlatMapExt<E> for Stream<E> {
    fn flat_map_merge<I, F>(self, transform: F) -> Stream<I>
    where
        I: Event<Failure = E::Failure>,
        F: Fn(E::Element) -> Stream<I> + Send + Sync + 'static,
    {
        self.map(transform).merge_inner()
    }

    fn flat_map_latest<I, F>(self, transform: F) -> Stream<I>
    where
        I: Event<Failure = E::Failure>,
        F: Fn(E::Element) -> Stream<I> + Send + Sync + 'static,
    {
        self.map(transform).switch_to_latest()
    }

    fn flat_map_concat<I, F>(self, transform: F) -> Stream<I>
    where
        I: Event<Failure = E::Failure>,
        F: Fn(E::Element) -> Stream<I> + Send + Sync + 'static,
    {
        self.map(transform).concat_inner()
    }
}

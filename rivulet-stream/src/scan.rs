// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stateful accumulation.
//!
//! `scan` emits the seed as soon as it is subscribed, then the running fold
//! after every element:
//!
//! ```
//! use rivulet_core::{Signal, Stream};
//! use rivulet_stream::prelude::*;
//! use rivulet_test_utils::Recorder;
//!
//! let totals = Stream::<Signal<i32>>::sequence(vec![1, 2, 3]).scan(0, |acc, x| acc + x);
//! let recorder = Recorder::subscribe(&totals);
//!
//! assert_eq!(recorder.elements(), vec![0, 1, 3, 6]);
//! ```

use rivulet_core::{Event, Observer, ReentrantLock, Stream};
use std::sync::Arc;

/// Extension trait providing the [`scan`](Self::scan) operator.
pub trait ScanExt<E: Event>: Sized {
    /// Emits `seed` on subscription, then the accumulator after folding in each element.
    fn scan<A, F>(self, seed: A, fold: F) -> Stream<E::With<A>>
    where
        A: Clone + Send + Sync + 'static,
        F: Fn(A, E::Element) -> A + Send + Sync + 'static;
}

impl<E: Event> ScanExt<E> for Stream<E> {
    fn scan<A, F>(self, seed: A, fold: F) -> Stream<E::With<A>>
    where
        A: Clone + Send + Sync + 'static,
        F: Fn(A, E::Element) -> A + Send + Sync + 'static,
    {
        let fold = Arc::new(fold);
        Stream::new(move |observer: Observer<E::With<A>>| {
            observer.next(seed.clone());

            let accumulator = ReentrantLock::new(seed.clone());
            let fold = Arc::clone(&fold);
            self.observe(Observer::new(move |event: E| match event.retype::<A>() {
                Ok(element) => {
                    let guard = accumulator.lock();
                    let next = {
                        let mut acc = guard.borrow_mut();
                        let next = fold(acc.clone(), element);
                        *acc = next.clone();
                        next
                    };
                    observer.next(next);
                }
                Err(termination) => observer.on(termination),
            }))
        })
    }
}

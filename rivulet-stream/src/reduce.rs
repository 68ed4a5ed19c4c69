// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Event, Observer, ReentrantLock, Stream, Termination};
use std::sync::Arc;

/// Extension trait providing the [`reduce`](Self::reduce) operator.
pub trait ReduceExt<E: Event>: Sized {
    /// Folds every element into an accumulator and emits it once, on completion.
    ///
    /// An empty stream emits `seed`. A failure is forwarded without emitting.
    ///
    /// ```
    /// use rivulet_core::{Signal, Stream};
    /// use rivulet_stream::prelude::*;
    /// use rivulet_test_utils::Recorder;
    ///
    /// let sum = Stream::<Signal<i32>>::sequence(vec![1, 2, 3]).reduce(0, |acc, x| acc + x);
    ///
    /// assert_eq!(Recorder::subscribe(&sum).elements(), vec![6]);
    /// ```
    fn reduce<A, F>(self, seed: A, fold: F) -> Stream<E::With<A>>
    where
        A: Clone + Send + Sync + 'static,
        F: Fn(A, E::Element) -> A + Send + Sync + 'static;
}

impl<E: Event> ReduceExt<E> for Stream<E> {
    fn reduce<A, F>(self, seed: A, fold: F) -> Stream<E::With<A>>
    where
        A: Clone + Send + Sync + 'static,
        F: Fn(A, E::Element) -> A + Send + Sync + 'static,
    {
        let fold = Arc::new(fold);
        Stream::new(move |observer: Observer<E::With<A>>| {
            let accumulator = ReentrantLock::new(Some(seed.clone()));
            let fold = Arc::clone(&fold);
            self.observe(Observer::new(move |event: E| {
                let guard = accumulator.lock();
                match event.into_parts() {
                    Ok(element) => {
                        let mut acc = guard.borrow_mut();
                        *acc = acc.take().map(|acc| fold(acc, element));
                    }
                    Err(Termination::Completed) => {
                        let result = guard.borrow_mut().take();
                        if let Some(result) = result {
                            observer.next(result);
                        }
                        observer.completed();
                    }
                    Err(failure) => observer.on(<E::With<A> as Event>::terminated(failure)),
                }
            }))
        })
    }
}

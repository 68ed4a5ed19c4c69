// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Combination of the latest values of two sources.
//!
//! Nothing is emitted until both sources have produced at least one event.
//! After that, every event from either side triggers the combiner.
//!
//! ```
//! use rivulet_core::{Signal, Stream};
//! use rivulet_stream::prelude::*;
//! use rivulet_test_utils::{test_source, Recorder};
//!
//! let (temperature, temperatures) = test_source::<Signal<i32>>();
//! let (unit, units) = test_source::<Signal<&str>>();
//!
//! let readings = temperatures.combine_latest(units, |t, u| format!("{t}{u}"));
//! let recorder = Recorder::subscribe(&readings);
//!
//! temperature.next(21).unwrap();
//! unit.next("C").unwrap();
//! temperature.next(22).unwrap();
//!
//! assert_eq!(recorder.elements(), vec!["21C".to_string(), "22C".to_string()]);
//! ```

use crate::types::{CombineLatestState, Side};
use rivulet_core::{CompositeDisposable, Event, Observer, ReentrantLock, Stream, Termination};
use std::sync::Arc;

struct Latest<A: Event, B: Event> {
    left: Option<A>,
    left_element: Option<A::Element>,
    right: Option<B>,
    right_element: Option<B::Element>,
}

impl<A: Event, B: Event> Latest<A, B> {
    fn combine<R>(
        &self,
        fired: Side,
        combiner: &dyn Fn(CombineLatestState<'_, A, B>) -> Option<R>,
    ) -> Option<R> {
        match (&self.left, &self.right) {
            (Some(left), Some(right)) => combiner(CombineLatestState {
                left,
                left_element: self.left_element.as_ref(),
                right,
                right_element: self.right_element.as_ref(),
                fired,
            }),
            _ => None,
        }
    }
}

/// Extension trait providing the [`combine_latest_with`](Self::combine_latest_with)
/// and [`combine_latest`](Self::combine_latest) operators.
pub trait CombineLatestExt<A: Event>: Sized
where
    A::Element: Clone,
{
    /// Combines the latest events of both sources with a raw combiner.
    ///
    /// The combiner runs on every event once both sides have produced one, and
    /// decides what to emit, terminations included. Returning `None` emits nothing.
    fn combine_latest_with<B, R, F>(self, other: Stream<B>, combiner: F) -> Stream<R>
    where
        B: Event,
        B::Element: Clone,
        R: Event,
        F: for<'a> Fn(CombineLatestState<'a, A, B>) -> Option<R> + Send + Sync + 'static;

    /// Combines the latest elements of both sources.
    ///
    /// Once both sides have produced an event:
    ///
    /// - a failure on either side is forwarded immediately
    /// - the stream completes when both sides have completed
    /// - a completed side keeps contributing its last element
    fn combine_latest<B, U, F>(self, other: Stream<B>, combine: F) -> Stream<A::With<U>>
    where
        A: Clone,
        B: Event<Failure = A::Failure> + Clone,
        B::Element: Clone,
        U: Send + 'static,
        F: Fn(&A::Element, &B::Element) -> U + Send + Sync + 'static,
    {
        self.combine_latest_with(other, move |state| {
            let fired_failure = match state.fired {
                Side::Left => state.left.clone().into_parts().err(),
                Side::Right => state.right.clone().into_parts().err(),
            };
            if let Some(Termination::Failed(failure)) = fired_failure {
                return Some(<A::With<U> as Event>::terminated(Termination::Failed(failure)));
            }
            if state.both_terminated() {
                return Some(<A::With<U> as Event>::completed());
            }
            if state.fired_termination() {
                return None;
            }
            match (state.left_element, state.right_element) {
                (Some(left), Some(right)) => Some(<A::With<U> as Event>::next(combine(left, right))),
                _ => None,
            }
        })
    }
}

impl<A: Event> CombineLatestExt<A> for Stream<A>
where
    A::Element: Clone,
{
    fn combine_latest_with<B, R, F>(self, other: Stream<B>, combiner: F) -> Stream<R>
    where
        B: Event,
        B::Element: Clone,
        R: Event,
        F: for<'a> Fn(CombineLatestState<'a, A, B>) -> Option<R> + Send + Sync + 'static,
    {
        let combiner: Arc<Combiner<A, B, R>> = Arc::new(combiner);
        Stream::new(move |observer: Observer<R>| {
            let combination = Arc::new(CombineLatest {
                latest: ReentrantLock::new(Latest {
                    left: None,
                    left_element: None,
                    right: None,
                    right_element: None,
                }),
                combiner: Arc::clone(&combiner),
                observer,
            });

            let subscriptions = CompositeDisposable::new();
            let left = Arc::clone(&combination);
            subscriptions.add(self.observe(Observer::new(move |event| left.on_left(event))));
            let right = combination;
            subscriptions.add(other.observe(Observer::new(move |event| right.on_right(event))));
            Arc::new(subscriptions)
        })
    }
}

type Combiner<A, B, R> = dyn for<'a> Fn(CombineLatestState<'a, A, B>) -> Option<R> + Send + Sync;

struct CombineLatest<A: Event, B: Event, R> {
    latest: ReentrantLock<Latest<A, B>>,
    combiner: Arc<Combiner<A, B, R>>,
    observer: Observer<R>,
}

impl<A, B, R> CombineLatest<A, B, R>
where
    A: Event,
    A::Element: Clone,
    B: Event,
    B::Element: Clone,
    R: Event,
{
    fn on_left(&self, event: A) {
        let guard = self.latest.lock();
        let combined = {
            let mut latest = guard.borrow_mut();
            if let Some(element) = event.element() {
                latest.left_element = Some(element.clone());
            }
            latest.left = Some(event);
            latest.combine(Side::Left, &*self.combiner)
        };
        if let Some(event) = combined {
            self.observer.on(event);
        }
    }

    fn on_right(&self, event: B) {
        let guard = self.latest.lock();
        let combined = {
            let mut latest = guard.borrow_mut();
            if let Some(element) = event.element() {
                latest.right_element = Some(element.clone());
            }
            latest.right = Some(event);
            latest.combine(Side::Right, &*self.combiner)
        };
        if let Some(event) = combined {
            self.observer.on(event);
        }
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Flattening of a stream of streams that only follows the newest inner stream.
//!
//! Each inner stream that arrives disposes the previous one. Events of a
//! superseded inner stream that are already in flight are dropped. Completion is
//! forwarded once the outer stream and the currently active inner stream have
//! both completed.
//!
//! ```
//! use rivulet_core::{Signal, Stream};
//! use rivulet_stream::prelude::*;
//! use rivulet_test_utils::{test_source, Recorder};
//!
//! let (outer, streams) = test_source::<Signal<Stream<Signal<&str>>>>();
//! let (first, first_stream) = test_source::<Signal<&str>>();
//! let (second, second_stream) = test_source::<Signal<&str>>();
//! let recorder = Recorder::subscribe(&streams.switch_to_latest());
//!
//! outer.next(first_stream).unwrap();
//! first.next("a").unwrap();
//! outer.next(second_stream).unwrap();
//! first.next("stale").unwrap();
//! second.next("b").unwrap();
//!
//! assert_eq!(recorder.elements(), vec!["a", "b"]);
//! ```

use rivulet_core::{
    CompositeDisposable, Event, Observer, ReentrantLock, SerialDisposable, Stream, Termination,
};
use std::sync::Arc;

struct SwitchState {
    generation: u64,
    outer_completed: bool,
    inner_completed: bool,
}

/// Extension trait providing [`switch_to_latest_with`](Self::switch_to_latest_with)
/// and [`switch_to_latest`](Self::switch_to_latest).
pub trait SwitchToLatestExt<O, I>: Sized
where
    O: Event<Element = Stream<I>>,
    I: Event,
{
    /// Observes only the most recent inner stream.
    ///
    /// A failure of the outer stream is handed to `propagate`.
    fn switch_to_latest_with<P>(self, propagate: P) -> Stream<I>
    where
        P: Fn(O::Failure, &Observer<I>) + Send + Sync + 'static;

    /// Observes only the most recent inner stream, forwarding an outer failure
    /// as an inner failure.
    fn switch_to_latest(self) -> Stream<I>
    where
        I: Event<Failure = O::Failure>,
    {
        self.switch_to_latest_with(|failure, observer| {
            observer.on(I::terminated(Termination::Failed(failure)))
        })
    }
}

impl<O, I> SwitchToLatestExt<O, I> for Stream<O>
where
    O: Event<Element = Stream<I>>,
    I: Event,
{
    fn switch_to_latest_with<P>(self, propagate: P) -> Stream<I>
    where
        P: Fn(O::Failure, &Observer<I>) + Send + Sync + 'static,
    {
        let propagate = Arc::new(propagate);
        Stream::new(move |observer: Observer<I>| {
            let state = Arc::new(ReentrantLock::new(SwitchState {
                generation: 0,
                outer_completed: false,
                inner_completed: true,
            }));
            let current = Arc::new(SerialDisposable::new());

            let outer_sink = {
                let current = Arc::clone(&current);
                let propagate = Arc::clone(&propagate);
                Observer::new(move |event: O| {
                    let guard = state.lock();
                    match event.into_parts() {
                        Ok(inner) => {
                            let generation = {
                                let mut state = guard.borrow_mut();
                                state.generation += 1;
                                state.inner_completed = false;
                                state.generation
                            };
                            let slot = Arc::new(SerialDisposable::new());
                            current.set(slot.clone());

                            let inner_sink = {
                                let state = Arc::clone(&state);
                                let observer = observer.clone();
                                Observer::new(move |event: I| {
                                    let guard = state.lock();
                                    if guard.borrow().generation != generation {
                                        return;
                                    }
                                    if event.is_completion() {
                                        let finished = {
                                            let mut state = guard.borrow_mut();
                                            state.inner_completed = true;
                                            state.outer_completed
                                        };
                                        if finished {
                                            observer.on(event);
                                        }
                                    } else {
                                        observer.on(event);
                                    }
                                })
                            };
                            slot.set(inner.observe(inner_sink));
                        }
                        Err(Termination::Completed) => {
                            let finished = {
                                let mut state = guard.borrow_mut();
                                state.outer_completed = true;
                                state.inner_completed
                            };
                            if finished {
                                observer.completed();
                            }
                        }
                        Err(Termination::Failed(failure)) => propagate(failure, &observer),
                    }
                })
            };

            let subscriptions = CompositeDisposable::new();
            subscriptions.add(current);
            subscriptions.add(self.observe(outer_sink));
            Arc::new(subscriptions)
        })
    }
}

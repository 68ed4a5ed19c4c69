// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Flattening of a stream of streams by strictly sequential subscription.
//!
//! Inner streams are queued in arrival order. The next one is subscribed only
//! after the active one completes. Completion is forwarded once the outer stream
//! has completed and the queue is drained.
//!
//! ```
//! use rivulet_core::{Signal, Stream};
//! use rivulet_stream::prelude::*;
//! use rivulet_test_utils::{test_source, Recorder};
//!
//! let (outer, streams) = test_source::<Signal<Stream<Signal<i32>>>>();
//! let (first, first_stream) = test_source::<Signal<i32>>();
//! let recorder = Recorder::subscribe(&streams.concat_inner());
//!
//! outer.next(first_stream).unwrap();
//! outer.next(Stream::sequence(vec![10, 20])).unwrap();
//! first.next(1).unwrap();
//! first.complete().unwrap();
//!
//! assert_eq!(recorder.elements(), vec![1, 10, 20]);
//! ```

use rivulet_core::{
    CompositeDisposable, Event, Observer, ReentrantLock, SerialDisposable, Stream, Termination,
};
use std::collections::VecDeque;
use std::sync::Arc;

struct ConcatState<I> {
    queue: VecDeque<Stream<I>>,
    active: bool,
    outer_completed: bool,
}

struct ConcatInner<I> {
    state: ReentrantLock<ConcatState<I>>,
    current: Arc<SerialDisposable>,
    observer: Observer<I>,
}

impl<I: Event> ConcatInner<I> {
    fn enqueue(self: &Arc<Self>, inner: Stream<I>) {
        let _guard = self.state.lock();
        self.state.with(|state| state.queue.push_back(inner));
        self.subscribe_next();
    }

    fn outer_completed(self: &Arc<Self>) {
        let _guard = self.state.lock();
        self.state.with(|state| state.outer_completed = true);
        self.subscribe_next();
    }

    fn inner_completed(self: &Arc<Self>) {
        let _guard = self.state.lock();
        self.state.with(|state| state.active = false);
        self.subscribe_next();
    }

    /// Starts the next queued stream if none is active, or completes once
    /// nothing is left to run.
    fn subscribe_next(self: &Arc<Self>) {
        let guard = self.state.lock();
        let (next, drained) = {
            let mut state = guard.borrow_mut();
            if state.active {
                return;
            }
            let next = state.queue.pop_front();
            state.active = next.is_some();
            (next, state.outer_completed)
        };

        let Some(next) = next else {
            if drained {
                self.observer.completed();
            }
            return;
        };

        let slot = Arc::new(SerialDisposable::new());
        self.current.set(slot.clone());

        let this = Arc::clone(self);
        slot.set(next.observe(Observer::new(move |event: I| {
            if event.is_completion() {
                this.inner_completed();
            } else {
                this.observer.on(event);
            }
        })));
    }
}

/// Extension trait providing [`concat_inner_with`](Self::concat_inner_with) and
/// [`concat_inner`](Self::concat_inner).
pub trait ConcatInnerExt<O, I>: Sized
where
    O: Event<Element = Stream<I>>,
    I: Event,
{
    /// Observes inner streams one after another, in arrival order.
    ///
    /// A failure of the outer stream is handed to `propagate`.
    fn concat_inner_with<P>(self, propagate: P) -> Stream<I>
    where
        P: Fn(O::Failure, &Observer<I>) + Send + Sync + 'static;

    /// Observes inner streams one after another, forwarding an outer failure as
    /// an inner failure.
    fn concat_inner(self) -> Stream<I>
    where
        I: Event<Failure = O::Failure>,
    {
        self.concat_inner_with(|failure, observer| {
            observer.on(I::terminated(Termination::Failed(failure)))
        })
    }
}

impl<O, I> ConcatInnerExt<O, I> for Stream<O>
where
    O: Event<Element = Stream<I>>,
    I: Event,
{
    fn concat_inner_with<P>(self, propagate: P) -> Stream<I>
    where
        P: Fn(O::Failure, &Observer<I>) + Send + Sync + 'static,
    {
        let propagate = Arc::new(propagate);
        Stream::new(move |observer: Observer<I>| {
            let current = Arc::new(SerialDisposable::new());
            let concat = Arc::new(ConcatInner {
                state: ReentrantLock::new(ConcatState {
                    queue: VecDeque::new(),
                    active: false,
                    outer_completed: false,
                }),
                current: Arc::clone(&current),
                observer,
            });

            let outer_sink = {
                let propagate = Arc::clone(&propagate);
                Observer::new(move |event: O| match event.into_parts() {
                    Ok(inner) => concat.enqueue(inner),
                    Err(Termination::Completed) => concat.outer_completed(),
                    Err(Termination::Failed(failure)) => {
                        let _guard = concat.state.lock();
                        propagate(failure, &concat.observer);
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

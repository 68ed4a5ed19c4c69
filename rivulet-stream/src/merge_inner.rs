// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Flattening of a stream of streams by concurrent subscription.
//!
//! Every inner stream is subscribed as soon as it arrives. Completion is
//! forwarded once the outer stream and every inner stream subscribed so far
//! have completed. A failure of any inner stream ends the whole flattening.
//!
//! ```
//! use rivulet_core::{Signal, Stream};
//! use rivulet_stream::prelude::*;
//! use rivulet_test_utils::Recorder;
//!
//! let streams = Stream::<Signal<Stream<Signal<i32>>>>::sequence(vec![
//!     Stream::sequence(vec![1, 2]),
//!     Stream::sequence(vec![3]),
//! ]);
//! let recorder = Recorder::subscribe(&streams.merge_inner());
//!
//! assert_eq!(recorder.elements(), vec![1, 2, 3]);
//! assert!(recorder.is_completed());
//! ```

use rivulet_core::{
    CompositeDisposable, Disposable, Event, Observer, ReentrantLock, SerialDisposable, Stream,
    Termination,
};
use std::sync::Arc;

/// Extension trait providing [`merge_inner_with`](Self::merge_inner_with) and
/// [`merge_inner`](Self::merge_inner).
pub trait MergeInnerExt<O, I>: Sized
where
    O: Event<Element = Stream<I>>,
    I: Event,
{
    /// Flattens by subscribing to every inner stream as it arrives.
    ///
    /// A failure of the outer stream is handed to `propagate`, since the inner
    /// event family may not be able to express it.
    fn merge_inner_with<P>(self, propagate: P) -> Stream<I>
    where
        P: Fn(O::Failure, &Observer<I>) + Send + Sync + 'static;

    /// Flattens by subscribing to every inner stream as it arrives, forwarding an
    /// outer failure as an inner failure.
    fn merge_inner(self) -> Stream<I>
    where
        I: Event<Failure = O::Failure>,
    {
        self.merge_inner_with(|failure, observer| {
            observer.on(I::terminated(Termination::Failed(failure)))
        })
    }
}

impl<O, I> MergeInnerExt<O, I> for Stream<O>
where
    O: Event<Element = Stream<I>>,
    I: Event,
{
    fn merge_inner_with<P>(self, propagate: P) -> Stream<I>
    where
        P: Fn(O::Failure, &Observer<I>) + Send + Sync + 'static,
    {
        let propagate = Arc::new(propagate);
        Stream::new(move |observer: Observer<I>| {
            merge_into(&self, observer, Arc::clone(&propagate))
        })
    }
}

fn merge_into<O, I, P>(
    outer: &Stream<O>,
    observer: Observer<I>,
    propagate: Arc<P>,
) -> Arc<CompositeDisposable>
where
    O: Event<Element = Stream<I>>,
    I: Event,
    P: Fn(O::Failure, &Observer<I>) + Send + Sync + 'static,
{
    let subscriptions = Arc::new(CompositeDisposable::new());
    // The outer stream counts as one pending production.
    let pending = Arc::new(ReentrantLock::new(1_usize));

    let complete_one = {
        let pending = Arc::clone(&pending);
        let observer = observer.clone();
        move || {
            let guard = pending.lock();
            let drained = {
                let mut pending = guard.borrow_mut();
                *pending -= 1;
                *pending == 0
            };
            if drained {
                observer.completed();
            }
        }
    };
    let complete_one = Arc::new(complete_one);

    let outer_sink = {
        let subscriptions = Arc::clone(&subscriptions);
        Observer::new(move |event: O| match event.into_parts() {
            Ok(inner) => {
                pending.with(|pending| *pending += 1);
                let slot = Arc::new(SerialDisposable::new());
                subscriptions.add(slot.clone());

                let inner_sink = {
                    let slot = Arc::downgrade(&slot);
                    let pending = Arc::clone(&pending);
                    let observer = observer.clone();
                    let complete_one = Arc::clone(&complete_one);
                    Observer::new(move |event: I| {
                        let _guard = pending.lock();
                        if event.is_completion() {
                            // A disposed slot is pruned by the next `add`.
                            if let Some(slot) = slot.upgrade() {
                                slot.dispose();
                            }
                            complete_one();
                        } else {
                            observer.on(event);
                        }
                    })
                };
                slot.set(inner.observe(inner_sink));
            }
            Err(Termination::Completed) => complete_one(),
            Err(Termination::Failed(failure)) => {
                let _guard = pending.lock();
                propagate(failure, &observer);
            }
        })
    };

    subscriptions.add(outer.observe(outer_sink));
    subscriptions
}

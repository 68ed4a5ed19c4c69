// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pairwise combination of two sources.
//!
//! Events are buffered per source in arrival order. While both buffers hold
//! an event, the heads are paired and combined. The pairing that produces a
//! termination ends the stream and disposes both sources. Unmatched events
//! are dropped.
//!
//! ```
//! use rivulet_core::{Signal, Stream};
//! use rivulet_stream::prelude::*;
//! use rivulet_test_utils::Recorder;
//!
//! let numbers = Stream::<Signal<i32>>::sequence(vec![1, 2, 3]);
//! let letters = Stream::<Signal<&str>>::sequence(vec!["x", "y"]);
//! let recorder = Recorder::subscribe(&numbers.zip(letters));
//!
//! assert_eq!(recorder.elements(), vec![(1, "x"), (2, "y")]);
//! assert!(recorder.is_completed());
//! ```

use rivulet_core::{CompositeDisposable, Disposable, Event, Observer, ReentrantLock, Stream};
use std::collections::VecDeque;
use std::sync::Arc;

/// Extension trait providing the [`zip_with`](Self::zip_with) and [`zip`](Self::zip) operators.
pub trait ZipExt<A: Event>: Sized {
    /// Pairs events of both sources in arrival order and combines each pair into
    /// one event. The first combined termination ends the stream.
    fn zip_with<B, R, F>(self, other: Stream<B>, combine: F) -> Stream<R>
    where
        B: Event,
        R: Event,
        F: Fn(A, B) -> R + Send + Sync + 'static;

    /// Pairs the elements of both sources into tuples.
    ///
    /// A pair holding a termination yields that termination, the left one first.
    fn zip<B>(self, other: Stream<B>) -> Stream<A::With<(A::Element, B::Element)>>
    where
        B: Event<Failure = A::Failure>,
    {
        self.zip_with(other, |left: A, right: B| {
            match (left.into_parts(), right.into_parts()) {
                (Ok(left), Ok(right)) => {
                    <A::With<(A::Element, B::Element)> as Event>::next((left, right))
                }
                (Err(termination), _) | (_, Err(termination)) => {
                    <A::With<(A::Element, B::Element)> as Event>::terminated(termination)
                }
            }
        })
    }
}

impl<A: Event> ZipExt<A> for Stream<A> {
    fn zip_with<B, R, F>(self, other: Stream<B>, combine: F) -> Stream<R>
    where
        B: Event,
        R: Event,
        F: Fn(A, B) -> R + Send + Sync + 'static,
    {
        let combine: Arc<dyn Fn(A, B) -> R + Send + Sync> = Arc::new(combine);
        Stream::new(move |observer: Observer<R>| {
            let subscriptions = Arc::new(CompositeDisposable::new());
            let zip = Arc::new(Zip {
                buffers: ReentrantLock::new(Buffers {
                    left: VecDeque::new(),
                    right: VecDeque::new(),
                }),
                combine: Arc::clone(&combine),
                observer,
                subscriptions: Arc::clone(&subscriptions),
            });

            let left = Arc::clone(&zip);
            subscriptions.add(self.observe(Observer::new(move |event: A| {
                left.on_event(|buffers| buffers.left.push_back(event))
            })));
            subscriptions.add(other.observe(Observer::new(move |event: B| {
                zip.on_event(|buffers| buffers.right.push_back(event))
            })));
            subscriptions
        })
    }
}

struct Buffers<A, B> {
    left: VecDeque<A>,
    right: VecDeque<B>,
}

struct Zip<A, B, R> {
    buffers: ReentrantLock<Buffers<A, B>>,
    combine: Arc<dyn Fn(A, B) -> R + Send + Sync>,
    observer: Observer<R>,
    subscriptions: Arc<CompositeDisposable>,
}

impl<A: Event, B: Event, R: Event> Zip<A, B, R> {
    fn on_event(&self, push: impl FnOnce(&mut Buffers<A, B>)) {
        let guard = self.buffers.lock();
        push(&mut guard.borrow_mut());

        loop {
            let pair = {
                let mut buffers = guard.borrow_mut();
                if buffers.left.is_empty() || buffers.right.is_empty() {
                    None
                } else {
                    buffers.left.pop_front().zip(buffers.right.pop_front())
                }
            };
            let Some((left, right)) = pair else {
                break;
            };

            let event = (self.combine)(left, right);
            let terminal = event.is_termination();
            self.observer.on(event);
            if terminal {
                self.subscriptions.dispose();
                break;
            }
        }
    }
}

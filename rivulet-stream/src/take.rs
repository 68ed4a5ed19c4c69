// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Index and count based selection: `element_at`, `take_first`, `take_last`,
//! `first` and `last`.
//!
//! Operators that finish early (`element_at`, `take_first`) complete the
//! downstream subscription, which disposes the upstream one.
//!
//! ```
//! use rivulet_core::{Signal, Stream};
//! use rivulet_stream::prelude::*;
//! use rivulet_test_utils::Recorder;
//!
//! let source = Stream::<Signal<i32>>::sequence(1..=5);
//!
//! assert_eq!(Recorder::subscribe(&source.clone().take_first(2)).elements(), vec![1, 2]);
//! assert_eq!(Recorder::subscribe(&source.clone().take_last(2)).elements(), vec![4, 5]);
//! assert_eq!(Recorder::subscribe(&source.element_at(3)).elements(), vec![4]);
//! ```

use rivulet_core::{Event, NonDisposable, Observer, ReentrantLock, Stream};
use std::collections::VecDeque;

/// Extension trait providing the taking operators.
pub trait TakeExt<E: Event>: Sized {
    /// Forwards only the element at zero-based `index`, then completes.
    fn element_at(self, index: usize) -> Stream<E>;

    /// Forwards the first `count` elements, then completes.
    ///
    /// With `count == 0` the stream completes synchronously without subscribing upstream.
    fn take_first(self, count: usize) -> Stream<E>;

    /// On completion, forwards the last `count` elements followed by the completion.
    ///
    /// A failure is forwarded as-is, without the buffered elements.
    fn take_last(self, count: usize) -> Stream<E>;

    /// Forwards the first element, then completes.
    fn first(self) -> Stream<E> {
        self.take_first(1)
    }

    /// Forwards the last element on completion.
    fn last(self) -> Stream<E> {
        self.take_last(1)
    }
}

impl<E: Event> TakeExt<E> for Stream<E> {
    fn element_at(self, index: usize) -> Stream<E> {
        Stream::new(move |observer: Observer<E>| {
            let seen = ReentrantLock::new(0_usize);
            self.observe(Observer::new(move |event: E| {
                if event.is_termination() {
                    observer.on(event);
                    return;
                }
                let guard = seen.lock();
                let position = {
                    let mut seen = guard.borrow_mut();
                    let position = *seen;
                    *seen += 1;
                    position
                };
                if position == index {
                    observer.on(event);
                    observer.completed();
                }
            }))
        })
    }

    fn take_first(self, count: usize) -> Stream<E> {
        if count == 0 {
            return Stream::new(|observer: Observer<E>| {
                observer.completed();
                NonDisposable::arc()
            });
        }

        Stream::new(move |observer: Observer<E>| {
            let taken = ReentrantLock::new(0_usize);
            self.observe(Observer::new(move |event: E| {
                if event.is_termination() {
                    observer.on(event);
                    return;
                }
                let guard = taken.lock();
                let taken = {
                    let mut taken = guard.borrow_mut();
                    *taken += 1;
                    *taken
                };
                if taken <= count {
                    observer.on(event);
                }
                if taken == count {
                    observer.completed();
                }
            }))
        })
    }

    fn take_last(self, count: usize) -> Stream<E> {
        Stream::new(move |observer: Observer<E>| {
            let buffer: ReentrantLock<VecDeque<E>> = ReentrantLock::new(VecDeque::new());
            self.observe(Observer::new(move |event: E| {
                let guard = buffer.lock();
                if !event.is_termination() {
                    let mut buffer = guard.borrow_mut();
                    buffer.push_back(event);
                    while buffer.len() > count {
                        buffer.pop_front();
                    }
                    return;
                }

                if event.is_completion() {
                    let flushed = std::mem::take(&mut *guard.borrow_mut());
                    for buffered in flushed {
                        observer.on(buffered);
                    }
                }
                observer.on(event);
            }))
        })
    }
}

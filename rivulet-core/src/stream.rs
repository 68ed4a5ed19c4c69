// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The push-based stream type.
//!
//! A [`Stream`] wraps a producer function `Observer -> Disposer`. It is *cold*:
//! every call to [`Stream::observe`] runs the producer again, yielding an
//! independent production with its own cancellation handle.
//!
//! Each subscription is guarded by a small state machine:
//!
//! - at most one termination is delivered
//! - after termination or disposal, no further event reaches the observer and
//!   the producer's own disposable is disposed exactly once
//! - delivery to the observer is serialized by a reentrant lock, even when the
//!   producer calls back from several threads
//!
//! # Example
//!
//! ```
//! use rivulet_core::{Signal, Stream};
//! use std::sync::{Arc, Mutex};
//!
//! let stream = Stream::<Signal<i32>>::sequence(vec![1, 2, 3]);
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = seen.clone();
//! stream.subscribe(move |event| sink.lock().unwrap().push(event));
//!
//! assert_eq!(
//!     *seen.lock().unwrap(),
//!     vec![Signal::Next(1), Signal::Next(2), Signal::Next(3), Signal::Completed]
//! );
//! ```

use crate::disposable::{Disposable, Disposer, NonDisposable, SerialDisposable};
use crate::event::{Event, Failable};
use crate::lock::ReentrantLock;
use crate::observer::Observer;
use std::fmt;
use std::sync::Arc;

type Producer<E> = dyn Fn(Observer<E>) -> Disposer + Send + Sync;

/// A cold, producer-driven sequence of events.
pub struct Stream<E> {
    producer: Arc<Producer<E>>,
}

impl<E: Event> Stream<E> {
    /// Creates a stream from a producer.
    ///
    /// The producer is invoked once per subscription. It pushes events into the
    /// supplied observer (synchronously or later, from any thread) and returns a
    /// handle that stops its work.
    pub fn new<P>(producer: P) -> Self
    where
        P: Fn(Observer<E>) -> Disposer + Send + Sync + 'static,
    {
        Self {
            producer: Arc::new(producer),
        }
    }

    /// Subscribes `observer`, starting a fresh production.
    pub fn observe(&self, observer: Observer<E>) -> Disposer {
        let serial = Arc::new(SerialDisposable::new());
        let terminated = ReentrantLock::new(false);

        let sink = {
            let serial = Arc::clone(&serial);
            Observer::new(move |event: E| {
                let latch = terminated.lock();
                if *latch.borrow() || serial.is_disposed() {
                    return;
                }

                if event.is_termination() {
                    *latch.borrow_mut() = true;
                    observer.on(event);
                    trace!("subscription terminated, disposing producer");
                    serial.dispose();
                } else {
                    observer.on(event);
                }
            })
        };

        serial.set((self.producer)(sink));
        serial
    }

    /// Subscribes a plain callback, starting a fresh production.
    pub fn subscribe<F>(&self, on_event: F) -> Disposer
    where
        F: Fn(E) + Send + Sync + 'static,
    {
        self.observe(Observer::new(on_event))
    }

    /// Emits `element`, then completes.
    pub fn just(element: E::Element) -> Self
    where
        E::Element: Clone + Sync,
    {
        Self::new(move |observer| {
            observer.next(element.clone());
            observer.completed();
            NonDisposable::arc()
        })
    }

    /// Emits every element of `elements` in order, then completes.
    pub fn sequence<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = E::Element>,
        E::Element: Clone + Sync,
    {
        let elements: Vec<E::Element> = elements.into_iter().collect();
        Self::new(move |observer| {
            for element in &elements {
                observer.next(element.clone());
            }
            observer.completed();
            NonDisposable::arc()
        })
    }

    /// Completes immediately without emitting.
    pub fn completed() -> Self {
        Self::new(|observer| {
            observer.completed();
            NonDisposable::arc()
        })
    }

    /// Never emits and never terminates.
    pub fn never() -> Self {
        Self::new(|_| NonDisposable::arc())
    }
}

impl<E: Failable> Stream<E> {
    /// Fails immediately with `error`.
    pub fn failed(error: E::Failure) -> Self
    where
        E::Failure: Clone + Sync,
    {
        Self::new(move |observer| {
            observer.failed(error.clone());
            NonDisposable::arc()
        })
    }
}

impl<E> Clone for Stream<E> {
    fn clone(&self) -> Self {
        Self {
            producer: Arc::clone(&self.producer),
        }
    }
}

impl<E> fmt::Debug for Stream<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream").finish_non_exhaustive()
    }
}

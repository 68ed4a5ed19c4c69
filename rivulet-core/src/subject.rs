// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber subjects.
//!
//! A subject is both an observer (events are pushed into it) and a source
//! (observers subscribe to it). Every pushed event is broadcast to all current
//! observers.
//!
//! ## Characteristics
//!
//! - **Hot**: subscribing does not start any production.
//! - **History**: [`PublishSubject`] keeps none, [`ReplayOneSubject`] keeps the
//!   latest element, [`ReplaySubject`] keeps up to `limit` elements. Late
//!   observers receive the history first.
//! - **Termination**: the first termination is recorded and replayed to late
//!   observers. Later pushes are rejected with [`RivuletError::SubjectTerminated`].
//! - **Thread-safe**: cheap to clone; all clones share the same state.
//!   Broadcasting is serialized by a reentrant lock.
//!
//! ## Example
//!
//! ```
//! use rivulet_core::{ReplayOneSubject, Signal, Subject};
//! use std::sync::{Arc, Mutex};
//!
//! let subject = ReplayOneSubject::<Signal<&str>>::new();
//! subject.next("first").unwrap();
//! subject.next("second").unwrap();
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! subject.to_stream().subscribe(move |event| sink.lock().unwrap().push(event));
//!
//! subject.next("third").unwrap();
//! assert_eq!(*seen.lock().unwrap(), vec![Signal::Next("second"), Signal::Next("third")]);
//! ```

mod state;

use crate::disposable::Disposer;
use crate::error::Result;
use crate::event::{Event, Failable};
use crate::observer::Observer;
use crate::stream::Stream;
use state::{History, SubjectCore};
use std::sync::Arc;

/// A hot broadcast sink and source.
pub trait Subject<E: Event>: Send + Sync + 'static {
    /// Pushes an event, following the observer contract: events after a
    /// termination are dropped.
    fn on(&self, event: E);

    /// Registers an observer. History is delivered before the call returns.
    fn observe(&self, observer: Observer<E>) -> Disposer;
}

macro_rules! define_subject {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<E: Event + Clone> {
            core: Arc<SubjectCore<E>>,
        }

        impl<E: Event + Clone> $name<E> {
            /// Pushes an event into the subject.
            ///
            /// # Errors
            ///
            /// Returns `RivuletError::SubjectTerminated` once a termination has been pushed.
            pub fn send(&self, event: E) -> Result<()> {
                self.core.send(event)
            }

            /// Pushes an element.
            ///
            /// # Errors
            ///
            /// Returns `RivuletError::SubjectTerminated` once a termination has been pushed.
            pub fn next(&self, element: E::Element) -> Result<()> {
                self.send(E::next(element))
            }

            /// Pushes the completion marker.
            ///
            /// # Errors
            ///
            /// Returns `RivuletError::SubjectTerminated` once a termination has been pushed.
            pub fn complete(&self) -> Result<()> {
                self.send(E::completed())
            }

            /// A stream whose subscriptions observe this subject.
            pub fn to_stream(&self) -> Stream<E> {
                let core = Arc::clone(&self.core);
                Stream::new(move |observer| SubjectCore::observe(&core, observer))
            }

            /// An observer pushing into this subject.
            pub fn as_observer(&self) -> Observer<E> {
                let core = Arc::clone(&self.core);
                Observer::new(move |event| core.on(event))
            }

            /// Returns `true` once a termination has been pushed.
            #[must_use]
            pub fn is_terminated(&self) -> bool {
                self.core.is_terminated()
            }

            /// Number of currently registered observers.
            #[must_use]
            pub fn subscriber_count(&self) -> usize {
                self.core.subscriber_count()
            }
        }

        impl<E: Failable + Clone> $name<E> {
            /// Pushes a failure.
            ///
            /// # Errors
            ///
            /// Returns `RivuletError::SubjectTerminated` once a termination has been pushed.
            pub fn fail(&self, error: E::Failure) -> Result<()> {
                self.send(E::failed(error))
            }
        }

        impl<E: Event + Clone> Subject<E> for $name<E> {
            fn on(&self, event: E) {
                self.core.on(event)
            }

            fn observe(&self, observer: Observer<E>) -> Disposer {
                SubjectCore::observe(&self.core, observer)
            }
        }

        impl<E: Event + Clone> Clone for $name<E> {
            fn clone(&self) -> Self {
                Self {
                    core: Arc::clone(&self.core),
                }
            }
        }
    };
}

define_subject! {
    /// A subject without history: observers only see events pushed after they subscribed.
    PublishSubject
}

define_subject! {
    /// A subject replaying the latest element to late observers.
    ReplayOneSubject
}

define_subject! {
    /// A subject replaying up to `limit` most recent elements to late observers.
    ReplaySubject
}

impl<E: Event + Clone> PublishSubject<E> {
    /// Creates an open subject with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: Arc::new(SubjectCore::new(History::None)),
        }
    }
}

impl<E: Event + Clone> Default for PublishSubject<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event + Clone> ReplayOneSubject<E> {
    /// Creates an open subject with an empty replay slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: Arc::new(SubjectCore::new(History::Latest(None))),
        }
    }
}

impl<E: Event + Clone> Default for ReplayOneSubject<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event + Clone> ReplaySubject<E> {
    /// Creates an open subject retaining up to `limit` elements.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            core: Arc::new(SubjectCore::new(History::ring(limit))),
        }
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Multicast of a single upstream production to many observers.
//!
//! A [`ConnectableStream`] pairs a cold source with a hot subject. Observers
//! register on the subject; nothing flows until [`ConnectableStream::connect`]
//! subscribes the source to the subject.
//!
//! ```
//! use rivulet_core::{Signal, Stream};
//! use rivulet_stream::prelude::*;
//! use rivulet_test_utils::Recorder;
//!
//! let connectable = Stream::<Signal<i32>>::sequence(vec![1, 2, 3]).publish();
//! let first = Recorder::new();
//! let second = Recorder::new();
//! connectable.observe(first.observer());
//! connectable.observe(second.observer());
//!
//! connectable.connect();
//!
//! assert_eq!(first.elements(), vec![1, 2, 3]);
//! assert_eq!(second.elements(), vec![1, 2, 3]);
//! ```

use rivulet_core::{
    ActionDisposable, Disposable, Disposer, Event, Observer, PublishSubject, ReentrantLock,
    ReplayOneSubject, ReplaySubject, SerialDisposable, Stream, Subject,
};
use std::sync::Arc;

/// A source paired with a hot subject, connected on demand.
pub struct ConnectableStream<E> {
    source: Stream<E>,
    subject: Arc<dyn Subject<E>>,
    connection: Arc<ReentrantLock<Option<Arc<SerialDisposable>>>>,
}

impl<E: Event> ConnectableStream<E> {
    /// Pairs `source` with `subject`.
    pub fn new(source: Stream<E>, subject: Arc<dyn Subject<E>>) -> Self {
        Self {
            source,
            subject,
            connection: Arc::new(ReentrantLock::new(None)),
        }
    }

    /// Registers `observer` on the subject without connecting.
    pub fn observe(&self, observer: Observer<E>) -> Disposer {
        self.subject.observe(observer)
    }

    /// Subscribes the source to the subject.
    ///
    /// Only the first call subscribes; later calls return the same connection.
    /// Once the returned connection has been disposed, the next call connects
    /// again.
    pub fn connect(&self) -> Disposer {
        let guard = self.connection.lock();
        let live = guard
            .borrow()
            .as_ref()
            .filter(|connection| !connection.is_disposed())
            .cloned();
        if let Some(connection) = live {
            return connection;
        }

        debug!("connecting source to subject");
        let connection = Arc::new(SerialDisposable::new());
        *guard.borrow_mut() = Some(Arc::clone(&connection));

        let subject = Arc::clone(&self.subject);
        connection.set(
            self.source
                .observe(Observer::new(move |event: E| subject.on(event))),
        );
        connection
    }

    /// A stream whose subscriptions register on the subject.
    pub fn to_stream(&self) -> Stream<E> {
        let subject = Arc::clone(&self.subject);
        Stream::new(move |observer| subject.observe(observer))
    }

    /// A stream that connects on its first observer and disconnects once its
    /// last observer is disposed.
    ///
    /// ```
    /// use rivulet_core::{Disposable, Signal};
    /// use rivulet_stream::prelude::*;
    /// use rivulet_test_utils::{ProbeSource, Recorder};
    ///
    /// let source = ProbeSource::<Signal<i32>>::new();
    /// let shared = source.stream().publish().ref_count();
    ///
    /// let (first, first_handle) = Recorder::subscribe_with_handle(&shared);
    /// let (second, second_handle) = Recorder::subscribe_with_handle(&shared);
    /// source.next(1);
    ///
    /// assert_eq!(source.subscriptions(), 1);
    /// assert_eq!(first.elements(), vec![1]);
    /// assert_eq!(second.elements(), vec![1]);
    ///
    /// first_handle.dispose();
    /// second_handle.dispose();
    /// assert_eq!(source.disposals(), 1);
    /// ```
    pub fn ref_count(self) -> Stream<E> {
        let connectable = Arc::new(self);
        let count = Arc::new(ReentrantLock::new(0_usize));

        Stream::new(move |observer: Observer<E>| {
            let guard = count.lock();
            let registration = connectable.observe(observer);
            let first = {
                let mut count = guard.borrow_mut();
                *count += 1;
                *count == 1
            };
            if first {
                debug!("ref count reached one, connecting");
                connectable.connect();
            }

            let connectable = Arc::clone(&connectable);
            let count = Arc::clone(&count);
            ActionDisposable::arc(move || {
                let guard = count.lock();
                registration.dispose();
                let last = {
                    let mut count = guard.borrow_mut();
                    *count -= 1;
                    *count == 0
                };
                if last {
                    debug!("ref count dropped to zero, disconnecting");
                    connectable.disconnect();
                }
            })
        })
    }

    fn disconnect(&self) {
        let connection = self.connection.with(Option::take);
        if let Some(connection) = connection {
            connection.dispose();
        }
    }
}

impl<E> Clone for ConnectableStream<E> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            subject: Arc::clone(&self.subject),
            connection: Arc::clone(&self.connection),
        }
    }
}

/// Extension trait providing the multicast operators.
pub trait ConnectableExt<E: Event + Clone>: Sized {
    /// Multicasts through a subject that keeps no history.
    fn publish(self) -> ConnectableStream<E>;

    /// Multicasts through a subject that replays up to `limit` past events to
    /// late observers.
    fn replay(self, limit: usize) -> ConnectableStream<E>;

    /// Shorthand for `publish().ref_count()`.
    fn share(self) -> Stream<E> {
        self.publish().ref_count()
    }
}

impl<E: Event + Clone> ConnectableExt<E> for Stream<E> {
    fn publish(self) -> ConnectableStream<E> {
        ConnectableStream::new(self, Arc::new(PublishSubject::new()))
    }

    fn replay(self, limit: usize) -> ConnectableStream<E> {
        let subject: Arc<dyn Subject<E>> = if limit == 1 {
            Arc::new(ReplayOneSubject::new())
        } else {
            Arc::new(ReplaySubject::new(limit))
        };
        ConnectableStream::new(self, subject)
    }
}

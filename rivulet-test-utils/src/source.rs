// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use rivulet_core::{ActionDisposable, Event, Failable, Observer, PublishSubject, Stream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Creates a push-driven test source.
///
/// Events pushed through the returned subject reach every subscription of the
/// returned stream. This keeps imperative test setup (pushing values) separate
/// from the operator chain built on the stream.
pub fn test_source<E: Event + Clone>() -> (PublishSubject<E>, Stream<E>) {
    let subject = PublishSubject::new();
    let stream = subject.to_stream();
    (subject, stream)
}

struct ProbeState<E> {
    observers: Vec<(usize, Observer<E>)>,
}

/// A manually driven source that counts how often it is subscribed and disposed.
///
/// Unlike [`test_source`], each subscription keeps its own observer until it is
/// disposed, so tests can check that an operator really let go of upstream.
pub struct ProbeSource<E> {
    subscriptions: Arc<AtomicUsize>,
    disposals: Arc<AtomicUsize>,
    state: Arc<Mutex<ProbeState<E>>>,
}

impl<E: Event + Clone> ProbeSource<E> {
    /// Creates a source with no subscriptions.
    pub fn new() -> Self {
        Self {
            subscriptions: Arc::new(AtomicUsize::new(0)),
            disposals: Arc::new(AtomicUsize::new(0)),
            state: Arc::new(Mutex::new(ProbeState {
                observers: Vec::new(),
            })),
        }
    }

    /// A stream whose every subscription registers with this source.
    pub fn stream(&self) -> Stream<E> {
        let subscriptions = Arc::clone(&self.subscriptions);
        let disposals = Arc::clone(&self.disposals);
        let state = Arc::clone(&self.state);

        Stream::new(move |observer| {
            let id = subscriptions.fetch_add(1, Ordering::SeqCst);
            state.lock().observers.push((id, observer));

            let disposals = Arc::clone(&disposals);
            let state = Arc::clone(&state);
            ActionDisposable::arc(move || {
                disposals.fetch_add(1, Ordering::SeqCst);
                state.lock().observers.retain(|(i, _)| *i != id);
            })
        })
    }

    /// Pushes `event` to every live subscription, returning how many were reached.
    pub fn emit(&self, event: E) -> usize {
        // Snapshot first: observers may dispose themselves while handling the event.
        let observers: Vec<Observer<E>> = self
            .state
            .lock()
            .observers
            .iter()
            .map(|(_, o)| o.clone())
            .collect();
        for observer in &observers {
            observer.on(event.clone());
        }
        observers.len()
    }

    /// Emits `element` to every live subscription, returning how many were reached.
    pub fn next(&self, element: E::Element) -> usize {
        self.emit(E::next(element))
    }

    /// Completes every live subscription, returning how many were reached.
    pub fn complete(&self) -> usize {
        self.emit(E::completed())
    }

    /// Number of times the stream has been subscribed.
    pub fn subscriptions(&self) -> usize {
        self.subscriptions.load(Ordering::SeqCst)
    }

    /// Number of subscription handles that have been disposed.
    pub fn disposals(&self) -> usize {
        self.disposals.load(Ordering::SeqCst)
    }

    /// Number of subscriptions still holding an observer.
    pub fn live(&self) -> usize {
        self.state.lock().observers.len()
    }
}

impl<E: Failable + Clone> ProbeSource<E> {
    /// Fails every live subscription with `error`, returning how many were reached.
    pub fn fail(&self, error: E::Failure) -> usize {
        self.emit(E::failed(error))
    }
}

impl<E: Event + Clone> Default for ProbeSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for ProbeSource<E> {
    fn clone(&self) -> Self {
        Self {
            subscriptions: Arc::clone(&self.subscriptions),
            disposals: Arc::clone(&self.disposals),
            state: Arc::clone(&self.state),
        }
    }
}

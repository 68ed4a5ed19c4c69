// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use rivulet_core::{Disposer, Event, Failable, Observer, Stream};
use std::sync::Arc;

/// An observer that records every event delivered to it.
///
/// Clones share the same log.
pub struct Recorder<E> {
    events: Arc<Mutex<Vec<E>>>,
}

impl<E: Event + Clone> Recorder<E> {
    /// Creates an empty recorder, not yet subscribed to anything.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Subscribes a fresh recorder to `stream`, dropping the subscription handle.
    pub fn subscribe(stream: &Stream<E>) -> Self {
        let (recorder, _subscription) = Self::subscribe_with_handle(stream);
        recorder
    }

    /// Subscribes a fresh recorder to `stream`, returning the subscription handle too.
    pub fn subscribe_with_handle(stream: &Stream<E>) -> (Self, Disposer) {
        let recorder = Self::new();
        let subscription = stream.observe(recorder.observer());
        (recorder, subscription)
    }

    /// An observer appending to this recorder. Every clone shares the same log.
    pub fn observer(&self) -> Observer<E> {
        let events = Arc::clone(&self.events);
        Observer::new(move |event| events.lock().push(event))
    }

    /// Every recorded event, in delivery order.
    pub fn events(&self) -> Vec<E> {
        self.events.lock().clone()
    }

    /// Only the elements, in delivery order.
    pub fn elements(&self) -> Vec<E::Element>
    where
        E::Element: Clone,
    {
        self.events
            .lock()
            .iter()
            .filter_map(|event| event.element().cloned())
            .collect()
    }

    /// Number of recorded events, terminations included.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns `true` when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many terminations were recorded. More than one means a broken stream.
    pub fn terminations(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| event.is_termination())
            .count()
    }

    /// Returns `true` once any termination has been recorded.
    pub fn is_terminated(&self) -> bool {
        self.terminations() > 0
    }

    /// Returns `true` when the last recorded event is a completion.
    pub fn is_completed(&self) -> bool {
        self.events
            .lock()
            .last()
            .is_some_and(|event| event.is_completion())
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl<E: Failable + Clone> Recorder<E> {
    /// Returns `true` when the last recorded event is a failure.
    pub fn is_failed(&self) -> bool {
        self.events
            .lock()
            .last()
            .is_some_and(|event| event.is_failure())
    }

    /// The failure payload, if the recorded sequence ended with one.
    pub fn failure(&self) -> Option<E::Failure>
    where
        E::Failure: Clone,
    {
        self.events.lock().last().and_then(|event| event.error().cloned())
    }
}

impl<E: Event + Clone> Default for Recorder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Recorder<E> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::event::{Event, Failable};
use std::fmt;
use std::sync::Arc;

/// The receiving end of a stream: a single callback taking events.
///
/// Cheap to clone; all clones call the same callback.
pub struct Observer<E> {
    sink: Arc<dyn Fn(E) + Send + Sync>,
}

impl<E: Event> Observer<E> {
    /// Wraps a callback.
    pub fn new<F>(sink: F) -> Self
    where
        F: Fn(E) + Send + Sync + 'static,
    {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Delivers an arbitrary event.
    pub fn on(&self, event: E) {
        (self.sink)(event)
    }

    /// Delivers an element.
    pub fn next(&self, element: E::Element) {
        self.on(E::next(element))
    }

    /// Delivers the completion marker.
    pub fn completed(&self) {
        self.on(E::completed())
    }
}

impl<E: Failable> Observer<E> {
    /// Delivers a failure.
    pub fn failed(&self, error: E::Failure) {
        self.on(E::failed(error))
    }
}

impl<E> Clone for Observer<E> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<E> fmt::Debug for Observer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer").finish_non_exhaustive()
    }
}

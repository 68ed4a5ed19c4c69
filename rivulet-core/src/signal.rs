// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Event family for streams that can complete but never fail.

use crate::event::{Event, Termination};
use core::convert::Infallible;

/// An element or a completion marker.
///
/// `Signal` does not implement [`Failable`](crate::Failable), so failure
/// handling operators are not available on `Stream<Signal<T>>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Signal<T> {
    /// An element
    Next(T),
    /// Normal end of the stream
    Completed,
}

impl<T> Signal<T> {
    /// Converts into `Option<T>`, discarding the completion marker.
    pub fn ok(self) -> Option<T> {
        match self {
            Signal::Next(value) => Some(value),
            Signal::Completed => None,
        }
    }
}

impl<T: Send + 'static> Event for Signal<T> {
    type Element = T;
    type Failure = Infallible;
    type With<U: Send + 'static> = Signal<U>;

    fn next(element: T) -> Self {
        Signal::Next(element)
    }

    fn terminated(termination: Termination<Infallible>) -> Self {
        match termination {
            Termination::Completed => Signal::Completed,
            Termination::Failed(never) => match never {},
        }
    }

    fn element(&self) -> Option<&T> {
        match self {
            Signal::Next(value) => Some(value),
            Signal::Completed => None,
        }
    }

    fn is_termination(&self) -> bool {
        matches!(self, Signal::Completed)
    }

    fn is_failure(&self) -> bool {
        false
    }

    fn into_parts(self) -> Result<T, Termination<Infallible>> {
        match self {
            Signal::Next(value) => Ok(value),
            Signal::Completed => Err(Termination::Completed),
        }
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::RivuletError;
use crate::event::{Event, Failable, Termination};

/// A stream event that can be a value, an error, or the completion marker.
///
/// Errors terminate the subscription, following Rx-style error semantics.
/// This is the failable event family: it implements [`Failable`], so `retry`
/// and `on_error` are available on `Stream<StreamItem<T>>`.
#[derive(Debug, Clone)]
pub enum StreamItem<T> {
    /// A successful value
    Value(T),
    /// An error that terminates the stream
    Error(RivuletError),
    /// Normal end of the stream
    Completed,
}

impl<T: PartialEq> PartialEq for StreamItem<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StreamItem::Value(a), StreamItem::Value(b)) => a == b,
            (StreamItem::Completed, StreamItem::Completed) => true,
            _ => false, // Errors are never equal
        }
    }
}

impl<T> StreamItem<T> {
    /// Returns `true` if this is a `Value`.
    pub const fn is_value(&self) -> bool {
        matches!(self, StreamItem::Value(_))
    }

    /// Returns `true` if this is an `Error`.
    pub const fn is_error(&self) -> bool {
        matches!(self, StreamItem::Error(_))
    }

    /// Converts from `StreamItem<T>` to `Option<T>`, discarding errors and completion.
    pub fn ok(self) -> Option<T> {
        match self {
            StreamItem::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Converts from `StreamItem<T>` to `Option<RivuletError>`, discarding everything else.
    pub fn err(self) -> Option<RivuletError> {
        match self {
            StreamItem::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the contained value, panicking otherwise.
    ///
    /// # Panics
    ///
    /// Panics if the item is an `Error` or `Completed`.
    pub fn unwrap(self) -> T {
        match self {
            StreamItem::Value(v) => v,
            StreamItem::Error(e) => {
                panic!("called `StreamItem::unwrap()` on an `Error` value: {:?}", e)
            }
            StreamItem::Completed => panic!("called `StreamItem::unwrap()` on `Completed`"),
        }
    }
}

impl<T> From<Result<T, RivuletError>> for StreamItem<T> {
    fn from(result: Result<T, RivuletError>) -> Self {
        match result {
            Ok(v) => StreamItem::Value(v),
            Err(e) => StreamItem::Error(e),
        }
    }
}

impl<T: Send + 'static> Event for StreamItem<T> {
    type Element = T;
    type Failure = RivuletError;
    type With<U: Send + 'static> = StreamItem<U>;

    fn next(element: T) -> Self {
        StreamItem::Value(element)
    }

    fn terminated(termination: Termination<RivuletError>) -> Self {
        match termination {
            Termination::Completed => StreamItem::Completed,
            Termination::Failed(error) => StreamItem::Error(error),
        }
    }

    fn element(&self) -> Option<&T> {
        match self {
            StreamItem::Value(v) => Some(v),
            _ => None,
        }
    }

    fn is_termination(&self) -> bool {
        !self.is_value()
    }

    fn is_failure(&self) -> bool {
        self.is_error()
    }

    fn into_parts(self) -> Result<T, Termination<RivuletError>> {
        match self {
            StreamItem::Value(v) => Ok(v),
            StreamItem::Error(e) => Err(Termination::Failed(e)),
            StreamItem::Completed => Err(Termination::Completed),
        }
    }
}

impl<T: Send + 'static> Failable for StreamItem<T> {
    fn error(&self) -> Option<&RivuletError> {
        match self {
            StreamItem::Error(e) => Some(e),
            _ => None,
        }
    }
}

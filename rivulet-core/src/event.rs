// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The event algebra every stream is generic over.
//!
//! An event is exactly one of: an element, a completion marker, or (for event
//! families that implement [`Failable`]) a failure. Completion and failure are
//! both *terminations*; a subscription delivers at most one of them.
//!
//! Operators never name a concrete event type. They are written against
//! [`Event`] and, where they need to intercept failures, against [`Failable`].
//! Two families ship with the crate:
//!
//! - [`Signal<T>`](crate::Signal): can complete but never fail
//! - [`StreamItem<T>`](crate::StreamItem): can also fail with a
//!   [`RivuletError`](crate::RivuletError)

/// The terminal part of an event: completion or failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination<F> {
    /// The stream finished normally
    Completed,
    /// The stream finished with a failure payload
    Failed(F),
}

impl<F> Termination<F> {
    /// Returns `true` for `Completed`.
    pub const fn is_completed(&self) -> bool {
        matches!(self, Termination::Completed)
    }

    /// Converts into the failure payload, if any.
    pub fn failure(self) -> Option<F> {
        match self {
            Termination::Completed => None,
            Termination::Failed(failure) => Some(failure),
        }
    }
}

/// Base capability of every event family.
///
/// Invariant relied upon by all operators: an event carries an element if and
/// only if it is not a termination.
///
/// `With<U>` names the same family carrying a different element type. It shares
/// the failure type, which is what lets element-changing operators (`map`,
/// `scan`, `zip`, ...) re-emit an upstream termination downstream unchanged.
pub trait Event: Sized + Send + 'static {
    /// Payload of a non-terminal event.
    type Element: Send + 'static;

    /// Payload of a failure. Families that cannot fail use [`core::convert::Infallible`].
    type Failure: Send + 'static;

    /// The same event family over another element type.
    type With<U: Send + 'static>: Event<Element = U, Failure = Self::Failure>;

    /// Creates an element event.
    fn next(element: Self::Element) -> Self;

    /// Creates a terminal event.
    fn terminated(termination: Termination<Self::Failure>) -> Self;

    /// Borrows the element, `None` for terminations.
    fn element(&self) -> Option<&Self::Element>;

    /// Returns `true` for completion and failure.
    fn is_termination(&self) -> bool;

    /// Returns `true` for failure only.
    fn is_failure(&self) -> bool;

    /// Splits the event into its element or its termination.
    fn into_parts(self) -> Result<Self::Element, Termination<Self::Failure>>;

    /// Creates a completion event.
    fn completed() -> Self {
        Self::terminated(Termination::Completed)
    }

    /// Returns `true` for completion only.
    fn is_completion(&self) -> bool {
        self.is_termination() && !self.is_failure()
    }

    /// Transforms the element, carrying terminations over unchanged.
    fn map_element<U, F>(self, transform: F) -> Self::With<U>
    where
        U: Send + 'static,
        F: FnOnce(Self::Element) -> U,
    {
        match self.into_parts() {
            Ok(element) => <Self::With<U> as Event>::next(transform(element)),
            Err(termination) => <Self::With<U> as Event>::terminated(termination),
        }
    }

    /// Extracts the element, or re-types the termination into `With<U>`.
    fn retype<U: Send + 'static>(self) -> Result<Self::Element, Self::With<U>> {
        self.into_parts()
            .map_err(|termination| <Self::With<U> as Event>::terminated(termination))
    }
}

/// Optional failure capability.
///
/// Operators that intercept failures (`retry`, `on_error`) are only available
/// for streams whose event type implements this trait.
pub trait Failable: Event {
    /// Creates a failure event.
    fn failed(error: Self::Failure) -> Self {
        Self::terminated(Termination::Failed(error))
    }

    /// Borrows the failure payload, `None` for any other event.
    fn error(&self) -> Option<&Self::Failure>;
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Types shared by the multi-source operators.

use rivulet_core::Event;

/// Identifies which of two combined sources delivered the current event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Snapshot handed to a `combine_latest_with` combiner.
///
/// Holds the latest raw event of each side together with the latest element
/// each side produced. A side's latest element survives its termination, so a
/// completed side can still contribute its last value.
pub struct CombineLatestState<'a, A: Event, B: Event> {
    /// Latest event of the left source
    pub left: &'a A,
    /// Latest element of the left source
    pub left_element: Option<&'a A::Element>,
    /// Latest event of the right source
    pub right: &'a B,
    /// Latest element of the right source
    pub right_element: Option<&'a B::Element>,
    /// The side whose event triggered this combination
    pub fired: Side,
}

impl<A: Event, B: Event> CombineLatestState<'_, A, B> {
    /// Returns `true` when both sides have terminated.
    pub fn both_terminated(&self) -> bool {
        self.left.is_termination() && self.right.is_termination()
    }

    /// Returns `true` when the event that fired is a termination.
    pub fn fired_termination(&self) -> bool {
        match self.fired {
            Side::Left => self.left.is_termination(),
            Side::Right => self.right.is_termination(),
        }
    }
}

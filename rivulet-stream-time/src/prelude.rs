// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting the time-based operator traits and sources.
//!
//! ```
//! use rivulet_stream_time::prelude::*;
//! ```

pub use crate::debounce::DebounceExt;
pub use crate::delay::DelayExt;
pub use crate::sample::SampleExt;
pub use crate::sources::{interval, timer};
pub use crate::throttle::ThrottleExt;
pub use crate::timeout::TimeoutExt;

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Time-based operators and sources for rivulet streams.
//!
//! Nothing here reads a clock or spawns a task directly. Every operator takes a
//! [`Queue`](rivulet_runtime::Queue) and schedules its timers on it, so the same
//! pipeline runs on tokio in production and on a
//! [`VirtualTimeQueue`](rivulet_runtime::VirtualTimeQueue) in tests.
//!
//! # Overview
//!
//! - **[`interval`]** / **[`timer`]** - streams driven by the queue's clock
//! - **`DelayExt`** - `.delay(duration, queue)` shifts every event later
//! - **`DebounceExt`** - `.debounce(duration, queue)` waits for a quiet period
//! - **`SampleExt`** - `.sample(period, queue)` emits the latest element periodically
//! - **`ThrottleExt`** - `.throttle(window, queue)` lets one element through per window
//! - **`TimeoutExt`** - `.timeout(duration, queue, error)` fails a stalled stream
//!
//! # Example
//!
//! ```
//! use rivulet_core::Signal;
//! use rivulet_runtime::VirtualTimeQueue;
//! use rivulet_stream_time::prelude::*;
//! use rivulet_test_utils::{test_source, Recorder};
//! use std::time::Duration;
//!
//! let queue = VirtualTimeQueue::new();
//! let (subject, stream) = test_source::<Signal<i32>>();
//! let delayed = stream.delay(Duration::from_millis(10), queue.clone());
//! let recorder = Recorder::subscribe(&delayed);
//!
//! subject.next(42).unwrap();
//! assert!(recorder.is_empty());
//!
//! queue.advance_by(Duration::from_millis(10));
//! assert_eq!(recorder.elements(), vec![42]);
//! ```
//!
//! # Runtime Support
//!
//! - `runtime-tokio` (default) - enables `rivulet_runtime::TokioQueue`

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod debounce;
pub mod delay;
pub mod prelude;
pub mod sample;
pub mod sources;
pub mod throttle;
pub mod timeout;

pub use debounce::DebounceExt;
pub use delay::DelayExt;
pub use sample::SampleExt;
pub use sources::{interval, timer};
pub use throttle::ThrottleExt;
pub use timeout::TimeoutExt;

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Rivulet
//!
//! A push-based reactive event stream engine.
//!
//! ## Overview
//!
//! A [`Stream`] is a cold producer: every subscription runs it afresh and gets
//! its own cancellation handle. Producers push events into an [`Observer`]; an
//! event is either an element or a termination (completion or failure), and at
//! most one termination is ever delivered.
//!
//! Operators are extension traits on `Stream`. Time-based operators schedule
//! on a [`Queue`], which is tokio in production and a [`VirtualTimeQueue`] in
//! tests. Multicast goes through subjects wrapped in a [`ConnectableStream`].
//!
//! The workspace is split by concern:
//!
//! - `rivulet-core` - events, disposables, the `Stream` type and subjects
//! - `rivulet-runtime` - execution contexts and timer queues
//! - `rivulet-stream` - the non-time operators
//! - `rivulet-stream-time` - time-based operators and sources
//!
//! ## Quick Start
//!
//! ```
//! use rivulet::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! let totals = Stream::<Signal<i32>>::sequence(vec![3, 1, 4, 1, 5])
//!     .distinct()
//!     .scan(0, |total, x| total + x)
//!     .filter(|total| total % 2 == 0);
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! totals.subscribe(move |event| {
//!     if let Some(total) = event.element() {
//!         sink.lock().unwrap().push(*total);
//!     }
//! });
//!
//! assert_eq!(*seen.lock().unwrap(), vec![4, 8, 14]);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

// Re-export core types
pub use rivulet_core::{
    ActionDisposable, BooleanDisposable, CompositeDisposable, Disposable, Disposer, Event,
    Failable, NonDisposable, Observer, PublishSubject, ReentrantLock, ReplayOneSubject,
    ReplaySubject, Result, RivuletError, SerialDisposable, Signal, Stream, StreamItem, Subject,
    Termination,
};

// Re-export execution collaborators
#[cfg(feature = "runtime-tokio")]
pub use rivulet_runtime::TokioQueue;
pub use rivulet_runtime::{ExecutionContext, ImmediateContext, Queue, VirtualTimeQueue, Work};

// Re-export commonly used operator types
pub use rivulet_stream::{CombineLatestState, ConnectableStream, IntoAsyncStream, Side};
pub use rivulet_stream_time::{interval, timer};

/// Prelude module for convenient imports
pub mod prelude {
    pub use rivulet_core::{
        Disposable, Event, Failable, Observer, RivuletError, Signal, Stream, StreamItem,
        Subject, Termination,
    };
    pub use rivulet_runtime::{ExecutionContext, Queue};
    pub use rivulet_stream::prelude::*;
    pub use rivulet_stream_time::prelude::*;
}

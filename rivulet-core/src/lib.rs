// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core building blocks of rivulet: the event model, the push-based [`Stream`],
//! cancellation handles and hot subjects.
//!
//! Every operator in the `rivulet-stream` crates is written purely in terms of
//! the types defined here:
//!
//! - [`Event`] / [`Failable`]: the algebra every event family satisfies
//! - [`Observer`]: the callback receiving events
//! - [`Stream`]: a cold, producer-driven sequence of events
//! - [`Disposable`] and its variants: cancellation of subscriptions
//! - [`ReentrantLock`]: serialization of operator state
//! - [`PublishSubject`], [`ReplaySubject`], [`ReplayOneSubject`]: hot multicast

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod disposable;
pub mod error;
pub mod event;
pub mod lock;
pub mod observer;
pub mod signal;
pub mod stream;
pub mod stream_item;
pub mod subject;

pub use self::disposable::{
    ActionDisposable, BooleanDisposable, CompositeDisposable, Disposable, Disposer,
    NonDisposable, SerialDisposable,
};
pub use self::error::{Result, RivuletError};
pub use self::event::{Event, Failable, Termination};
pub use self::lock::ReentrantLock;
pub use self::observer::Observer;
pub use self::signal::Signal;
pub use self::stream::Stream;
pub use self::stream_item::StreamItem;
pub use self::subject::{PublishSubject, ReplayOneSubject, ReplaySubject, Subject};

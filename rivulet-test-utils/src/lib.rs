// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the rivulet event-stream engine.
//!
//! This crate provides helper types, fixture data and instrumented sources for
//! testing stream operators. It is designed for use in development and testing
//! only, not for production code.
//!
//! # Key Types
//!
//! ## `Recorder<E>`
//!
//! An observer that records every event it receives:
//!
//! ```rust
//! use rivulet_core::{Signal, Stream};
//! use rivulet_test_utils::Recorder;
//!
//! let recorder = Recorder::<Signal<i32>>::new();
//! Stream::sequence(vec![1, 2]).observe(recorder.observer());
//!
//! assert_eq!(recorder.elements(), vec![1, 2]);
//! assert!(recorder.is_completed());
//! ```
//!
//! ## `test_source`
//!
//! A push-driven source for imperative test setup. Values are pushed through the
//! returned subject while operators are chained on the returned stream:
//!
//! ```rust
//! use rivulet_core::Signal;
//! use rivulet_test_utils::{test_source, Recorder};
//!
//! let (tx, stream) = test_source::<Signal<&str>>();
//! let recorder = Recorder::subscribe(&stream);
//!
//! tx.next("alice").unwrap();
//! assert_eq!(recorder.elements(), vec!["alice"]);
//! ```
//!
//! ## `ProbeSource<E>`
//!
//! A source that counts subscriptions and disposals, used to verify that
//! operators subscribe lazily and tear down upstream work.
//!
//! ## TestData and Variants
//!
//! ```rust
//! use rivulet_test_utils::test_data::{person_alice, TestData};
//!
//! match person_alice() {
//!     TestData::Person(p) => assert_eq!(p.name, "Alice"),
//!     _ => panic!("Expected person"),
//! }
//! ```
//!
//! # Module Organization
//!
//! - `recorder` - `Recorder<E>`
//! - `source` - `test_source` and `ProbeSource<E>`
//! - `test_data` - `Person`, `Animal` and `Plant` fixtures behind one `TestData` enum

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod recorder;
pub mod source;
pub mod test_data;

pub use recorder::Recorder;
pub use source::{test_source, ProbeSource};
pub use test_data::{DataVariant, TestData};

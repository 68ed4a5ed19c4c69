// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Execution collaborators for rivulet streams.
//!
//! Operators never create threads themselves. Whenever they need to move work
//! elsewhere (`execute_in`, `observe_in`) or run it later (`delay`,
//! `debounce`, `interval`, ...) they hand it to one of the abstractions here:
//!
//! - [`ExecutionContext`]: runs a unit of work eventually, on any thread
//! - [`Queue`]: an execution context that can also schedule work after a delay
//!   and tell the current time
//!
//! Implementations:
//!
//! - [`ImmediateContext`]: runs work inline on the calling thread
//! - [`TokioQueue`]: spawns onto a tokio runtime (feature `runtime-tokio`)
//! - [`VirtualTimeQueue`]: a deterministic, manually advanced clock for tests

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod context;
pub mod impls;
pub mod queue;

pub use context::{ExecutionContext, Work};
pub use impls::immediate::ImmediateContext;
#[cfg(feature = "runtime-tokio")]
pub use impls::tokio::TokioQueue;
pub use impls::virtual_time::VirtualTimeQueue;
pub use queue::Queue;

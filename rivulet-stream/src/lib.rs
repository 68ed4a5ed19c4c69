// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Operators for rivulet push-based event streams.
//!
//! Every operator is an extension trait implemented for
//! [`Stream<E>`](rivulet_core::Stream). Import the [`prelude`] to bring all of
//! them into scope:
//!
//! ```
//! use rivulet_core::{Signal, Stream};
//! use rivulet_stream::prelude::*;
//! use rivulet_test_utils::Recorder;
//!
//! let evens = Stream::<Signal<i32>>::sequence(1..=10)
//!     .filter(|x| x % 2 == 0)
//!     .map(|x| x * 10)
//!     .take_first(3);
//!
//! assert_eq!(Recorder::subscribe(&evens).elements(), vec![20, 40, 60]);
//! ```
//!
//! # Operator families
//!
//! | family | operators |
//! |---|---|
//! | per event | `map`, `map_event`, `filter`, `tap`, `scan`, `distinct`, `distinct_by`, `distinct_optional`, `ignore_elements`, `default_if_empty`, `start_with` |
//! | index and count | `element_at`, `first`, `last`, `take_first`, `take_last`, `skip_first`, `skip_last`, `take_until` |
//! | aggregation | `buffer`, `combine_previous`, `reduce` |
//! | two sources | `combine_latest`, `merge_with`, `zip`, `amb_with`, `concat_with` |
//! | streams of streams | `merge_inner`, `switch_to_latest`, `concat_inner`, `flat_map_*` |
//! | failures | `retry`, `on_error` |
//! | scheduling | `execute_in`, `observe_in` |
//! | gating | `pausable_by` |
//! | multicast | `publish`, `replay`, `share`, [`ConnectableStream`] |
//! | async bridge | `into_async_stream` |
//!
//! Time-based operators live in `rivulet-stream-time`.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod amb;
pub mod async_bridge;
pub mod buffer;
pub mod combine_latest;
pub mod combine_previous;
pub mod concat;
pub mod concat_inner;
pub mod connectable;
pub mod default_if_empty;
pub mod distinct;
pub mod execute_in;
pub mod filter;
pub mod flat_map;
pub mod ignore_elements;
pub mod map;
pub mod merge;
pub mod merge_inner;
pub mod observe_in;
pub mod on_error;
pub mod pausable;
pub mod prelude;
pub mod reduce;
pub mod retry;
pub mod scan;
pub mod skip;
pub mod start_with;
pub mod switch_to_latest;
pub mod take;
pub mod take_until;
pub mod tap;
pub mod types;
pub mod zip;

// Re-export commonly used types
pub use amb::AmbExt;
pub use async_bridge::{IntoAsyncStream, IntoAsyncStreamExt};
pub use buffer::BufferExt;
pub use combine_latest::CombineLatestExt;
pub use combine_previous::CombinePreviousExt;
pub use concat::ConcatExt;
pub use concat_inner::ConcatInnerExt;
pub use connectable::{ConnectableExt, ConnectableStream};
pub use default_if_empty::DefaultIfEmptyExt;
pub use distinct::{DistinctExt, DistinctOptionalExt};
pub use execute_in::ExecuteInExt;
pub use filter::FilterExt;
pub use flat_map::FlatMapExt;
pub use ignore_elements::IgnoreElementsExt;
pub use map::MapExt;
pub use merge::MergeExt;
pub use merge_inner::MergeInnerExt;
pub use observe_in::ObserveInExt;
pub use on_error::OnErrorExt;
pub use pausable::PausableExt;
pub use reduce::ReduceExt;
pub use retry::RetryExt;
pub use scan::ScanExt;
pub use skip::SkipExt;
pub use start_with::StartWithExt;
pub use switch_to_latest::SwitchToLatestExt;
pub use take::TakeExt;
pub use take_until::TakeUntilExt;
pub use tap::TapExt;
pub use types::{CombineLatestState, Side};
pub use zip::ZipExt;

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting every operator trait.
//!
//! ```
//! use rivulet_stream::prelude::*;
//! ```

pub use crate::amb::AmbExt;
pub use crate::async_bridge::IntoAsyncStreamExt;
pub use crate::buffer::BufferExt;
pub use crate::combine_latest::CombineLatestExt;
pub use crate::combine_previous::CombinePreviousExt;
pub use crate::concat::ConcatExt;
pub use crate::concat_inner::ConcatInnerExt;
pub use crate::connectable::{ConnectableExt, ConnectableStream};
pub use crate::default_if_empty::DefaultIfEmptyExt;
pub use crate::distinct::{DistinctExt, DistinctOptionalExt};
pub use crate::execute_in::ExecuteInExt;
pub use crate::filter::FilterExt;
pub use crate::flat_map::FlatMapExt;
pub use crate::ignore_elements::IgnoreElementsExt;
pub use crate::map::MapExt;
pub use crate::merge::MergeExt;
pub use crate::merge_inner::MergeInnerExt;
pub use crate::observe_in::ObserveInExt;
pub use crate::on_error::OnErrorExt;
pub use crate::pausable::PausableExt;
pub use crate::reduce::ReduceExt;
pub use crate::retry::RetryExt;
pub use crate::scan::ScanExt;
pub use crate::skip::SkipExt;
pub use crate::start_with::StartWithExt;
pub use crate::switch_to_latest::SwitchToLatestExt;
pub use crate::take::TakeExt;
pub use crate::take_until::TakeUntilExt;
pub use crate::tap::TapExt;
pub use crate::types::{CombineLatestState, Side};
pub use crate::zip::ZipExt;

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;

/// A unit of work handed to an execution context.
pub type Work = Box<dyn FnOnce() + Send + 'static>;

/// Something that accepts work and guarantees it eventually runs, on the
/// calling thread or another one.
///
/// Ordering between two submissions is implementation-defined. Operators that
/// redispatch events through a context only preserve event order when the
/// context runs work in submission order.
pub trait ExecutionContext: Send + Sync + 'static {
    fn execute(&self, work: Work);
}

impl<C: ExecutionContext + ?Sized> ExecutionContext for Arc<C> {
    fn execute(&self, work: Work) {
        (**self).execute(work)
    }
}

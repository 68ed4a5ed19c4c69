// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::context::{ExecutionContext, Work};

/// Runs every unit of work inline, before `execute` returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateContext;

impl ExecutionContext for ImmediateContext {
    fn execute(&self, work: Work) {
        work()
    }
}

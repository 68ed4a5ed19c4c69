// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Event, Observer, Stream};
use rivulet_runtime::ExecutionContext;
use std::sync::Arc;

/// Extension trait providing the [`observe_in`](Self::observe_in) operator.
pub trait ObserveInExt<E: Event>: Sized {
    /// Redispatches every event through `context` before it reaches downstream.
    ///
    /// Subscription still happens immediately. Event order is preserved only if
    /// `context` runs work in submission order.
    fn observe_in<C: ExecutionContext>(self, context: C) -> Stream<E>;
}

impl<E: Event> ObserveInExt<E> for Stream<E> {
    fn observe_in<C: ExecutionContext>(self, context: C) -> Stream<E> {
        let context = Arc::new(context);
        Stream::new(move |observer: Observer<E>| {
            let context = Arc::clone(&context);
            self.observe(Observer::new(move |event: E| {
                let observer = observer.clone();
                context.execute(Box::new(move || observer.on(event)));
            }))
        })
    }
}

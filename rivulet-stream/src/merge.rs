// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{CompositeDisposable, Disposable, Event, Observer, ReentrantLock, Stream};
use std::sync::Arc;

/// Extension trait providing the [`merge_with`](Self::merge_with) operator.
pub trait MergeExt<E: Event>: Sized {
    /// Forwards the events of both sources as they arrive.
    ///
    /// A failure from either source is forwarded immediately and disposes both.
    /// Completion is forwarded only once both sources have completed.
    fn merge_with(self, other: Stream<E>) -> Stream<E>;
}

impl<E: Event> MergeExt<E> for Stream<E> {
    fn merge_with(self, other: Stream<E>) -> Stream<E> {
        Stream::new(move |observer: Observer<E>| {
            let subscriptions = Arc::new(CompositeDisposable::new());
            let completed = Arc::new(ReentrantLock::new(0_u8));

            let sink = {
                let subscriptions = Arc::clone(&subscriptions);
                Observer::new(move |event: E| {
                    let guard = completed.lock();
                    if event.is_failure() {
                        observer.on(event);
                        subscriptions.dispose();
                    } else if event.is_completion() {
                        let both = {
                            let mut completed = guard.borrow_mut();
                            *completed += 1;
                            *completed == 2
                        };
                        if both {
                            observer.on(event);
                        }
                    } else {
                        observer.on(event);
                    }
                })
            };

            subscriptions.add(self.observe(sink.clone()));
            subscriptions.add(other.observe(sink));
            subscriptions
        })
    }
}

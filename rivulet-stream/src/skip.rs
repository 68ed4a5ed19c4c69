// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Event, Observer, ReentrantLock, Stream};
use std::collections::VecDeque;

/// Extension trait providing the skipping operators.
pub trait SkipExt<E: Event>: Sized {
    /// Drops the first `count` elements. Terminations always pass.
    fn skip_first(self, count: usize) -> Stream<E>;

    /// Holds back the trailing `count` elements, which are dropped on termination.
    ///
    /// An element is only forwarded once `count` newer elements have arrived.
    fn skip_last(self, count: usize) -> Stream<E>;
}

impl<E: Event> SkipExt<E> for Stream<E> {
    fn skip_first(self, count: usize) -> Stream<E> {
        Stream::new(move |observer: Observer<E>| {
            let skipped = ReentrantLock::new(0_usize);
            self.observe(Observer::new(move |event: E| {
                let guard = skipped.lock();
                if !event.is_termination() {
                    let mut skipped = guard.borrow_mut();
                    if *skipped < count {
                        *skipped += 1;
                        return;
                    }
                }
                observer.on(event);
            }))
        })
    }

    fn skip_last(self, count: usize) -> Stream<E> {
        Stream::new(move |observer: Observer<E>| {
            let buffer: ReentrantLock<VecDeque<E>> = ReentrantLock::new(VecDeque::new());
            self.observe(Observer::new(move |event: E| {
                let guard = buffer.lock();
                if event.is_termination() {
                    observer.on(event);
                    return;
                }
                let released = {
                    let mut buffer = guard.borrow_mut();
                    buffer.push_back(event);
                    if buffer.len() > count {
                        buffer.pop_front()
                    } else {
                        None
                    }
                };
                if let Some(released) = released {
                    observer.on(released);
                }
            }))
        })
    }
}

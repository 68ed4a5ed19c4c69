// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Event, Observer, ReentrantLock, Stream, Termination};
use std::mem;

/// Extension trait providing the [`buffer`](Self::buffer) operator.
pub trait BufferExt<E: Event>: Sized {
    /// Groups elements into vectors of `size` elements.
    ///
    /// On completion a partially filled buffer is emitted before the completion.
    /// On failure it is dropped. A `size` of zero is treated as one.
    ///
    /// ```
    /// use rivulet_core::{Signal, Stream};
    /// use rivulet_stream::prelude::*;
    /// use rivulet_test_utils::Recorder;
    ///
    /// let batches = Stream::<Signal<i32>>::sequence(1..=5).buffer(2);
    ///
    /// assert_eq!(
    ///     Recorder::subscribe(&batches).elements(),
    ///     vec![vec![1, 2], vec![3, 4], vec![5]]
    /// );
    /// ```
    fn buffer(self, size: usize) -> Stream<E::With<Vec<E::Element>>>;
}

impl<E: Event> BufferExt<E> for Stream<E> {
    fn buffer(self, size: usize) -> Stream<E::With<Vec<E::Element>>> {
        let size = size.max(1);
        Stream::new(move |observer: Observer<E::With<Vec<E::Element>>>| {
            let pending = ReentrantLock::new(Vec::with_capacity(size));
            self.observe(Observer::new(move |event: E| {
                let guard = pending.lock();
                match event.into_parts() {
                    Ok(element) => {
                        let full = {
                            let mut pending = guard.borrow_mut();
                            pending.push(element);
                            (pending.len() == size).then(|| mem::take(&mut *pending))
                        };
                        if let Some(batch) = full {
                            observer.next(batch);
                        }
                    }
                    Err(Termination::Completed) => {
                        let rest = mem::take(&mut *guard.borrow_mut());
                        if !rest.is_empty() {
                            observer.next(rest);
                        }
                        observer.completed();
                    }
                    Err(failure) => {
                        observer.on(<E::With<Vec<E::Element>> as Event>::terminated(failure))
                    }
                }
            }))
        })
    }
}

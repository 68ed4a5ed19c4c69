// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Disposable, Failable, Observer, ReentrantLock, SerialDisposable, Stream};
use std::sync::Arc;

struct RetryState {
    remaining: usize,
    subscribing: bool,
    again: bool,
}

struct Retry<E> {
    source: Stream<E>,
    observer: Observer<E>,
    serial: Arc<SerialDisposable>,
    state: ReentrantLock<RetryState>,
}

impl<E: Failable> Retry<E> {
    /// Subscribes the source, looping instead of recursing when an attempt fails
    /// synchronously.
    fn run(self: &Arc<Self>) {
        let entered = self.state.with(|state| {
            if state.subscribing {
                state.again = true;
                false
            } else {
                state.subscribing = true;
                true
            }
        });
        if !entered {
            return;
        }

        loop {
            self.state.with(|state| state.again = false);
            if self.serial.is_disposed() {
                break;
            }

            let slot = Arc::new(SerialDisposable::new());
            self.serial.set(slot.clone());

            let this = Arc::clone(self);
            slot.set(self.source.observe(Observer::new(move |event: E| {
                if event.is_failure() {
                    let retrying = this.state.with(|state| {
                        let retrying = state.remaining > 0;
                        if retrying {
                            state.remaining -= 1;
                        }
                        retrying
                    });
                    if retrying {
                        debug!("retrying after failure");
                        this.run();
                        return;
                    }
                }
                this.observer.on(event);
            })));

            if !self.state.with(|state| state.again) {
                break;
            }
        }

        self.state.with(|state| state.subscribing = false);
    }
}

/// Extension trait providing the [`retry`](Self::retry) operator.
pub trait RetryExt<E: Failable>: Sized {
    /// Re-subscribes to the source from scratch on failure, at most `times` times.
    ///
    /// Every attempt is a fresh production; the previous attempt is disposed
    /// before the next one starts. Once the attempts are used up the failure is
    /// forwarded. Completion is always forwarded.
    ///
    /// ```
    /// use rivulet_core::{RivuletError, Stream, StreamItem};
    /// use rivulet_stream::prelude::*;
    /// use rivulet_test_utils::Recorder;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let attempts = Arc::new(AtomicUsize::new(0));
    /// let counter = attempts.clone();
    /// let flaky = Stream::<StreamItem<u32>>::new(move |observer| {
    ///     if counter.fetch_add(1, Ordering::SeqCst) < 2 {
    ///         observer.failed(RivuletError::stream_error("flaky"));
    ///     } else {
    ///         observer.next(7);
    ///         observer.completed();
    ///     }
    ///     rivulet_core::NonDisposable::arc()
    /// });
    ///
    /// let recorder = Recorder::subscribe(&flaky.retry(3));
    ///
    /// assert_eq!(recorder.elements(), vec![7]);
    /// assert_eq!(attempts.load(Ordering::SeqCst), 3);
    /// ```
    fn retry(self, times: usize) -> Stream<E>;
}

impl<E: Failable> RetryExt<E> for Stream<E> {
    fn retry(self, times: usize) -> Stream<E> {
        Stream::new(move |observer: Observer<E>| {
            let serial = Arc::new(SerialDisposable::new());
            let retry = Arc::new(Retry {
                source: self.clone(),
                observer,
                serial: Arc::clone(&serial),
                state: ReentrantLock::new(RetryState {
                    remaining: times,
                    subscribing: false,
                    again: false,
                }),
            });
            retry.run();
            serial
        })
    }
}

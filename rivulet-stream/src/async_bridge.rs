// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bridge from push-based streams into `futures::Stream`.
//!
//! Events are forwarded through an unbounded channel, so a fast producer never
//! blocks on a slow consumer. The terminal event is yielded last, after which
//! the async stream ends.
//!
//! ```
//! use futures::executor::block_on;
//! use futures::StreamExt;
//! use rivulet_core::{Signal, Stream};
//! use rivulet_stream::prelude::*;
//!
//! let events: Vec<Signal<i32>> =
//!     block_on(Stream::sequence(vec![1, 2]).into_async_stream().collect());
//!
//! assert_eq!(events, vec![Signal::Next(1), Signal::Next(2), Signal::Completed]);
//! ```

use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::StreamExt;
use rivulet_core::{Disposable, Disposer, Event, Stream};
use std::pin::Pin;
use std::task::{Context, Poll};

/// A `futures::Stream` fed by a rivulet subscription.
///
/// Dropping it disposes the subscription.
pub struct IntoAsyncStream<E> {
    receiver: UnboundedReceiver<E>,
    subscription: Disposer,
}

impl<E> futures::Stream for IntoAsyncStream<E> {
    type Item = E;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_next_unpin(cx)
    }
}

impl<E> Drop for IntoAsyncStream<E> {
    fn drop(&mut self) {
        trace!("async stream dropped, disposing subscription");
        self.subscription.dispose();
    }
}

/// Extension trait providing [`into_async_stream`](Self::into_async_stream).
pub trait IntoAsyncStreamExt<E: Event>: Sized {
    /// Subscribes and exposes the events as a `futures::Stream`.
    fn into_async_stream(self) -> IntoAsyncStream<E>;
}

impl<E: Event> IntoAsyncStreamExt<E> for Stream<E> {
    fn into_async_stream(self) -> IntoAsyncStream<E> {
        let (sender, receiver) = mpsc::unbounded();
        let subscription = self.subscribe(move |event: E| {
            let terminal = event.is_termination();
            // The receiver may already be gone; the subscription is disposed with it.
            let _ = sender.unbounded_send(event);
            if terminal {
                sender.close_channel();
            }
        });
        IntoAsyncStream {
            receiver,
            subscription,
        }
    }
}

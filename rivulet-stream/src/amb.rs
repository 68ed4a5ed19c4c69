// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::types::Side;
use rivulet_core::{
    CompositeDisposable, Disposable, Disposer, Event, Observer, ReentrantLock, SerialDisposable,
    Stream,
};
use std::sync::Arc;

/// Extension trait providing the [`amb_with`](Self::amb_with) operator.
pub trait AmbExt<E: Event>: Sized {
    /// Mirrors whichever source delivers an event first and disposes the other.
    ///
    /// When both sources race for their first event, exactly one wins.
    fn amb_with(self, other: Stream<E>) -> Stream<E>;
}

impl<E: Event> AmbExt<E> for Stream<E> {
    fn amb_with(self, other: Stream<E>) -> Stream<E> {
        Stream::new(move |observer: Observer<E>| {
            let winner: Arc<ReentrantLock<Option<Side>>> = Arc::new(ReentrantLock::new(None));
            let left = Arc::new(SerialDisposable::new());
            let right = Arc::new(SerialDisposable::new());

            let contender = |side: Side, rival: &Arc<SerialDisposable>| {
                let winner = Arc::clone(&winner);
                let rival = Arc::clone(rival);
                let observer = observer.clone();
                Observer::new(move |event: E| {
                    let guard = winner.lock();
                    let (forward, won_now) = {
                        let mut winner = guard.borrow_mut();
                        match *winner {
                            None => {
                                *winner = Some(side);
                                (true, true)
                            }
                            Some(current) => (current == side, false),
                        }
                    };
                    if won_now {
                        rival.dispose();
                    }
                    if forward {
                        observer.on(event);
                    }
                })
            };

            let left_sink = contender(Side::Left, &right);
            let right_sink = contender(Side::Right, &left);
            left.set(self.observe(left_sink));
            right.set(other.observe(right_sink));

            Arc::new(CompositeDisposable::with(vec![
                left as Disposer,
                right as Disposer,
            ]))
        })
    }
}

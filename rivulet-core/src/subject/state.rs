// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::disposable::{ActionDisposable, Disposer, NonDisposable};
use crate::error::{Result, RivuletError};
use crate::event::Event;
use crate::lock::ReentrantLock;
use crate::observer::Observer;
use std::collections::VecDeque;
use std::sync::Arc;

pub(crate) enum History<E> {
    None,
    Latest(Option<E>),
    Ring { limit: usize, events: VecDeque<E> },
}

impl<E: Clone> History<E> {
    pub(crate) fn ring(limit: usize) -> Self {
        History::Ring {
            limit,
            events: VecDeque::with_capacity(limit),
        }
    }

    fn record(&mut self, event: &E) {
        match self {
            History::None => {}
            History::Latest(slot) => *slot = Some(event.clone()),
            History::Ring { limit, events } => {
                if *limit == 0 {
                    return;
                }
                if events.len() == *limit {
                    events.pop_front();
                }
                events.push_back(event.clone());
            }
        }
    }

    fn snapshot(&self) -> Vec<E> {
        match self {
            History::None => Vec::new(),
            History::Latest(slot) => slot.iter().cloned().collect(),
            History::Ring { events, .. } => events.iter().cloned().collect(),
        }
    }
}

struct SubjectState<E> {
    terminal: Option<E>,
    history: History<E>,
    observers: Vec<(u64, Observer<E>)>,
    next_id: u64,
}

pub(crate) struct SubjectCore<E> {
    state: ReentrantLock<SubjectState<E>>,
}

impl<E: Event + Clone> SubjectCore<E> {
    pub(crate) fn new(history: History<E>) -> Self {
        Self {
            state: ReentrantLock::new(SubjectState {
                terminal: None,
                history,
                observers: Vec::new(),
                next_id: 0,
            }),
        }
    }

    pub(crate) fn on(&self, event: E) {
        if self.send(event).is_err() {
            debug!("subject dropped an event pushed after termination");
        }
    }

    pub(crate) fn send(&self, event: E) -> Result<()> {
        let guard = self.state.lock();
        let terminating = event.is_termination();

        let observers: Vec<Observer<E>> = {
            let mut state = guard.borrow_mut();
            if state.terminal.is_some() {
                return Err(RivuletError::SubjectTerminated);
            }
            if terminating {
                state.terminal = Some(event.clone());
            } else {
                state.history.record(&event);
            }
            state.observers.iter().map(|(_, o)| o.clone()).collect()
        };

        for observer in &observers {
            observer.on(event.clone());
        }

        if terminating {
            debug!("subject terminated, releasing {} observers", observers.len());
            guard.borrow_mut().observers.clear();
        }
        Ok(())
    }

    pub(crate) fn observe(core: &Arc<Self>, observer: Observer<E>) -> Disposer {
        let guard = core.state.lock();
        let (history, terminal) = {
            let state = guard.borrow();
            (state.history.snapshot(), state.terminal.clone())
        };

        for event in history {
            observer.on(event);
        }

        if let Some(terminal) = terminal {
            observer.on(terminal);
            return NonDisposable::arc();
        }

        let id = {
            let mut state = guard.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.observers.push((id, observer));
            id
        };

        let core = Arc::downgrade(core);
        ActionDisposable::arc(move || {
            if let Some(core) = core.upgrade() {
                core.remove(id);
            }
        })
    }

    fn remove(&self, id: u64) {
        self.state.with(|state| state.observers.retain(|(i, _)| *i != id));
    }

    pub(crate) fn is_terminated(&self) -> bool {
        self.state.with(|state| state.terminal.is_some())
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.state.with(|state| state.observers.len())
    }
}

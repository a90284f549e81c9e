// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `zip`. The dual-queue state machine lives behind one mutex so that
//! "queue non-empty / other side done" is decided atomically.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::ack::Ack;
use crate::cancelable::CompositeCancelable;
use crate::observable::Observable;
use crate::observer::Observer;

struct ZipState<A, B, O> {
    queue_a: VecDeque<A>,
    queue_b: VecDeque<B>,
    done_a: bool,
    done_b: bool,
    terminated: bool,
    downstream: O,
}

impl<A, B, E, O> ZipState<A, B, O>
where
    O: Observer<(A, B), E>,
{
    fn on_a_next(&mut self, a: A) -> Ack {
        if self.terminated || self.done_a {
            return Ack::Stop;
        }
        if let Some(b) = self.queue_b.pop_front() {
            self.downstream.on_next((a, b))
        } else if self.done_b {
            self.on_a_completed();
            Ack::Stop
        } else {
            self.queue_a.push_back(a);
            Ack::Continue
        }
    }

    fn on_b_next(&mut self, b: B) -> Ack {
        if self.terminated || self.done_b {
            return Ack::Stop;
        }
        if let Some(a) = self.queue_a.pop_front() {
            self.downstream.on_next((a, b))
        } else if self.done_a {
            self.on_b_completed();
            Ack::Stop
        } else {
            self.queue_b.push_back(b);
            Ack::Continue
        }
    }

    fn on_a_completed(&mut self) {
        self.done_a = true;
        if self.terminated {
            return;
        }
        if self.queue_a.is_empty() || self.done_b {
            self.finish();
        }
    }

    fn on_b_completed(&mut self) {
        self.done_b = true;
        if self.terminated {
            return;
        }
        if self.queue_b.is_empty() || self.done_a {
            self.finish();
        }
    }

    fn on_error(&mut self, error: E) {
        self.done_a = true;
        self.done_b = true;
        if self.terminated {
            return;
        }
        self.terminated = true;
        self.queue_a.clear();
        self.queue_b.clear();
        self.downstream.on_error(error);
    }

    fn finish(&mut self) {
        self.terminated = true;
        self.queue_a.clear();
        self.queue_b.clear();
        self.downstream.on_completed();
    }
}

struct ZipSideA<A, B, O> {
    shared: Arc<Mutex<ZipState<A, B, O>>>,
}

impl<A, B, E, O> Observer<A, E> for ZipSideA<A, B, O>
where
    O: Observer<(A, B), E>,
{
    fn on_next(&mut self, item: A) -> Ack {
        self.shared.lock().on_a_next(item)
    }

    fn on_error(&mut self, error: E) {
        self.shared.lock().on_error(error);
    }

    fn on_completed(&mut self) {
        self.shared.lock().on_a_completed();
    }
}

struct ZipSideB<A, B, O> {
    shared: Arc<Mutex<ZipState<A, B, O>>>,
}

impl<A, B, E, O> Observer<B, E> for ZipSideB<A, B, O>
where
    O: Observer<(A, B), E>,
{
    fn on_next(&mut self, item: B) -> Ack {
        self.shared.lock().on_b_next(item)
    }

    fn on_error(&mut self, error: E) {
        self.shared.lock().on_error(error);
    }

    fn on_completed(&mut self) {
        self.shared.lock().on_b_completed();
    }
}

/// The observable returned by [`Observable::zip`](crate::Observable::zip).
pub struct Zip<Source, Other> {
    source: Source,
    other: Other,
}

impl<Source, Other> Zip<Source, Other> {
    pub(crate) fn new(source: Source, other: Other) -> Zip<Source, Other> {
        Zip { source, other }
    }
}

impl<Source, Other> Observable for Zip<Source, Other>
where
    Source: Observable,
    Other: Observable<Error = Source::Error>,
    Source::Subscription: 'static,
    Other::Subscription: 'static,
    Source::Item: Send + 'static,
    Other::Item: Send + 'static,
    Source::Error: Send + 'static,
{
    type Item = (Source::Item, Other::Item);
    type Error = Source::Error;
    type Subscription = CompositeCancelable;

    fn subscribe<O>(&self, observer: O) -> Self::Subscription
    where
        O: Observer<Self::Item, Self::Error> + Send + 'static,
    {
        let shared = Arc::new(Mutex::new(ZipState {
            queue_a: VecDeque::new(),
            queue_b: VecDeque::new(),
            done_a: false,
            done_b: false,
            terminated: false,
            downstream: observer,
        }));
        let composite = CompositeCancelable::new();
        let subs_a = self.source.subscribe(ZipSideA {
            shared: shared.clone(),
        });
        composite.insert(Box::new(subs_a));
        let subs_b = self.other.subscribe(ZipSideB {
            shared: shared.clone(),
        });
        composite.insert(Box::new(subs_b));
        composite
    }
}

// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `do_on_completed`.
//!
//! `cb` is invoked after forwarding `on_completed`. The contract leaves its
//! failure undefined: this implementation lets a
//! panic in `cb` escape rather than silently swallowing it.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::ack::Ack;
use crate::observable::Observable;
use crate::observer::Observer;

struct DoOnCompletedObserver<O, Cb> {
    observer: O,
    cb: Arc<Mutex<Cb>>,
}

impl<T, E, O, Cb> Observer<T, E> for DoOnCompletedObserver<O, Cb>
where
    O: Observer<T, E>,
    Cb: FnMut(),
{
    fn on_next(&mut self, item: T) -> Ack {
        self.observer.on_next(item)
    }

    fn on_error(&mut self, error: E) {
        self.observer.on_error(error);
    }

    fn on_completed(&mut self) {
        self.observer.on_completed();
        (self.cb.lock())();
    }
}

/// The observable returned by
/// [`Observable::do_on_completed`](crate::Observable::do_on_completed).
pub struct DoOnCompleted<Source, Cb> {
    source: Source,
    cb: Arc<Mutex<Cb>>,
}

impl<Source, Cb> DoOnCompleted<Source, Cb> {
    pub(crate) fn new(source: Source, cb: Cb) -> DoOnCompleted<Source, Cb> {
        DoOnCompleted {
            source,
            cb: Arc::new(Mutex::new(cb)),
        }
    }
}

impl<Source, Cb> Observable for DoOnCompleted<Source, Cb>
where
    Source: Observable,
    Cb: FnMut() + Send + Sync + 'static,
{
    type Item = Source::Item;
    type Error = Source::Error;
    type Subscription = Source::Subscription;

    fn subscribe<O>(&self, observer: O) -> Self::Subscription
    where
        O: Observer<Self::Item, Self::Error> + Send + 'static,
    {
        let wrapped = DoOnCompletedObserver {
            observer,
            cb: self.cb.clone(),
        };
        self.source.subscribe(wrapped)
    }
}

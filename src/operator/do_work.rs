// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `do_work`.

use std::sync::Arc;

use crate::ack::Ack;
use crate::observable::Observable;
use crate::observer::Observer;

struct DoWorkObserver<O, Cb> {
    observer: O,
    cb: Arc<Cb>,
}

impl<T, E, O, Cb> Observer<T, E> for DoWorkObserver<O, Cb>
where
    O: Observer<T, E>,
    Cb: Fn(&T),
{
    fn on_next(&mut self, item: T) -> Ack {
        (self.cb)(&item);
        self.observer.on_next(item)
    }

    fn on_error(&mut self, error: E) {
        self.observer.on_error(error);
    }

    fn on_completed(&mut self) {
        self.observer.on_completed();
    }
}

/// The observable returned by [`Observable::do_work`](crate::Observable::do_work).
pub struct DoWork<Source, Cb> {
    source: Source,
    cb: Arc<Cb>,
}

impl<Source, Cb> DoWork<Source, Cb> {
    pub(crate) fn new(source: Source, cb: Cb) -> DoWork<Source, Cb> {
        DoWork {
            source,
            cb: Arc::new(cb),
        }
    }
}

impl<Source, Cb> Observable for DoWork<Source, Cb>
where
    Source: Observable,
    Cb: Fn(&Source::Item) + Send + Sync + 'static,
{
    type Item = Source::Item;
    type Error = Source::Error;
    type Subscription = Source::Subscription;

    fn subscribe<O>(&self, observer: O) -> Self::Subscription
    where
        O: Observer<Self::Item, Self::Error> + Send + 'static,
    {
        let wrapped = DoWorkObserver {
            observer,
            cb: self.cb.clone(),
        };
        self.source.subscribe(wrapped)
    }
}

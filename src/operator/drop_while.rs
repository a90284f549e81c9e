// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `drop_while`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::ack::Ack;
use crate::observable::Observable;
use crate::observer::Observer;

struct DropWhileObserver<O, P> {
    observer: O,
    predicate: Arc<P>,
    should_drop: Arc<AtomicBool>,
}

impl<T, E, O, P> Observer<T, E> for DropWhileObserver<O, P>
where
    O: Observer<T, E>,
    P: Fn(&T) -> bool,
{
    fn on_next(&mut self, item: T) -> Ack {
        loop {
            if !self.should_drop.load(Ordering::Acquire) {
                return self.observer.on_next(item);
            }
            let keep_dropping = (self.predicate)(&item);
            let flipped = self
                .should_drop
                .compare_exchange(true, keep_dropping, Ordering::AcqRel, Ordering::Acquire)
                .is_ok();
            if flipped && keep_dropping {
                return Ack::Continue;
            }
            // Either we just flipped the latch to false, or another caller
            // already did: loop once more and forward this same item.
        }
    }

    fn on_error(&mut self, error: E) {
        self.observer.on_error(error);
    }

    fn on_completed(&mut self) {
        self.observer.on_completed();
    }
}

/// The observable returned by
/// [`Observable::drop_while`](crate::Observable::drop_while).
pub struct DropWhile<Source, P> {
    source: Source,
    predicate: Arc<P>,
}

impl<Source, P> DropWhile<Source, P> {
    pub(crate) fn new(source: Source, predicate: P) -> DropWhile<Source, P> {
        DropWhile {
            source,
            predicate: Arc::new(predicate),
        }
    }
}

impl<Source, P> Observable for DropWhile<Source, P>
where
    Source: Observable,
    P: Fn(&Source::Item) -> bool + Send + Sync + 'static,
{
    type Item = Source::Item;
    type Error = Source::Error;
    type Subscription = Source::Subscription;

    fn subscribe<O>(&self, observer: O) -> Self::Subscription
    where
        O: Observer<Self::Item, Self::Error> + Send + 'static,
    {
        let wrapped = DropWhileObserver {
            observer,
            predicate: self.predicate.clone(),
            should_drop: Arc::new(AtomicBool::new(true)),
        };
        self.source.subscribe(wrapped)
    }
}

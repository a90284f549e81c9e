// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `take_while`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::ack::Ack;
use crate::observable::Observable;
use crate::observer::Observer;

struct TakeWhileObserver<O, P> {
    observer: O,
    predicate: Arc<P>,
    should_continue: Arc<AtomicBool>,
}

impl<T, E, O, P> Observer<T, E> for TakeWhileObserver<O, P>
where
    O: Observer<T, E>,
    P: Fn(&T) -> bool,
{
    fn on_next(&mut self, item: T) -> Ack {
        if !self.should_continue.load(Ordering::Acquire) {
            return Ack::Stop;
        }
        let keep_going = (self.predicate)(&item);
        match self.should_continue.compare_exchange(
            true,
            keep_going,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) if keep_going => {
                self.observer.on_next(item);
                Ack::Continue
            }
            Ok(_) => {
                // We are the caller that flipped the latch to false: ours is
                // the single on_completed for this subscription.
                self.observer.on_completed();
                Ack::Stop
            }
            Err(_) => {
                // Another concurrent call already flipped the latch and
                // emitted on_completed.
                Ack::Stop
            }
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
/// [`Observable::take_while`](crate::Observable::take_while).
pub struct TakeWhile<Source, P> {
    source: Source,
    predicate: Arc<P>,
}

impl<Source, P> TakeWhile<Source, P> {
    pub(crate) fn new(source: Source, predicate: P) -> TakeWhile<Source, P> {
        TakeWhile {
            source,
            predicate: Arc::new(predicate),
        }
    }
}

impl<Source, P> Observable for TakeWhile<Source, P>
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
        let wrapped = TakeWhileObserver {
            observer,
            predicate: self.predicate.clone(),
            should_continue: Arc::new(AtomicBool::new(true)),
        };
        self.source.subscribe(wrapped)
    }
}

// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `take`. Uses a CAS loop rather than a lock: this is a hot path that may
//! be driven by concurrent producers racing against themselves.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::ack::Ack;
use crate::observable::Observable;
use crate::observer::Observer;

struct TakeObserver<O> {
    observer: O,
    n: usize,
    count: Arc<AtomicUsize>,
}

impl<T, E, O> Observer<T, E> for TakeObserver<O>
where
    O: Observer<T, E>,
{
    fn on_next(&mut self, item: T) -> Ack {
        loop {
            let cur = self.count.load(Ordering::Acquire);
            if cur >= self.n {
                return Ack::Stop;
            }
            if self
                .count
                .compare_exchange(cur, cur + 1, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                self.observer.on_next(item);
                return if cur + 1 == self.n {
                    self.observer.on_completed();
                    Ack::Stop
                } else {
                    Ack::Continue
                };
            }
        }
    }

    fn on_error(&mut self, error: E) {
        self.observer.on_error(error);
    }

    fn on_completed(&mut self) {
        // The source completed before the count reached `n`; forward as-is.
        self.observer.on_completed();
    }
}

/// The observable returned by [`Observable::take`](crate::Observable::take).
pub struct Take<Source> {
    source: Source,
    n: usize,
}

impl<Source> Take<Source> {
    pub(crate) fn new(source: Source, n: usize) -> Take<Source> {
        assert!(n > 0, "take(n) requires n > 0");
        Take { source, n }
    }
}

impl<Source> Observable for Take<Source>
where
    Source: Observable,
{
    type Item = Source::Item;
    type Error = Source::Error;
    type Subscription = Source::Subscription;

    fn subscribe<O>(&self, observer: O) -> Self::Subscription
    where
        O: Observer<Self::Item, Self::Error> + Send + 'static,
    {
        let counted = TakeObserver {
            observer,
            n: self.n,
            count: Arc::new(AtomicUsize::new(0)),
        };
        self.source.subscribe(counted)
    }
}

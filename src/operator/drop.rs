// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `drop`. Named `DropN` to avoid colliding with
//! [`std::ops::Drop`]; the public method is still `Observable::drop`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::ack::Ack;
use crate::observable::Observable;
use crate::observer::Observer;

struct DropObserver<O> {
    observer: O,
    n: usize,
    count: Arc<AtomicUsize>,
}

impl<T, E, O> Observer<T, E> for DropObserver<O>
where
    O: Observer<T, E>,
{
    fn on_next(&mut self, item: T) -> Ack {
        loop {
            let cur = self.count.load(Ordering::Acquire);
            if cur >= self.n {
                return self.observer.on_next(item);
            }
            if self
                .count
                .compare_exchange(cur, cur + 1, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return Ack::Continue;
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

/// The observable returned by [`Observable::drop`](crate::Observable::drop).
pub struct DropN<Source> {
    source: Source,
    n: usize,
}

impl<Source> DropN<Source> {
    pub(crate) fn new(source: Source, n: usize) -> DropN<Source> {
        assert!(n > 0, "drop(n) requires n > 0");
        DropN { source, n }
    }
}

impl<Source> Observable for DropN<Source>
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
        let counted = DropObserver {
            observer,
            n: self.n,
            count: Arc::new(AtomicUsize::new(0)),
        };
        self.source.subscribe(counted)
    }
}

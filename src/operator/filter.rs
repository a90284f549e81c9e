// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `filter`.

use std::sync::Arc;

use crate::ack::Ack;
use crate::observable::Observable;
use crate::observer::Observer;

struct FilterObserver<O, P> {
    observer: O,
    predicate: Arc<P>,
}

impl<T, E, O, P> Observer<T, E> for FilterObserver<O, P>
where
    O: Observer<T, E>,
    P: Fn(&T) -> bool,
{
    fn on_next(&mut self, item: T) -> Ack {
        if (self.predicate)(&item) {
            self.observer.on_next(item)
        } else {
            Ack::Continue
        }
    }

    fn on_error(&mut self, error: E) {
        self.observer.on_error(error);
    }

    fn on_completed(&mut self) {
        self.observer.on_completed();
    }
}

/// The observable returned by [`Observable::filter`](crate::Observable::filter).
pub struct Filter<Source, P> {
    source: Source,
    predicate: Arc<P>,
}

impl<Source, P> Filter<Source, P> {
    pub(crate) fn new(source: Source, predicate: P) -> Filter<Source, P> {
        Filter {
            source,
            predicate: Arc::new(predicate),
        }
    }
}

impl<Source, P> Observable for Filter<Source, P>
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
        let filtered = FilterObserver {
            observer,
            predicate: self.predicate.clone(),
        };
        self.source.subscribe(filtered)
    }
}

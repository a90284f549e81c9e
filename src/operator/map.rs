// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `map`.

use std::sync::Arc;

use crate::ack::Ack;
use crate::observable::Observable;
use crate::observer::Observer;

struct MapObserver<O, F> {
    observer: O,
    f: Arc<F>,
}

impl<T, U, E, O, F> Observer<T, E> for MapObserver<O, F>
where
    O: Observer<U, E>,
    F: Fn(T) -> U,
{
    fn on_next(&mut self, item: T) -> Ack {
        self.observer.on_next((self.f)(item))
    }

    fn on_error(&mut self, error: E) {
        self.observer.on_error(error);
    }

    fn on_completed(&mut self) {
        self.observer.on_completed();
    }
}

/// The observable returned by [`Observable::map`](crate::Observable::map).
pub struct Map<Source, F> {
    source: Source,
    f: Arc<F>,
}

impl<Source, F> Map<Source, F> {
    pub(crate) fn new(source: Source, f: F) -> Map<Source, F> {
        Map {
            source,
            f: Arc::new(f),
        }
    }
}

impl<Source, U, F> Observable for Map<Source, F>
where
    Source: Observable,
    F: Fn(Source::Item) -> U + Send + Sync + 'static,
{
    type Item = U;
    type Error = Source::Error;
    type Subscription = Source::Subscription;

    fn subscribe<O>(&self, observer: O) -> Self::Subscription
    where
        O: Observer<Self::Item, Self::Error> + Send + 'static,
    {
        let mapped = MapObserver {
            observer,
            f: self.f.clone(),
        };
        self.source.subscribe(mapped)
    }
}

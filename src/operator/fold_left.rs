// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `fold_left`.

use std::sync::Arc;

use crate::ack::Ack;
use crate::observable::Observable;
use crate::observer::Observer;

struct FoldLeftObserver<O, S, F> {
    observer: O,
    state: Option<S>,
    f: Arc<F>,
}

impl<T, E, O, S, F> Observer<T, E> for FoldLeftObserver<O, S, F>
where
    O: Observer<S, E>,
    F: Fn(S, T) -> S,
{
    fn on_next(&mut self, item: T) -> Ack {
        let current = self
            .state
            .take()
            .expect("fold_left state missing between calls");
        self.state = Some((self.f)(current, item));
        Ack::Continue
    }

    fn on_error(&mut self, error: E) {
        self.observer.on_error(error);
    }

    fn on_completed(&mut self) {
        if let Some(final_state) = self.state.take() {
            if self.observer.on_next(final_state).is_continue() {
                self.observer.on_completed();
            }
        }
    }
}

/// The observable returned by
/// [`Observable::fold_left`](crate::Observable::fold_left).
pub struct FoldLeft<Source, S, F> {
    source: Source,
    seed: S,
    f: Arc<F>,
}

impl<Source, S, F> FoldLeft<Source, S, F> {
    pub(crate) fn new(source: Source, seed: S, f: F) -> FoldLeft<Source, S, F> {
        FoldLeft {
            source,
            seed,
            f: Arc::new(f),
        }
    }
}

impl<Source, S, F> Observable for FoldLeft<Source, S, F>
where
    Source: Observable,
    S: Clone + Send + Sync + 'static,
    F: Fn(S, Source::Item) -> S + Send + Sync + 'static,
{
    type Item = S;
    type Error = Source::Error;
    type Subscription = Source::Subscription;

    fn subscribe<O>(&self, observer: O) -> Self::Subscription
    where
        O: Observer<Self::Item, Self::Error> + Send + 'static,
    {
        let folding = FoldLeftObserver {
            observer,
            state: Some(self.seed.clone()),
            f: self.f.clone(),
        };
        self.source.subscribe(folding)
    }
}

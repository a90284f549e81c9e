// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `from_traversable`.
//!
//! Obtaining the iterator is infallible here: `IntoIterator::into_iter`
//! cannot fail, so the "iterator construction itself throws" edge case some
//! source implementations guard against has no code path to exercise here;
//! only the per-element delivery loop and its `Stop`/natural-end
//! distinction apply.

use std::marker::PhantomData;

use crate::cancelable::AlreadyCanceled;
use crate::observable::Observable;
use crate::observer::Observer;

/// An observable that synchronously replays a cloned traversable.
pub struct FromTraversable<I, E> {
    seq: I,
    _marker: PhantomData<fn() -> E>,
}

/// Creates an observable that emits every element of `seq`, in order, then
/// completes. `I` must be `Clone`: a cold observable iterates a fresh copy on
/// every `subscribe` call.
pub fn from_traversable<I, E>(seq: I) -> FromTraversable<I, E>
where
    I: Clone + IntoIterator,
{
    FromTraversable {
        seq,
        _marker: PhantomData,
    }
}

impl<I, E> Observable for FromTraversable<I, E>
where
    I: Clone + IntoIterator,
{
    type Item = I::Item;
    type Error = E;
    type Subscription = AlreadyCanceled;

    fn subscribe<O>(&self, mut observer: O) -> AlreadyCanceled
    where
        O: Observer<I::Item, E> + Send + 'static,
    {
        for item in self.seq.clone() {
            if observer.on_next(item).is_stop() {
                // Downstream is done; stop without emitting on_completed.
                return AlreadyCanceled;
            }
        }
        observer.on_completed();
        AlreadyCanceled
    }
}

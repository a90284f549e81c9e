// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `empty`.

use std::marker::PhantomData;

use crate::cancelable::AlreadyCanceled;
use crate::observable::Observable;
use crate::observer::Observer;

/// An observable that emits `on_completed` synchronously and nothing else.
pub struct Empty<T, E> {
    _marker: PhantomData<fn() -> (T, E)>,
}

/// Creates an observable that completes immediately without ever emitting a
/// value.
pub fn empty<T, E>() -> Empty<T, E> {
    Empty {
        _marker: PhantomData,
    }
}

impl<T, E> Observable for Empty<T, E> {
    type Item = T;
    type Error = E;
    type Subscription = AlreadyCanceled;

    fn subscribe<O>(&self, mut observer: O) -> AlreadyCanceled
    where
        O: Observer<T, E> + Send + 'static,
    {
        observer.on_completed();
        AlreadyCanceled
    }
}

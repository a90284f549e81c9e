// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `error`.

use std::marker::PhantomData;

use crate::cancelable::AlreadyCanceled;
use crate::observable::Observable;
use crate::observer::Observer;

/// An observable that emits `on_error` synchronously and nothing else.
pub struct ErrorSource<T, E> {
    error: E,
    _marker: PhantomData<fn() -> T>,
}

/// Creates an observable that fails with `error` immediately. `E` must be
/// `Clone`: a cold observable re-raises the same error fresh on every
/// `subscribe` call.
pub fn error<T, E>(error: E) -> ErrorSource<T, E>
where
    E: Clone,
{
    ErrorSource {
        error,
        _marker: PhantomData,
    }
}

impl<T, E> Observable for ErrorSource<T, E>
where
    E: Clone,
{
    type Item = T;
    type Error = E;
    type Subscription = AlreadyCanceled;

    fn subscribe<O>(&self, mut observer: O) -> AlreadyCanceled
    where
        O: Observer<T, E> + Send + 'static,
    {
        observer.on_error(self.error.clone());
        AlreadyCanceled
    }
}

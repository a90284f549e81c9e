// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `unit`.

use std::marker::PhantomData;

use crate::cancelable::AlreadyCanceled;
use crate::observable::Observable;
use crate::observer::Observer;

/// An observable that emits a single value, then completes, synchronously.
pub struct Unit<T, E> {
    value: T,
    _marker: PhantomData<fn() -> E>,
}

/// Creates an observable that emits `value` then completes. `T` must be
/// `Clone`: a cold observable re-emits `value` fresh on every `subscribe`
/// call.
pub fn unit<T, E>(value: T) -> Unit<T, E>
where
    T: Clone,
{
    Unit {
        value,
        _marker: PhantomData,
    }
}

impl<T, E> Observable for Unit<T, E>
where
    T: Clone,
{
    type Item = T;
    type Error = E;
    type Subscription = AlreadyCanceled;

    fn subscribe<O>(&self, mut observer: O) -> AlreadyCanceled
    where
        O: Observer<T, E> + Send + 'static,
    {
        if observer.on_next(self.value.clone()).is_continue() {
            observer.on_completed();
        }
        AlreadyCanceled
    }
}

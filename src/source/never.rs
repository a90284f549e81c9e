// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `never`.

use std::marker::PhantomData;

use crate::cancelable::BooleanCancelable;
use crate::observable::Observable;
use crate::observer::Observer;

/// An observable that never pushes a value and never completes.
pub struct Never<T, E> {
    _marker: PhantomData<fn() -> (T, E)>,
}

/// Creates an observable that never emits anything.
pub fn never<T, E>() -> Never<T, E> {
    Never {
        _marker: PhantomData,
    }
}

impl<T, E> Observable for Never<T, E> {
    type Item = T;
    type Error = E;
    type Subscription = BooleanCancelable;

    fn subscribe<O>(&self, _observer: O) -> BooleanCancelable
    where
        O: Observer<T, E> + Send + 'static,
    {
        // A fresh cancelable with no teardown action: there is nothing to
        // release, but every subscription still gets its own live handle.
        BooleanCancelable::empty()
    }
}

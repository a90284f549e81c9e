// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `merge` and `as_future`. Both are "for completeness" derived operators
//! rather than primitives, so they get direct implementations instead of
//! being expressed via the others (see `DESIGN.md`).

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::ack::Ack;
use crate::cancelable::CompositeCancelable;
use crate::observable::Observable;
use crate::observer::Observer;

struct MergeState<O> {
    done_a: bool,
    done_b: bool,
    terminated: bool,
    downstream: O,
}

impl<T, E, O> MergeState<O>
where
    O: Observer<T, E>,
{
    fn on_next(&mut self, item: T) -> Ack {
        if self.terminated {
            return Ack::Stop;
        }
        self.downstream.on_next(item)
    }

    fn on_a_completed(&mut self) {
        self.done_a = true;
        if !self.terminated && self.done_b {
            self.finish();
        }
    }

    fn on_b_completed(&mut self) {
        self.done_b = true;
        if !self.terminated && self.done_a {
            self.finish();
        }
    }

    fn on_error(&mut self, error: E) {
        if self.terminated {
            return;
        }
        self.terminated = true;
        self.downstream.on_error(error);
    }

    fn finish(&mut self) {
        self.terminated = true;
        self.downstream.on_completed();
    }
}

struct MergeSideA<O> {
    shared: Arc<Mutex<MergeState<O>>>,
}

impl<T, E, O> Observer<T, E> for MergeSideA<O>
where
    O: Observer<T, E>,
{
    fn on_next(&mut self, item: T) -> Ack {
        self.shared.lock().on_next(item)
    }

    fn on_error(&mut self, error: E) {
        self.shared.lock().on_error(error);
    }

    fn on_completed(&mut self) {
        self.shared.lock().on_a_completed();
    }
}

struct MergeSideB<O> {
    shared: Arc<Mutex<MergeState<O>>>,
}

impl<T, E, O> Observer<T, E> for MergeSideB<O>
where
    O: Observer<T, E>,
{
    fn on_next(&mut self, item: T) -> Ack {
        self.shared.lock().on_next(item)
    }

    fn on_error(&mut self, error: E) {
        self.shared.lock().on_error(error);
    }

    fn on_completed(&mut self) {
        self.shared.lock().on_b_completed();
    }
}

/// The observable returned by [`merge`](crate::merge).
pub struct Merge<A, B> {
    a: A,
    b: B,
}

impl<A, B> Merge<A, B> {
    pub(crate) fn new(a: A, b: B) -> Merge<A, B> {
        Merge { a, b }
    }
}

impl<A, B> Observable for Merge<A, B>
where
    A: Observable,
    B: Observable<Item = A::Item, Error = A::Error>,
    A::Subscription: 'static,
    B::Subscription: 'static,
{
    type Item = A::Item;
    type Error = A::Error;
    type Subscription = CompositeCancelable;

    fn subscribe<O>(&self, observer: O) -> Self::Subscription
    where
        O: Observer<Self::Item, Self::Error> + Send + 'static,
    {
        let shared = Arc::new(Mutex::new(MergeState {
            done_a: false,
            done_b: false,
            terminated: false,
            downstream: observer,
        }));
        let composite = CompositeCancelable::new();
        let subs_a = self.a.subscribe(MergeSideA {
            shared: shared.clone(),
        });
        composite.insert(Box::new(subs_a));
        let subs_b = self.b.subscribe(MergeSideB {
            shared: shared.clone(),
        });
        composite.insert(Box::new(subs_b));
        composite
    }
}

/// A one-shot, blocking handle for [`Observable::as_future`](crate::Observable::as_future).
///
/// This is deliberately not `std::future::Future`: the crate has no async
/// runtime to poll one. `wait()` parks the calling thread on a condition
/// variable until the stream settles.
pub struct PromiseHandle<T, E> {
    shared: Arc<(Mutex<Option<Result<T, E>>>, Condvar)>,
}

impl<T, E> PromiseHandle<T, E> {
    /// Blocks until the observable this handle was created from has
    /// completed or errored, then returns the outcome.
    pub fn wait(&self) -> Result<T, E> {
        let (lock, condvar) = &*self.shared;
        let mut guard = lock.lock();
        loop {
            if let Some(result) = guard.take() {
                return result;
            }
            condvar.wait(&mut guard);
        }
    }
}

pub(crate) struct AsFutureObserver<T, E> {
    shared: Arc<(Mutex<Option<Result<Option<T>, E>>>, Condvar)>,
}

impl<T, E> Observer<T, E> for AsFutureObserver<T, E> {
    fn on_next(&mut self, item: T) -> Ack {
        let (lock, condvar) = &*self.shared;
        let mut guard = lock.lock();
        if guard.is_some() {
            // Grammar violation upstream (a call after we already returned
            // `Stop`); ignore rather than clobber the already-resolved value.
            return Ack::Stop;
        }
        *guard = Some(Ok(Some(item)));
        drop(guard);
        condvar.notify_all();
        Ack::Stop
    }

    fn on_error(&mut self, error: E) {
        let (lock, condvar) = &*self.shared;
        let mut guard = lock.lock();
        if guard.is_some() {
            return;
        }
        *guard = Some(Err(error));
        drop(guard);
        condvar.notify_all();
    }

    fn on_completed(&mut self) {
        let (lock, condvar) = &*self.shared;
        let mut guard = lock.lock();
        if guard.is_some() {
            return;
        }
        *guard = Some(Ok(None));
        drop(guard);
        condvar.notify_all();
    }
}

/// Subscribes `source` and returns a handle that resolves once it settles:
/// `Ok(Some(first_item))` on the first value (the subscription then stops),
/// `Ok(None)` on an empty completion, `Err(error)` on error.
pub(crate) fn as_future<Source>(
    source: &Source,
) -> PromiseHandle<Option<Source::Item>, Source::Error>
where
    Source: Observable,
    Source::Item: Send + 'static,
    Source::Error: Send + 'static,
{
    let shared = Arc::new((Mutex::new(None), Condvar::new()));
    let observer = AsFutureObserver {
        shared: shared.clone(),
    };
    drop(source.subscribe(observer));
    PromiseHandle { shared }
}

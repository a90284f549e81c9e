// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `flat_map`, the most intricate operator in the set.
//!
//! A [`CompositeCancelable`] aggregates the outer subscription and every
//! live inner subscription; a [`RefCountCancelable`] whose terminal action
//! is `observer.on_completed()` tracks liveness, firing only once the outer
//! has completed and every acquired inner handle has been released.
//!
//! Inner streams are allowed to deliver concurrently against each other, but
//! Rust's aliasing rules mean the shared downstream still needs a lock to
//! hand out `&mut` access safely; there is no way to skip this and leave
//! serialization to an opt-in `safe()` call. The downstream is therefore
//! always wrapped in a [`SynchronizedObserver`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::ack::Ack;
use crate::cancelable::{
    Cancelable, CompositeCancelable, CompositeHandle, RefCountCancelable, SingleAssignmentCancelable,
};
use crate::observable::Observable;
use crate::observer::{Observer, SynchronizedObserver};

struct InnerObserver<O> {
    downstream: SynchronizedObserver<O>,
    composite: Arc<CompositeCancelable>,
    composite_handle: CompositeHandle,
    assignment: Arc<SingleAssignmentCancelable>,
    refcount_handle: Box<dyn Cancelable>,
    terminated: Arc<AtomicBool>,
}

impl<T, E, O> Observer<T, E> for InnerObserver<O>
where
    O: Observer<T, E>,
{
    fn on_next(&mut self, item: T) -> Ack {
        if self.terminated.load(Ordering::Acquire) {
            return Ack::Stop;
        }
        self.downstream.on_next(item)
    }

    fn on_error(&mut self, error: E) {
        if self.terminated.swap(true, Ordering::AcqRel) {
            return;
        }
        self.downstream.on_error(error);
        self.composite.cancel();
    }

    fn on_completed(&mut self) {
        self.composite.remove(self.composite_handle);
        self.assignment.cancel();
        self.refcount_handle.cancel();
    }
}

struct OuterObserver<F, O> {
    f: Arc<F>,
    downstream: SynchronizedObserver<O>,
    composite: Arc<CompositeCancelable>,
    refcount: Arc<RefCountCancelable>,
    terminated: Arc<AtomicBool>,
}

impl<T, U, E, F, O> Observer<T, E> for OuterObserver<F, O>
where
    F: Fn(T) -> U,
    U: Observable<Error = E>,
    U::Subscription: 'static,
    U::Item: Send + 'static,
    O: Observer<U::Item, E> + Send + 'static,
    E: Send + 'static,
{
    fn on_next(&mut self, item: T) -> Ack {
        let inner = (self.f)(item);
        let refcount_handle = self.refcount.acquire();
        let assignment = Arc::new(SingleAssignmentCancelable::new());
        let composite_handle = self.composite.insert(Box::new(assignment.clone()));
        let inner_observer = InnerObserver {
            downstream: self.downstream.clone(),
            composite: self.composite.clone(),
            composite_handle,
            assignment: assignment.clone(),
            refcount_handle,
            terminated: self.terminated.clone(),
        };
        let inner_subs = inner.subscribe(inner_observer);
        assignment.assign(Box::new(inner_subs));
        Ack::Continue
    }

    fn on_error(&mut self, error: E) {
        if self.terminated.swap(true, Ordering::AcqRel) {
            return;
        }
        self.downstream.on_error(error);
        self.composite.cancel();
    }

    fn on_completed(&mut self) {
        self.refcount.cancel();
    }
}

/// The observable returned by
/// [`Observable::flat_map`](crate::Observable::flat_map).
pub struct FlatMap<Source, F> {
    source: Source,
    f: Arc<F>,
}

impl<Source, F> FlatMap<Source, F> {
    pub(crate) fn new(source: Source, f: F) -> FlatMap<Source, F> {
        FlatMap {
            source,
            f: Arc::new(f),
        }
    }
}

impl<Source, U, F> Observable for FlatMap<Source, F>
where
    Source: Observable,
    Source::Subscription: 'static,
    F: Fn(Source::Item) -> U + Send + Sync + 'static,
    U: Observable<Error = Source::Error>,
    U::Subscription: 'static,
    U::Item: Send + 'static,
    Source::Error: Send + 'static,
{
    type Item = U::Item;
    type Error = Source::Error;
    type Subscription = Arc<CompositeCancelable>;

    fn subscribe<O>(&self, observer: O) -> Self::Subscription
    where
        O: Observer<Self::Item, Self::Error> + Send + 'static,
    {
        let downstream = SynchronizedObserver::new(observer);
        let composite = Arc::new(CompositeCancelable::new());
        let terminated = Arc::new(AtomicBool::new(false));

        let terminal_downstream = downstream.clone();
        let terminal_terminated = terminated.clone();
        let refcount = Arc::new(RefCountCancelable::new(move || {
            if !terminal_terminated.swap(true, Ordering::AcqRel) {
                let mut downstream = terminal_downstream;
                downstream.on_completed();
            }
        }));

        let outer_observer = OuterObserver {
            f: self.f.clone(),
            downstream: downstream.clone(),
            composite: composite.clone(),
            refcount,
            terminated,
        };
        let subs_source = self.source.subscribe(outer_observer);
        composite.insert(Box::new(subs_source));
        composite
    }
}

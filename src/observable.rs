// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! The observable abstraction and the operator set built on top of it.

use std::fmt::Debug;
use std::sync::Arc;

use crate::cancelable::{AlreadyCanceled, Cancelable};
use crate::observer::{CompletedObserver, ErrorObserver, NextObserver, Observer};
use crate::operator::{
    Concat, DoOnCompleted, DoWork, DropN, Filter, FlatMap, FoldLeft, Map, Safe, Take, TakeWhile,
};
use crate::scheduler::Scheduler;

/// A cold producer of a finite or infinite sequence of values.
///
/// An observable represents a stream of values, much like an iterator, but
/// instead of being pull-based like an iterator, it is push-based: a
/// subscription installs an observer, and the observable calls into it
/// whenever it has a value, until it either completes, fails, or the
/// subscriber cancels.
///
/// Observables are cold: subscribing twice runs the producer twice,
/// independently. `subscribe` therefore takes `&self`, not `self`: nothing
/// about an observable value is consumed by using it.
///
/// Operators, by contrast, consume their upstream: `source.map(f)` takes
/// ownership of `source` and returns a new observable that captures it,
/// mirroring the way [`Iterator`] adapters consume their receiver.
pub trait Observable: Sized {
    /// The value produced by the observable.
    type Item;

    /// The error produced if the observable fails.
    type Error;

    /// The result of subscribing an observer.
    type Subscription: Cancelable;

    /// Subscribes an observer and returns its subscription.
    ///
    /// After subscription, `on_next` is called for every value produced.
    /// If the observable completes, `on_completed` is called; if it fails,
    /// `on_error` is called. No method is called on the observer after
    /// `on_completed` or `on_error`, or after an `on_next` call that
    /// returned [`Ack::Stop`](crate::Ack::Stop).
    ///
    /// _When_ the observer is called is not part of the contract: it may
    /// happen before `subscribe` returns, or later, on another thread.
    fn subscribe<O>(&self, observer: O) -> Self::Subscription
    where
        O: Observer<Self::Item, Self::Error> + Send + 'static;

    /// Subscribes a closure that handles values; an unhandled error is
    /// reported to `scheduler`.
    fn subscribe_next<FnNext>(&self, scheduler: Arc<dyn Scheduler>, next_fn: FnNext) -> Self::Subscription
    where
        FnNext: FnMut(Self::Item) + Send + 'static,
        Self::Error: Debug + Send + Sync + 'static,
    {
        self.subscribe(NextObserver { next_fn, scheduler })
    }

    /// Subscribes closures that handle values and completion; an unhandled
    /// error is reported to `scheduler`.
    fn subscribe_completed<FnNext, FnCompleted>(
        &self,
        scheduler: Arc<dyn Scheduler>,
        next_fn: FnNext,
        completed_fn: FnCompleted,
    ) -> Self::Subscription
    where
        FnNext: FnMut(Self::Item) + Send + 'static,
        FnCompleted: FnMut() + Send + 'static,
        Self::Error: Debug + Send + Sync + 'static,
    {
        self.subscribe(CompletedObserver {
            next_fn,
            completed_fn,
            scheduler,
        })
    }

    /// Subscribes closures that handle values, completion and error.
    fn subscribe_error<FnNext, FnCompleted, FnError>(
        &self,
        next_fn: FnNext,
        completed_fn: FnCompleted,
        error_fn: FnError,
    ) -> Self::Subscription
    where
        FnNext: FnMut(Self::Item) + Send + 'static,
        FnCompleted: FnMut() + Send + 'static,
        FnError: FnMut(Self::Error) + Send + 'static,
    {
        self.subscribe(ErrorObserver {
            next_fn,
            completed_fn,
            error_fn,
        })
    }

    /// Transforms every value with `f`.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Item) -> U + Send + Sync + 'static,
    {
        Map::new(self, f)
    }

    /// Keeps only the values for which `predicate` holds.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: Fn(&Self::Item) -> bool + Send + Sync + 'static,
    {
        Filter::new(self, predicate)
    }

    /// Subscribes to `f(item)` for every upstream item and merges the inner
    /// streams into the downstream.
    fn flat_map<U, F>(self, f: F) -> FlatMap<Self, F>
    where
        F: Fn(Self::Item) -> U + Send + Sync + 'static,
        U: Observable<Error = Self::Error>,
    {
        FlatMap::new(self, f)
    }

    /// Forwards at most the first `n` items, then completes.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`: parameter validation fails synchronously at
    /// construction.
    fn take(self, n: usize) -> Take<Self> {
        Take::new(self, n)
    }

    /// Discards the first `n` items, then forwards every subsequent one.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    fn drop(self, n: usize) -> DropN<Self> {
        DropN::new(self, n)
    }

    /// Forwards items while `predicate` holds, then completes on the first
    /// item for which it does not.
    fn take_while<P>(self, predicate: P) -> TakeWhile<Self, P>
    where
        P: Fn(&Self::Item) -> bool + Send + Sync + 'static,
    {
        TakeWhile::new(self, predicate)
    }

    /// Discards items while `predicate` holds, then forwards every item from
    /// the first one for which it does not.
    fn drop_while<P>(self, predicate: P) -> crate::operator::DropWhile<Self, P>
    where
        P: Fn(&Self::Item) -> bool + Send + Sync + 'static,
    {
        crate::operator::DropWhile::new(self, predicate)
    }

    /// Folds the whole stream into a single value, emitted on completion.
    fn fold_left<S, F>(self, seed: S, f: F) -> FoldLeft<Self, S, F>
    where
        S: Clone + Send + Sync + 'static,
        F: Fn(S, Self::Item) -> S + Send + Sync + 'static,
    {
        FoldLeft::new(self, seed, f)
    }

    /// Runs `self` to completion, then subscribes `other` to the same
    /// downstream.
    fn concat<Other>(self, other: Other) -> Concat<Self, Other>
    where
        Other: Observable<Item = Self::Item, Error = Self::Error>,
    {
        Concat::new(self, other)
    }

    /// Pairs items from `self` and `other` positionally.
    fn zip<Other>(self, other: Other) -> crate::operator::Zip<Self, Other>
    where
        Other: Observable<Error = Self::Error>,
    {
        crate::operator::Zip::new(self, other)
    }

    /// Runs `cb` after forwarding `on_completed`.
    ///
    /// `cb` is not protected by the stream-error discipline: the contract is
    /// undefined if it panics.
    fn do_on_completed<Cb>(self, cb: Cb) -> DoOnCompleted<Self, Cb>
    where
        Cb: FnMut() + Send + Sync + 'static,
    {
        DoOnCompleted::new(self, cb)
    }

    /// Runs `cb(item)` for its side effect before forwarding every item.
    fn do_work<Cb>(self, cb: Cb) -> DoWork<Self, Cb>
    where
        Cb: Fn(&Self::Item) + Send + Sync + 'static,
    {
        DoWork::new(self, cb)
    }

    /// `take(1)`.
    fn head(self) -> Take<Self> {
        self.take(1)
    }

    /// `drop(1)`.
    fn tail(self) -> DropN<Self> {
        self.drop(1)
    }

    /// `filter(p).head()`.
    fn find<P>(self, predicate: P) -> Take<Filter<Self, P>>
    where
        P: Fn(&Self::Item) -> bool + Send + Sync + 'static,
    {
        self.filter(predicate).head()
    }

    /// Wraps the subscription so the downstream is only ever accessed
    /// through a synchronized observer.
    fn safe(self) -> Safe<Self> {
        Safe::new(self)
    }

    /// Subscribes `self` and blocks the calling thread until it settles.
    ///
    /// Resolves to `Ok(Some(first_item))` as soon as one arrives (the
    /// subscription then stops), `Ok(None)` on an empty completion, or
    /// `Err(error)`. Not backed by `std::future::Future`: this crate has no
    /// async runtime to poll one.
    fn as_future(&self) -> crate::operator::PromiseHandle<Option<Self::Item>, Self::Error>
    where
        Self::Item: Send + 'static,
        Self::Error: Send + 'static,
    {
        crate::operator::as_future(self)
    }
}

/// `find(p).fold_left(false, |_, _| true)`.
///
/// A free function rather than a trait method: the closure built from
/// negating `predicate` for [`for_all`] has an anonymous type that a trait
/// method's concrete return type cannot name, so every derived operator past
/// `find` is expressed this way for consistency.
pub fn exists<Source, P>(
    source: Source,
    predicate: P,
) -> FoldLeft<Take<Filter<Source, P>>, bool, fn(bool, Source::Item) -> bool>
where
    Source: Observable,
    P: Fn(&Source::Item) -> bool + Send + Sync + 'static,
{
    source.find(predicate).fold_left(false, |_, _| true)
}

/// `exists(¬p).map(¬)`.
pub fn for_all<Source, P>(source: Source, predicate: P) -> impl Observable<Item = bool, Error = Source::Error>
where
    Source: Observable,
    Source::Item: 'static,
    P: Fn(&Source::Item) -> bool + Send + Sync + 'static,
{
    exists(source, move |item: &Source::Item| !predicate(item)).map(|found| !found)
}

/// When `Item` is itself an observable, merges every inner stream into the
/// downstream: `flat_map(identity)`.
pub fn flatten<Source>(source: Source) -> FlatMap<Source, fn(Source::Item) -> Source::Item>
where
    Source: Observable,
    Source::Item: Observable<Error = Source::Error>,
{
    source.flat_map(|inner| inner)
}

/// `head().fold_left(None, |_, x| Some(x)).map(|opt| opt.unwrap_or(default))`.
pub fn head_or_else<Source>(
    source: Source,
    default: Source::Item,
) -> impl Observable<Item = Source::Item, Error = Source::Error>
where
    Source: Observable,
    Source::Item: Clone + Send + Sync + 'static,
{
    source
        .head()
        .fold_left(None::<Source::Item>, |_, x| Some(x))
        .map(move |opt: Option<Source::Item>| opt.unwrap_or_else(|| default.clone()))
}

/// `from_traversable([a, b]).flat_map(identity)`, implemented directly as a
/// two-way merge rather than through a type-erased traversable of
/// observables: `a` and `b` are not required to share a concrete type, only
/// `Item`/`Error`.
pub fn merge<A, B>(a: A, b: B) -> crate::operator::Merge<A, B>
where
    A: Observable,
    B: Observable<Item = A::Item, Error = A::Error>,
{
    crate::operator::Merge::new(a, b)
}

/// Wraps an arbitrary subscription function.
///
/// `subscribe_fn` is handed a fresh `&mut dyn Observer` for the duration of
/// the call and must return the subscription's cancelable. If it returns
/// `Err(e)` instead, the systems-language rendition of "`f` itself threw",
/// the error is delivered as `observer.on_error(e)` and the already-canceled
/// sentinel is returned.
pub fn create<T, E, F>(subscribe_fn: F) -> CreateObservable<T, E, F>
where
    F: Fn(&mut dyn Observer<T, E>) -> Result<Box<dyn Cancelable>, E>,
{
    CreateObservable {
        subscribe_fn,
        _marker: std::marker::PhantomData,
    }
}

/// The observable returned by [`create`].
pub struct CreateObservable<T, E, F> {
    subscribe_fn: F,
    _marker: std::marker::PhantomData<fn() -> (T, E)>,
}

impl<T, E, F> Observable for CreateObservable<T, E, F>
where
    F: Fn(&mut dyn Observer<T, E>) -> Result<Box<dyn Cancelable>, E>,
{
    type Item = T;
    type Error = E;
    type Subscription = Box<dyn Cancelable>;

    fn subscribe<O>(&self, observer: O) -> Box<dyn Cancelable>
    where
        O: Observer<T, E> + Send + 'static,
    {
        let mut boxed: Box<dyn Observer<T, E> + Send> = Box::new(observer);
        match (self.subscribe_fn)(boxed.as_mut()) {
            Ok(subscription) => subscription,
            Err(error) => {
                boxed.on_error(error);
                Box::new(AlreadyCanceled)
            }
        }
    }
}

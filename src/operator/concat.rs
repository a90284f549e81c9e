// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `++` / concatenation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::ack::Ack;
use crate::cancelable::{AlreadyCanceled, Cancelable};
use crate::observable::Observable;
use crate::observer::{Observer, SynchronizedObserver};

enum Phase {
    Source,
    Other,
}

struct ConcatShared {
    active: Box<dyn Cancelable>,
    phase: Phase,
}

struct ConcatObserver<Other, O> {
    downstream: SynchronizedObserver<O>,
    other: Arc<Other>,
    shared: Arc<Mutex<ConcatShared>>,
    canceled: Arc<AtomicBool>,
}

impl<T, E, Other, O> Observer<T, E> for ConcatObserver<Other, O>
where
    Other: Observable<Item = T, Error = E>,
    Other::Subscription: 'static,
    O: Observer<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    fn on_next(&mut self, item: T) -> Ack {
        self.downstream.on_next(item)
    }

    fn on_error(&mut self, error: E) {
        self.downstream.on_error(error);
    }

    fn on_completed(&mut self) {
        if self.canceled.load(Ordering::Acquire) {
            return;
        }
        let subs_other = self.other.subscribe(self.downstream.clone());
        let mut guard = self.shared.lock();
        guard.phase = Phase::Other;
        guard.active = Box::new(subs_other);
        drop(guard);
        // A cancel() that ran concurrently with the subscribe above may have
        // canceled the (now stale) source slot instead of `other`'s fresh
        // subscription; re-cancel to make sure it still takes effect.
        if self.canceled.load(Ordering::Acquire) {
            self.shared.lock().active.cancel();
        }
    }
}

/// The cancelable returned by subscribing to a [`Concat`].
pub struct ConcatSubscription {
    shared: Arc<Mutex<ConcatShared>>,
    canceled: Arc<AtomicBool>,
}

impl Cancelable for ConcatSubscription {
    fn cancel(&self) {
        self.canceled.store(true, Ordering::Release);
        self.shared.lock().active.cancel();
    }

    fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Acquire)
    }
}

/// The observable returned by [`Observable::concat`](crate::Observable::concat).
pub struct Concat<Source, Other> {
    source: Source,
    other: Arc<Other>,
}

impl<Source, Other> Concat<Source, Other> {
    pub(crate) fn new(source: Source, other: Other) -> Concat<Source, Other> {
        Concat {
            source,
            other: Arc::new(other),
        }
    }
}

impl<Source, Other> Observable for Concat<Source, Other>
where
    Source: Observable,
    Source::Subscription: 'static,
    Other: Observable<Item = Source::Item, Error = Source::Error> + Send + Sync + 'static,
    Other::Subscription: 'static,
{
    type Item = Source::Item;
    type Error = Source::Error;
    type Subscription = ConcatSubscription;

    fn subscribe<O>(&self, observer: O) -> Self::Subscription
    where
        O: Observer<Self::Item, Self::Error> + Send + 'static,
    {
        let downstream = SynchronizedObserver::new(observer);
        let canceled = Arc::new(AtomicBool::new(false));
        let shared = Arc::new(Mutex::new(ConcatShared {
            active: Box::new(AlreadyCanceled),
            phase: Phase::Source,
        }));
        let concat_observer = ConcatObserver {
            downstream: downstream.clone(),
            other: self.other.clone(),
            shared: shared.clone(),
            canceled: canceled.clone(),
        };
        let subs_source = self.source.subscribe(concat_observer);
        {
            let mut guard = shared.lock();
            if matches!(guard.phase, Phase::Source) {
                guard.active = Box::new(subs_source);
            }
            // Otherwise `on_completed` already ran synchronously and moved
            // the shared slot to `other`'s subscription; `subs_source` is
            // for an already-finished subscription and can just be dropped.
        }
        ConcatSubscription { shared, canceled }
    }
}

// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! The observer contract.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::scheduler::Scheduler;
use crate::Ack;

/// A sink that an [`Observable`](crate::Observable) pushes values into.
///
/// # Grammar
///
/// `on_next*` followed by at most one of `on_error` or `on_completed`. This
/// is enforced by the protocol, not by the type: nothing stops a
/// buggy producer from calling `on_next` again after a terminal event, but
/// every observable and operator in this crate upholds the grammar on the
/// sending side.
pub trait Observer<T, E> {
    /// Presents the observer with one item. Must return synchronously.
    fn on_next(&mut self, item: T) -> Ack;

    /// Presents the observer with a terminal error. No further calls follow.
    fn on_error(&mut self, error: E);

    /// Presents the observer with normal termination. No further calls
    /// follow.
    fn on_completed(&mut self);
}

impl<T, E> Observer<T, E> for Box<dyn Observer<T, E> + Send> {
    fn on_next(&mut self, item: T) -> Ack {
        (**self).on_next(item)
    }

    fn on_error(&mut self, error: E) {
        (**self).on_error(error);
    }

    fn on_completed(&mut self) {
        (**self).on_completed();
    }
}

/// An observer built from a single `next_fn` closure.
///
/// Missing error handler reports to the scheduler; missing
/// completion handler is a no-op. `on_next` always returns
/// [`Ack::Continue`]: a bare closure has no back-pressure signal of its own
/// to report.
pub struct NextObserver<FnNext> {
    pub next_fn: FnNext,
    pub scheduler: Arc<dyn Scheduler>,
}

impl<T, E, FnNext> Observer<T, E> for NextObserver<FnNext>
where
    FnNext: FnMut(T),
    E: std::fmt::Debug + Send + Sync + 'static,
{
    fn on_next(&mut self, item: T) -> Ack {
        (self.next_fn)(item);
        Ack::Continue
    }

    fn on_error(&mut self, error: E) {
        self.scheduler.report_failure(&error);
    }

    fn on_completed(&mut self) {}
}

/// An observer built from `next_fn` and `completed_fn`. Missing error
/// handler reports to the scheduler.
pub struct CompletedObserver<FnNext, FnCompleted> {
    pub next_fn: FnNext,
    pub completed_fn: FnCompleted,
    pub scheduler: Arc<dyn Scheduler>,
}

impl<T, E, FnNext, FnCompleted> Observer<T, E> for CompletedObserver<FnNext, FnCompleted>
where
    FnNext: FnMut(T),
    FnCompleted: FnMut(),
    E: std::fmt::Debug + Send + Sync + 'static,
{
    fn on_next(&mut self, item: T) -> Ack {
        (self.next_fn)(item);
        Ack::Continue
    }

    fn on_error(&mut self, error: E) {
        self.scheduler.report_failure(&error);
    }

    fn on_completed(&mut self) {
        (self.completed_fn)();
    }
}

/// An observer built from all three of `next_fn`, `error_fn` and
/// `completed_fn`.
pub struct ErrorObserver<FnNext, FnCompleted, FnError> {
    pub next_fn: FnNext,
    pub completed_fn: FnCompleted,
    pub error_fn: FnError,
}

impl<T, E, FnNext, FnCompleted, FnError> Observer<T, E>
    for ErrorObserver<FnNext, FnCompleted, FnError>
where
    FnNext: FnMut(T),
    FnCompleted: FnMut(),
    FnError: FnMut(E),
{
    fn on_next(&mut self, item: T) -> Ack {
        (self.next_fn)(item);
        Ack::Continue
    }

    fn on_error(&mut self, error: E) {
        (self.error_fn)(error);
    }

    fn on_completed(&mut self) {
        (self.completed_fn)();
    }
}

/// Wraps another observer so that calls to it are serialized by a mutex.
///
/// Used wherever multiple producers may push into one downstream: `++`
/// (concatenation), `safe`, `flat_map`'s merged inner streams. Cloning a
/// `SynchronizedObserver` shares the same lock and the same wrapped
/// observer.
pub struct SynchronizedObserver<O> {
    inner: Arc<Mutex<O>>,
}

impl<O> SynchronizedObserver<O> {
    pub fn new(observer: O) -> SynchronizedObserver<O> {
        SynchronizedObserver {
            inner: Arc::new(Mutex::new(observer)),
        }
    }
}

impl<O> Clone for SynchronizedObserver<O> {
    fn clone(&self) -> Self {
        SynchronizedObserver {
            inner: self.inner.clone(),
        }
    }
}

impl<T, E, O> Observer<T, E> for SynchronizedObserver<O>
where
    O: Observer<T, E>,
{
    fn on_next(&mut self, item: T) -> Ack {
        self.inner.lock().on_next(item)
    }

    fn on_error(&mut self, error: E) {
        self.inner.lock().on_error(error);
    }

    fn on_completed(&mut self) {
        self.inner.lock().on_completed();
    }
}

// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! A synchronous, push-based reactive streams runtime.
//!
//! An [`Observable`] is a cold, passive producer; calling
//! [`Observable::subscribe`] installs an [`Observer`] and starts the data
//! flowing. Every `on_next` call returns an [`Ack`] that the producer uses to
//! decide whether to keep going, and every subscription can be torn down
//! through the [`Cancelable`] it returns.
//!
//! ```
//! use std::sync::atomic::{AtomicI32, Ordering};
//! use std::sync::Arc;
//!
//! use syncflow::{from_traversable, Observable, TracingScheduler};
//!
//! let total = from_traversable::<_, ()>(vec![1, 2, 3, 4, 5])
//!     .map(|x| x * 2)
//!     .filter(|x| *x > 4)
//!     .fold_left(0, |acc, x| acc + x);
//!
//! let sum = Arc::new(AtomicI32::new(0));
//! let sum_clone = sum.clone();
//! total.subscribe_next(Arc::new(TracingScheduler), move |x| {
//!     sum_clone.store(x, Ordering::Relaxed);
//! });
//! assert_eq!(sum.load(Ordering::Relaxed), 24);
//! ```

mod ack;
mod cancelable;
mod observable;
mod observer;
mod operator;
mod scheduler;
mod source;

pub use ack::Ack;
pub use cancelable::{
    AlreadyCanceled, BooleanCancelable, Cancelable, CompositeCancelable, CompositeHandle,
    RefCountCancelable, SingleAssignmentCancelable,
};
pub use observable::{
    create, exists, flatten, for_all, head_or_else, merge, CreateObservable, Observable,
};
pub use observer::{
    CompletedObserver, ErrorObserver, NextObserver, Observer, SynchronizedObserver,
};
pub use operator::{
    Concat, ConcatSubscription, DoOnCompleted, DoWork, DropN, DropWhile, Filter, FlatMap, FoldLeft,
    Map, Merge, PromiseHandle, Safe, Take, TakeWhile, Zip,
};
pub use scheduler::{Scheduler, TracingScheduler};
pub use source::{
    empty, error, from_traversable, never, unit, Empty, ErrorSource, FromTraversable, Never, Unit,
};

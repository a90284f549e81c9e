// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! The scheduler collaborator.
//!
//! The core owns no thread pool and performs no I/O. It only ever needs two
//! things from whatever execution context it is embedded in: somewhere to
//! report a failure that has no more specific handler (the anonymous
//! observer's missing `error_fn`, `as_future`'s fallback), and, for
//! schedulers that support it, the ability to run a task after a delay.
//! Time-based operators are out of scope for this core, so `schedule_once`
//! is part of the interface but is never called by anything in this crate;
//! it is here so downstream operators built outside the core (`sample`,
//! `interval`, ...) have a stable seam to target.

use std::time::Duration;

/// A handle to the embedding execution context.
pub trait Scheduler: Send + Sync {
    /// Reports a failure that has no more specific handler.
    ///
    /// Used by the anonymous observer when no `error_fn` was supplied.
    fn report_failure(&self, cause: &(dyn std::fmt::Debug + Send + Sync));

    /// Runs `task` after `delay`.
    ///
    /// Not exercised by anything in this core (time-based operators are
    /// explicitly out of scope); provided so operators layered on top of
    /// the core have somewhere to ask for delayed execution.
    fn schedule_once(&self, delay: Duration, task: Box<dyn FnOnce() + Send>);
}

/// A [`Scheduler`] that reports failures through `tracing` and runs delayed
/// tasks on a detached `std::thread`.
///
/// This is a minimal, always-available implementation; real embedders are
/// expected to bring their own (backed by a thread pool, an async runtime's
/// executor, or a GUI event loop), the same way `fluxion-runtime` ships one
/// implementation per async runtime behind a feature flag.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingScheduler;

impl Scheduler for TracingScheduler {
    fn report_failure(&self, cause: &(dyn std::fmt::Debug + Send + Sync)) {
        #[cfg(feature = "tracing")]
        tracing::error!(?cause, "unhandled stream failure");
        #[cfg(not(feature = "tracing"))]
        eprintln!("unhandled stream failure: {:?}", cause);
    }

    fn schedule_once(&self, delay: Duration, task: Box<dyn FnOnce() + Send>) {
        std::thread::spawn(move || {
            std::thread::sleep(delay);
            task();
        });
    }
}

// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! The cancelation substrate.
//!
//! Every variant here guarantees its teardown action runs **at most once**,
//! regardless of how many threads race to call `cancel()`. None of them run
//! user callbacks while holding a lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

/// A handle whose `cancel()` releases subscription resources at-most-once.
pub trait Cancelable: Send + Sync {
    /// Releases the resources held by this handle. Idempotent.
    fn cancel(&self);

    /// Whether `cancel()` has run (or is guaranteed to be a no-op) already.
    fn is_canceled(&self) -> bool;
}

impl Cancelable for Box<dyn Cancelable> {
    fn cancel(&self) {
        (**self).cancel();
    }

    fn is_canceled(&self) -> bool {
        (**self).is_canceled()
    }
}

impl<C: Cancelable + ?Sized> Cancelable for std::sync::Arc<C> {
    fn cancel(&self) {
        (**self).cancel();
    }

    fn is_canceled(&self) -> bool {
        (**self).is_canceled()
    }
}

/// The singleton sentinel returned whenever subscription work has already
/// concluded synchronously. `cancel()` is a no-op; `is_canceled()` is always
/// `true`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlreadyCanceled;

impl Cancelable for AlreadyCanceled {
    fn cancel(&self) {}

    fn is_canceled(&self) -> bool {
        true
    }
}

/// A cancelable holding a user-supplied teardown action, invoked at most
/// once.
pub struct BooleanCancelable {
    canceled: AtomicBool,
    action: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl BooleanCancelable {
    /// Wraps `action` so it runs exactly once, the first time `cancel()` is
    /// called.
    pub fn new<F>(action: F) -> BooleanCancelable
    where
        F: FnOnce() + Send + 'static,
    {
        BooleanCancelable {
            canceled: AtomicBool::new(false),
            action: Mutex::new(Some(Box::new(action))),
        }
    }

    /// A boolean cancelable with no teardown action: exists purely to carry
    /// the canceled flag.
    pub fn empty() -> BooleanCancelable {
        BooleanCancelable::new(|| {})
    }
}

impl Cancelable for BooleanCancelable {
    fn cancel(&self) {
        if self.canceled.swap(true, Ordering::AcqRel) {
            return;
        }
        // Take the action out from under the lock, then run it with the
        // lock released: no callback runs while a lock is held.
        let action = self.action.lock().take();
        if let Some(action) = action {
            action();
        }
    }

    fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Acquire)
    }
}

impl<F> From<F> for BooleanCancelable
where
    F: FnOnce() + Send + 'static,
{
    fn from(action: F) -> BooleanCancelable {
        BooleanCancelable::new(action)
    }
}

enum SingleAssignmentState {
    Empty,
    Assigned(Box<dyn Cancelable>),
    CanceledEmpty,
    CanceledAssigned,
}

/// A cancelable that starts empty and may be assigned a child cancelable
/// exactly once.
///
/// If `cancel()` runs before the assignment, the next `assign()` immediately
/// cancels the child being assigned. A second assignment is a programming
/// error and panics.
pub struct SingleAssignmentCancelable {
    state: Mutex<SingleAssignmentState>,
}

impl SingleAssignmentCancelable {
    pub fn new() -> SingleAssignmentCancelable {
        SingleAssignmentCancelable {
            state: Mutex::new(SingleAssignmentState::Empty),
        }
    }

    /// Assigns `child` as the cancelable this handle controls.
    ///
    /// # Panics
    ///
    /// Panics if this handle has already been assigned a child.
    pub fn assign(&self, child: Box<dyn Cancelable>) {
        let mut state = self.state.lock();
        match *state {
            SingleAssignmentState::Empty => {
                *state = SingleAssignmentState::Assigned(child);
            }
            SingleAssignmentState::CanceledEmpty => {
                *state = SingleAssignmentState::CanceledAssigned;
                drop(state);
                child.cancel();
            }
            SingleAssignmentState::Assigned(_) | SingleAssignmentState::CanceledAssigned => {
                drop(state);
                panic!("SingleAssignmentCancelable assigned twice");
            }
        }
    }
}

impl Default for SingleAssignmentCancelable {
    fn default() -> SingleAssignmentCancelable {
        SingleAssignmentCancelable::new()
    }
}

impl Cancelable for SingleAssignmentCancelable {
    fn cancel(&self) {
        let mut state = self.state.lock();
        match std::mem::replace(&mut *state, SingleAssignmentState::CanceledEmpty) {
            SingleAssignmentState::Empty => {}
            SingleAssignmentState::Assigned(child) => {
                *state = SingleAssignmentState::CanceledAssigned;
                drop(state);
                child.cancel();
            }
            already @ (SingleAssignmentState::CanceledEmpty
            | SingleAssignmentState::CanceledAssigned) => {
                *state = already;
            }
        }
    }

    fn is_canceled(&self) -> bool {
        matches!(
            *self.state.lock(),
            SingleAssignmentState::CanceledEmpty | SingleAssignmentState::CanceledAssigned
        )
    }
}

/// An opaque handle returned by [`CompositeCancelable::insert`], used to
/// remove the same child later without canceling it.
///
/// Keying children by a monotonic id rather than by the address of the
/// trait object sidesteps an ABA concern: a child is removed and a new one
/// happens to be allocated at the same address. Two different children
/// never share an id, even if one happens to be allocated at the address a
/// previous, removed child used to occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeHandle(u64);

enum CompositeState {
    Active {
        next_id: u64,
        children: HashMap<u64, Box<dyn Cancelable>>,
    },
    Canceled,
}

/// A cancelable holding a set of children.
///
/// `insert` adds a child (canceling it immediately instead if the composite
/// is already canceled); `remove` drops a child without canceling it, used
/// to release memory once that child's subscription has completed on its
/// own. `cancel()` cancels every current child exactly once.
pub struct CompositeCancelable {
    state: Mutex<CompositeState>,
}

impl CompositeCancelable {
    pub fn new() -> CompositeCancelable {
        CompositeCancelable {
            state: Mutex::new(CompositeState::Active {
                next_id: 0,
                children: HashMap::new(),
            }),
        }
    }

    /// Inserts `child`. If the composite is already canceled, `child` is
    /// canceled immediately instead of being tracked, and the returned
    /// handle does not refer to a live entry.
    pub fn insert(&self, child: Box<dyn Cancelable>) -> CompositeHandle {
        let mut state = self.state.lock();
        match &mut *state {
            CompositeState::Active { next_id, children } => {
                let id = *next_id;
                *next_id += 1;
                children.insert(id, child);
                CompositeHandle(id)
            }
            CompositeState::Canceled => {
                drop(state);
                child.cancel();
                CompositeHandle(u64::MAX)
            }
        }
    }

    /// Removes the child referred to by `handle` without canceling it.
    pub fn remove(&self, handle: CompositeHandle) {
        let mut state = self.state.lock();
        if let CompositeState::Active { children, .. } = &mut *state {
            children.remove(&handle.0);
        }
    }
}

impl Default for CompositeCancelable {
    fn default() -> CompositeCancelable {
        CompositeCancelable::new()
    }
}

impl Cancelable for CompositeCancelable {
    fn cancel(&self) {
        let previous = {
            let mut state = self.state.lock();
            std::mem::replace(&mut *state, CompositeState::Canceled)
        };
        if let CompositeState::Active { children, .. } = previous {
            // Children are canceled with the lock released.
            for (_, child) in children {
                child.cancel();
            }
        }
    }

    fn is_canceled(&self) -> bool {
        matches!(*self.state.lock(), CompositeState::Canceled)
    }
}

/// A cancelable parameterized with a terminal action that fires exactly once:
/// when the ref-count has been `cancel`ed *and* every acquired handle has
/// been released, in whichever order those two conditions are met.
///
/// Used by [`crate::operator::FlatMap`] to know when both the outer stream
/// and every inner subscription it spawned have finished.
pub struct RefCountCancelable {
    count: AtomicUsize,
    main_done: AtomicBool,
    fired: AtomicBool,
    action: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl RefCountCancelable {
    pub fn new<F>(action: F) -> RefCountCancelable
    where
        F: FnOnce() + Send + 'static,
    {
        RefCountCancelable {
            count: AtomicUsize::new(0),
            main_done: AtomicBool::new(false),
            fired: AtomicBool::new(false),
            action: Mutex::new(Some(Box::new(action))),
        }
    }

    /// Increments the live count and returns a handle that decrements it
    /// again on `cancel()`.
    ///
    /// If the terminal action has already fired, returns an
    /// already-canceled handle instead of reviving the ref-count.
    pub fn acquire(self: &std::sync::Arc<Self>) -> Box<dyn Cancelable> {
        if self.fired.load(Ordering::Acquire) {
            return Box::new(AlreadyCanceled);
        }
        self.count.fetch_add(1, Ordering::AcqRel);
        if self.fired.load(Ordering::Acquire) {
            // Lost a race with the terminal action firing between our
            // check and our increment; undo it and hand back a dead handle.
            self.release();
            return Box::new(AlreadyCanceled);
        }
        Box::new(RefCountHandle {
            parent: self.clone(),
            released: AtomicBool::new(false),
        })
    }

    /// Marks the main subscription as done. The terminal action fires now
    /// if every acquired handle has already been released.
    pub fn cancel(self: &std::sync::Arc<Self>) {
        self.main_done.store(true, Ordering::Release);
        self.try_fire();
    }

    pub fn is_canceled(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    fn release(&self) {
        self.count.fetch_sub(1, Ordering::AcqRel);
        self.try_fire();
    }

    fn try_fire(&self) {
        if !self.main_done.load(Ordering::Acquire) {
            return;
        }
        if self.count.load(Ordering::Acquire) != 0 {
            return;
        }
        if self
            .fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            let action = self.action.lock().take();
            if let Some(action) = action {
                action();
            }
        }
    }
}

struct RefCountHandle {
    parent: std::sync::Arc<RefCountCancelable>,
    released: AtomicBool,
}

impl Cancelable for RefCountHandle {
    fn cancel(&self) {
        if !self.released.swap(true, Ordering::AcqRel) {
            self.parent.release();
        }
    }

    fn is_canceled(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }
}


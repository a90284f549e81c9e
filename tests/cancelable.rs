// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Cancelable substrate invariants: idempotent cancel, at-most-once
//! teardown, composite insert/remove semantics, ref-count terminal firing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use syncflow::{
    AlreadyCanceled, BooleanCancelable, Cancelable, CompositeCancelable, RefCountCancelable,
    SingleAssignmentCancelable,
};

#[test]
fn already_canceled_is_a_no_op_sentinel() {
    let c = AlreadyCanceled;
    assert!(c.is_canceled());
    c.cancel();
    c.cancel();
    assert!(c.is_canceled());
}

#[test]
fn boolean_cancelable_runs_action_exactly_once() {
    let runs = Arc::new(AtomicUsize::new(0));
    let r = runs.clone();
    let c = BooleanCancelable::new(move || {
        r.fetch_add(1, Ordering::SeqCst);
    });
    assert!(!c.is_canceled());
    c.cancel();
    c.cancel();
    c.cancel();
    assert!(c.is_canceled());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn single_assignment_cancel_before_assign_cancels_child_immediately() {
    let sa = SingleAssignmentCancelable::new();
    sa.cancel();

    let child_canceled = Arc::new(AtomicUsize::new(0));
    let cc = child_canceled.clone();
    let child = BooleanCancelable::new(move || {
        cc.fetch_add(1, Ordering::SeqCst);
    });
    sa.assign(Box::new(child));

    assert_eq!(child_canceled.load(Ordering::SeqCst), 1);
}

#[test]
#[should_panic(expected = "assigned twice")]
fn single_assignment_twice_is_a_bug() {
    let sa = SingleAssignmentCancelable::new();
    sa.assign(Box::new(BooleanCancelable::empty()));
    sa.assign(Box::new(BooleanCancelable::empty()));
}

#[test]
fn composite_cancels_existing_children_and_future_insertions() {
    let composite = CompositeCancelable::new();
    let canceled_count = Arc::new(AtomicUsize::new(0));

    let make_child = |count: Arc<AtomicUsize>| {
        BooleanCancelable::new(move || {
            count.fetch_add(1, Ordering::SeqCst);
        })
    };

    let handle_a = composite.insert(Box::new(make_child(canceled_count.clone())));
    composite.insert(Box::new(make_child(canceled_count.clone())));

    // Removing without canceling: must not run the teardown action.
    composite.remove(handle_a);
    assert_eq!(canceled_count.load(Ordering::SeqCst), 0);

    composite.cancel();
    assert_eq!(canceled_count.load(Ordering::SeqCst), 1);

    // Inserting into an already-canceled composite cancels immediately.
    composite.insert(Box::new(make_child(canceled_count.clone())));
    assert_eq!(canceled_count.load(Ordering::SeqCst), 2);
}

#[test]
fn refcount_fires_terminal_action_once_when_main_done_and_count_zero() {
    let fired = Arc::new(AtomicUsize::new(0));
    let f = fired.clone();
    let refcount = Arc::new(RefCountCancelable::new(move || {
        f.fetch_add(1, Ordering::SeqCst);
    }));

    let handle_a = refcount.acquire();
    let handle_b = refcount.acquire();

    // Main done, but handles still outstanding: terminal action must not
    // fire yet.
    refcount.cancel();
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    handle_a.cancel();
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    handle_b.cancel();
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // Releasing an already-released handle must not double-fire.
    handle_b.cancel();
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // Acquiring after the terminal action fired yields an already-canceled
    // handle rather than reviving the ref-count.
    let stale = refcount.acquire();
    assert!(stale.is_canceled());
}

#[test]
fn refcount_fires_when_handles_released_before_main_done() {
    let fired = Arc::new(AtomicUsize::new(0));
    let f = fired.clone();
    let refcount = Arc::new(RefCountCancelable::new(move || {
        f.fetch_add(1, Ordering::SeqCst);
    }));

    let handle = refcount.acquire();
    handle.cancel();
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    refcount.cancel();
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! One test per row of the end-to-end scenario table.

use std::sync::{Arc, Mutex};

use syncflow::{from_traversable, never, unit, Observable, TracingScheduler};

fn scheduler() -> Arc<TracingScheduler> {
    Arc::new(TracingScheduler)
}

#[test]
fn scenario_1_map_filter_fold() {
    let total = from_traversable::<_, ()>(vec![1, 2, 3, 4, 5])
        .map(|x| x * 2)
        .filter(|x| *x > 4)
        .fold_left(0, |acc, x| acc + x);

    let received = Arc::new(Mutex::new(Vec::new()));
    let completed = Arc::new(Mutex::new(false));
    let (r, c) = (received.clone(), completed.clone());
    total.subscribe_completed(
        scheduler(),
        move |x| r.lock().unwrap().push(x),
        move || *c.lock().unwrap() = true,
    );

    assert_eq!(&received.lock().unwrap()[..], &[24]);
    assert!(*completed.lock().unwrap());
}

#[test]
fn scenario_2_flat_map() {
    let source =
        from_traversable::<_, ()>(vec![1, 2, 3]).flat_map(|x| from_traversable(vec![x, x]));

    let received = Arc::new(Mutex::new(Vec::new()));
    let completed = Arc::new(Mutex::new(false));
    let (r, c) = (received.clone(), completed.clone());
    source.subscribe_completed(
        scheduler(),
        move |x| r.lock().unwrap().push(x),
        move || *c.lock().unwrap() = true,
    );

    assert_eq!(&received.lock().unwrap()[..], &[1, 1, 2, 2, 3, 3]);
    assert!(*completed.lock().unwrap());
}

#[test]
fn scenario_3_take() {
    let source = from_traversable::<_, ()>((1..=10).collect::<Vec<_>>()).take(3);

    let received = Arc::new(Mutex::new(Vec::new()));
    let completed = Arc::new(Mutex::new(false));
    let (r, c) = (received.clone(), completed.clone());
    source.subscribe_completed(
        scheduler(),
        move |x| r.lock().unwrap().push(x),
        move || *c.lock().unwrap() = true,
    );

    assert_eq!(&received.lock().unwrap()[..], &[1, 2, 3]);
    assert!(*completed.lock().unwrap());
}

#[test]
fn scenario_4_take_while() {
    let source = from_traversable::<_, ()>(vec![1, 2, 3, 4, 5]).take_while(|x| *x < 3);

    let received = Arc::new(Mutex::new(Vec::new()));
    let completed = Arc::new(Mutex::new(false));
    let (r, c) = (received.clone(), completed.clone());
    source.subscribe_completed(
        scheduler(),
        move |x| r.lock().unwrap().push(x),
        move || *c.lock().unwrap() = true,
    );

    assert_eq!(&received.lock().unwrap()[..], &[1, 2]);
    assert!(*completed.lock().unwrap());
}

#[test]
fn scenario_5_zip() {
    let a = from_traversable::<_, ()>(vec![1, 2, 3, 4, 5]);
    let b = from_traversable(vec!["a", "b", "c"]);
    let source = a.zip(b);

    let received = Arc::new(Mutex::new(Vec::new()));
    let completed = Arc::new(Mutex::new(false));
    let (r, c) = (received.clone(), completed.clone());
    source.subscribe_completed(
        scheduler(),
        move |x| r.lock().unwrap().push(x),
        move || *c.lock().unwrap() = true,
    );

    assert_eq!(
        &received.lock().unwrap()[..],
        &[(1, "a"), (2, "b"), (3, "c")]
    );
    assert!(*completed.lock().unwrap());
}

#[derive(Debug, PartialEq, Eq)]
struct Boom;

#[test]
fn scenario_6_create_fails_before_downstream() {
    let observable = syncflow::create(|observer: &mut dyn syncflow::Observer<u8, Boom>| {
        let _ = observer;
        Err::<Box<dyn syncflow::Cancelable>, _>(Boom)
    });

    let received_value = Arc::new(Mutex::new(false));
    let received_error = Arc::new(Mutex::new(None));
    let (rv, re) = (received_value.clone(), received_error.clone());
    observable.subscribe_error(
        move |_: u8| *rv.lock().unwrap() = true,
        || panic!("should not complete"),
        move |e| *re.lock().unwrap() = Some(e),
    );

    assert!(!*received_value.lock().unwrap());
    assert_eq!(*received_error.lock().unwrap(), Some(Boom));
}

#[test]
fn scenario_6b_map_propagates_stream_like_error_via_create() {
    // `unit(10).map(|_| panic)` is not representable in Rust's infallible
    // closure model (a map closure cannot return a stream error; see
    // DESIGN.md). The equivalent scenario here is the one representable
    // kind of "user code fails before downstream is touched": `create`'s
    // fallible `subscribe_fn`.
    let observable = syncflow::create(|_observer: &mut dyn syncflow::Observer<u8, &'static str>| {
        Err::<Box<dyn syncflow::Cancelable>, _>("epic fail")
    });

    let next_called = Arc::new(Mutex::new(false));
    let error = Arc::new(Mutex::new(None));
    let (n, e) = (next_called.clone(), error.clone());
    observable.subscribe_error(
        move |_| *n.lock().unwrap() = true,
        || panic!("unit followed by a failing create should not complete"),
        move |err| *e.lock().unwrap() = Some(err),
    );

    assert!(!*next_called.lock().unwrap());
    assert_eq!(*error.lock().unwrap(), Some("epic fail"));

    // `unit` itself never fails; exercise it directly alongside the create
    // case above so both halves of scenario 6 are covered.
    let ten = Arc::new(Mutex::new(None));
    let t = ten.clone();
    unit::<u8, ()>(10).subscribe_next(scheduler(), move |x| *t.lock().unwrap() = Some(x));
    assert_eq!(*ten.lock().unwrap(), Some(10));
}

#[test]
fn scenario_7_never_no_calls_and_idempotent_cancel() {
    use syncflow::Cancelable;

    let observable = never::<u8, ()>();
    let called = Arc::new(Mutex::new(false));
    let c = called.clone();
    let subscription = observable.subscribe_next(scheduler(), move |_| *c.lock().unwrap() = true);

    assert!(!*called.lock().unwrap());
    subscription.cancel();
    subscription.cancel();
    assert!(subscription.is_canceled());
    assert!(!*called.lock().unwrap());
}

#[test]
fn scenario_8_concat() {
    let source = from_traversable::<_, ()>(vec![1, 2]).concat(from_traversable(vec![3, 4]));

    let received = Arc::new(Mutex::new(Vec::new()));
    let completed = Arc::new(Mutex::new(0));
    let (r, c) = (received.clone(), completed.clone());
    source.subscribe_completed(
        scheduler(),
        move |x| r.lock().unwrap().push(x),
        move || *c.lock().unwrap() += 1,
    );

    assert_eq!(&received.lock().unwrap()[..], &[1, 2, 3, 4]);
    assert_eq!(*completed.lock().unwrap(), 1);
}

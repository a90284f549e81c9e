// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Per-operator invariants plus multi-thread stress tests for the CAS-loop
//! and locked operators, driven by real OS threads rather than a single
//! sequential producer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use syncflow::{from_traversable, unit, BooleanCancelable, Observable, Observer, TracingScheduler};

fn scheduler() -> Arc<TracingScheduler> {
    Arc::new(TracingScheduler)
}

/// A source that hands its items to a real, independently scheduled OS
/// thread instead of pushing them from the calling thread. Used to drive
/// genuinely concurrent `on_next` calls into a downstream shared by more
/// than one such source (e.g. through `flat_map` or `zip`).
struct ThreadSource<T> {
    items: Vec<T>,
}

impl<T: Clone + Send + 'static> Observable for ThreadSource<T> {
    type Item = T;
    type Error = ();
    type Subscription = BooleanCancelable;

    fn subscribe<O>(&self, mut observer: O) -> BooleanCancelable
    where
        O: Observer<T, ()> + Send + 'static,
    {
        let items = self.items.clone();
        std::thread::spawn(move || {
            for item in items {
                if observer.on_next(item).is_stop() {
                    return;
                }
            }
            observer.on_completed();
        });
        BooleanCancelable::empty()
    }
}

fn wait_until(mut predicate: impl FnMut() -> bool) {
    for _ in 0..2000 {
        if predicate() {
            return;
        }
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
    panic!("condition did not become true in time");
}

#[test]
fn take_n_forwards_exactly_n_items_and_completes_once() {
    let source = from_traversable::<_, ()>((0..20).collect::<Vec<_>>()).take(5);

    let count = Arc::new(AtomicUsize::new(0));
    let completed = Arc::new(AtomicUsize::new(0));
    let (c, d) = (count.clone(), completed.clone());
    source.subscribe_completed(
        scheduler(),
        move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        },
        move || {
            d.fetch_add(1, Ordering::SeqCst);
        },
    );

    assert_eq!(count.load(Ordering::SeqCst), 5);
    assert_eq!(completed.load(Ordering::SeqCst), 1);
}

#[test]
fn drop_n_forwards_every_item_after_the_first_n() {
    let source = from_traversable::<_, ()>((0..10).collect::<Vec<_>>()).drop(4);

    let received = Arc::new(Mutex::new(Vec::new()));
    let r = received.clone();
    source.subscribe_next(scheduler(), move |x| r.lock().unwrap().push(x));

    assert_eq!(&received.lock().unwrap()[..], &[4, 5, 6, 7, 8, 9]);
}

#[test]
fn fold_left_emits_a_single_final_value_on_completion() {
    let received = Arc::new(Mutex::new(Vec::new()));
    let completed = Arc::new(Mutex::new(false));
    let (r, c) = (received.clone(), completed.clone());
    from_traversable::<_, ()>(vec![1, 2, 3, 4])
        .fold_left(1, |acc, x| acc * x)
        .subscribe_completed(
            scheduler(),
            move |x| r.lock().unwrap().push(x),
            move || *c.lock().unwrap() = true,
        );

    assert_eq!(&received.lock().unwrap()[..], &[24]);
    assert!(*completed.lock().unwrap());
}

#[test]
fn map_then_filter_agrees_with_filter_then_map_on_the_composed_predicate() {
    let input = (0..30).collect::<Vec<_>>();

    let left = Arc::new(Mutex::new(Vec::new()));
    let l = left.clone();
    from_traversable::<_, ()>(input.clone())
        .map(|x| x * 3)
        .filter(|x| x % 2 == 0)
        .subscribe_next(scheduler(), move |x| l.lock().unwrap().push(x));

    let right = Arc::new(Mutex::new(Vec::new()));
    let r = right.clone();
    from_traversable::<_, ()>(input)
        .filter(|x| (x * 3) % 2 == 0)
        .map(|x| x * 3)
        .subscribe_next(scheduler(), move |x| r.lock().unwrap().push(x));

    assert_eq!(&left.lock().unwrap()[..], &right.lock().unwrap()[..]);
}

#[test]
fn zip_count_is_the_minimum_of_both_sides() {
    let a = from_traversable::<_, ()>((0..7).collect::<Vec<_>>());
    let b = from_traversable(vec!["a", "b", "c"]);

    let received = Arc::new(Mutex::new(Vec::new()));
    let completed = Arc::new(Mutex::new(false));
    let (r, c) = (received.clone(), completed.clone());
    a.zip(b).subscribe_completed(
        scheduler(),
        move |pair| r.lock().unwrap().push(pair),
        move || *c.lock().unwrap() = true,
    );

    assert_eq!(received.lock().unwrap().len(), 3);
    assert!(*completed.lock().unwrap());
}

#[test]
fn flat_map_completes_only_once_outer_and_every_inner_are_done() {
    let source = from_traversable::<_, ()>(vec![1, 2, 3]).flat_map(|x| unit::<u8, ()>(x));

    let received = Arc::new(Mutex::new(Vec::new()));
    let completed = Arc::new(AtomicUsize::new(0));
    let (r, c) = (received.clone(), completed.clone());
    source.subscribe_completed(
        scheduler(),
        move |x| r.lock().unwrap().push(x),
        move || {
            c.fetch_add(1, Ordering::SeqCst);
        },
    );

    let mut got = received.lock().unwrap().clone();
    got.sort();
    assert_eq!(got, vec![1, 2, 3]);
    assert_eq!(completed.load(Ordering::SeqCst), 1);
}

#[test]
fn take_under_real_concurrent_producers_forwards_exactly_n_and_completes_once() {
    // Four independent OS threads, fanned in through `flat_map`, race to
    // push into the single `take(50)` downstream.
    let source = from_traversable::<_, ()>(vec![0u8, 1, 2, 3])
        .flat_map(|id| ThreadSource {
            items: vec![id; 100],
        })
        .take(50);

    let count = Arc::new(AtomicUsize::new(0));
    let completed = Arc::new(AtomicUsize::new(0));
    let (c, d) = (count.clone(), completed.clone());
    source.subscribe_completed(
        scheduler(),
        move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        },
        move || {
            d.fetch_add(1, Ordering::SeqCst);
        },
    );

    wait_until(|| completed.load(Ordering::SeqCst) > 0);
    assert_eq!(count.load(Ordering::SeqCst), 50);
    assert_eq!(completed.load(Ordering::SeqCst), 1);
}

#[test]
fn drop_under_real_concurrent_producers_drops_exactly_n_total() {
    let source = from_traversable::<_, ()>(vec![0u8, 1, 2, 3])
        .flat_map(|id| ThreadSource {
            items: vec![id; 25],
        })
        .drop(40);

    let count = Arc::new(AtomicUsize::new(0));
    let completed = Arc::new(AtomicUsize::new(0));
    let (c, d) = (count.clone(), completed.clone());
    source.subscribe_completed(
        scheduler(),
        move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        },
        move || {
            d.fetch_add(1, Ordering::SeqCst);
        },
    );

    wait_until(|| completed.load(Ordering::SeqCst) > 0);
    // 4 * 25 = 100 items total, 40 dropped, 60 forwarded.
    assert_eq!(count.load(Ordering::SeqCst), 60);
    assert_eq!(completed.load(Ordering::SeqCst), 1);
}

#[test]
fn take_while_under_real_concurrent_producers_completes_exactly_once() {
    let source = from_traversable::<_, ()>(vec![0u8, 1, 2, 3])
        .flat_map(|id| ThreadSource {
            items: vec![id; 50],
        })
        .take_while(|_| true);

    let count = Arc::new(AtomicUsize::new(0));
    let completed = Arc::new(AtomicUsize::new(0));
    let (c, d) = (count.clone(), completed.clone());
    source.subscribe_completed(
        scheduler(),
        move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        },
        move || {
            d.fetch_add(1, Ordering::SeqCst);
        },
    );

    wait_until(|| completed.load(Ordering::SeqCst) > 0);
    assert_eq!(count.load(Ordering::SeqCst), 200);
    assert_eq!(completed.load(Ordering::SeqCst), 1);
}

#[test]
fn drop_while_under_real_concurrent_producers_stabilizes_to_forwarding_everything() {
    let source = from_traversable::<_, ()>(vec![0u8, 1, 2, 3])
        .flat_map(|id| ThreadSource {
            items: vec![id; 50],
        })
        .drop_while(|_| false);

    let count = Arc::new(AtomicUsize::new(0));
    let completed = Arc::new(AtomicUsize::new(0));
    let (c, d) = (count.clone(), completed.clone());
    source.subscribe_completed(
        scheduler(),
        move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        },
        move || {
            d.fetch_add(1, Ordering::SeqCst);
        },
    );

    wait_until(|| completed.load(Ordering::SeqCst) > 0);
    assert_eq!(count.load(Ordering::SeqCst), 200);
    assert_eq!(completed.load(Ordering::SeqCst), 1);
}

#[test]
fn zip_under_real_concurrent_producers_pairs_items_in_arrival_order_per_side() {
    // Both sides run on their own real OS thread; the zip mutex is
    // genuinely contended, not just sequentially entered.
    let a = ThreadSource {
        items: (0..200).collect::<Vec<u32>>(),
    };
    let b = ThreadSource {
        items: (0..80).collect::<Vec<u32>>(),
    };

    let received = Arc::new(Mutex::new(Vec::new()));
    let completed = Arc::new(AtomicUsize::new(0));
    let (r, c) = (received.clone(), completed.clone());
    a.zip(b).subscribe_completed(
        scheduler(),
        move |pair| r.lock().unwrap().push(pair),
        move || {
            c.fetch_add(1, Ordering::SeqCst);
        },
    );

    wait_until(|| completed.load(Ordering::SeqCst) > 0);
    let received = received.lock().unwrap();
    assert_eq!(received.len(), 80);
    assert_eq!(completed.load(Ordering::SeqCst), 1);
    for (i, (a, b)) in received.iter().enumerate() {
        assert_eq!(*a, i as u32);
        assert_eq!(*b, i as u32);
    }
}

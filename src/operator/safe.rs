// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! `safe`: forces calls into the downstream observer through a mutex, for
//! sources that may deliver from more than one thread.

use crate::observable::Observable;
use crate::observer::{Observer, SynchronizedObserver};

/// The observable returned by [`Observable::safe`](crate::Observable::safe).
pub struct Safe<Source> {
    source: Source,
}

impl<Source> Safe<Source> {
    pub(crate) fn new(source: Source) -> Safe<Source> {
        Safe { source }
    }
}

impl<Source> Observable for Safe<Source>
where
    Source: Observable,
{
    type Item = Source::Item;
    type Error = Source::Error;
    type Subscription = Source::Subscription;

    fn subscribe<O>(&self, observer: O) -> Self::Subscription
    where
        O: Observer<Self::Item, Self::Error> + Send + 'static,
    {
        self.source.subscribe(SynchronizedObserver::new(observer))
    }
}

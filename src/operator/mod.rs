// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! The operator set, one module per operator.

mod concat;
mod derived;
mod do_on_completed;
mod do_work;
mod drop;
mod drop_while;
mod filter;
mod flat_map;
mod fold_left;
mod map;
mod safe;
mod take;
mod take_while;
mod zip;

pub use concat::{Concat, ConcatSubscription};
pub use derived::{as_future, Merge, PromiseHandle};
pub use do_on_completed::DoOnCompleted;
pub use do_work::DoWork;
pub use drop::DropN;
pub use drop_while::DropWhile;
pub use filter::Filter;
pub use flat_map::FlatMap;
pub use fold_left::FoldLeft;
pub use map::Map;
pub use safe::Safe;
pub use take::Take;
pub use take_while::TakeWhile;
pub use zip::Zip;

// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Source factories.

mod empty;
mod error;
mod from_traversable;
mod never;
mod unit;

pub use empty::{empty, Empty};
pub use error::{error, ErrorSource};
pub use from_traversable::{from_traversable, FromTraversable};
pub use never::{never, Never};
pub use unit::{unit, Unit};

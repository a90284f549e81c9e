// Rx -- Reactive programming for Rust
// Copyright 2016 Ruud van Asseldonk
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

/// The reply an [`Observer`](crate::Observer) gives to every `on_next` call.
///
/// `Ack` is the back-pressure signal of the whole system: a producer must
/// check the value it gets back from `on_next` and stop producing (without
/// ever calling `on_completed`) once it sees [`Stop`](Ack::Stop).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ack {
    /// The downstream accepted the item; keep producing.
    Continue,
    /// The downstream is done; stop producing and do not call any further
    /// method on the observer that returned this ack.
    Stop,
}

impl Ack {
    /// Whether the producer should keep sending items.
    #[must_use]
    pub fn is_continue(self) -> bool {
        self == Ack::Continue
    }

    /// Whether the producer must stop.
    #[must_use]
    pub fn is_stop(self) -> bool {
        self == Ack::Stop
    }

    /// Combines two acks from the same logical step: `Stop` wins.
    #[must_use]
    pub fn and(self, other: Ack) -> Ack {
        match (self, other) {
            (Ack::Continue, Ack::Continue) => Ack::Continue,
            _ => Ack::Stop,
        }
    }
}

impl From<bool> for Ack {
    /// `true` maps to `Continue`, `false` maps to `Stop`.
    fn from(keep_going: bool) -> Ack {
        if keep_going { Ack::Continue } else { Ack::Stop }
    }
}

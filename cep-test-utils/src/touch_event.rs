// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Touch events, the typical input of a "began followed by ended" detector.

use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TouchKind {
    Began,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TouchEvent {
    /// Milliseconds since an arbitrary origin
    pub timestamp: u64,
    pub kind: TouchKind,
}

impl TouchEvent {
    #[must_use]
    pub const fn new(kind: TouchKind, timestamp: u64) -> Self {
        Self { timestamp, kind }
    }

    pub fn is(&self, kind: TouchKind) -> bool {
        self.kind == kind
    }
}

impl Display for TouchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Touch[{:?}@{}]", self.kind, self.timestamp)
    }
}

pub fn touch_began(timestamp: u64) -> TouchEvent {
    TouchEvent::new(TouchKind::Began, timestamp)
}

pub fn touch_ended(timestamp: u64) -> TouchEvent {
    TouchEvent::new(TouchKind::Ended, timestamp)
}

/// `true` for a `Began` immediately followed by an `Ended`.
pub fn is_tap(first: &TouchEvent, second: &TouchEvent) -> bool {
    first.is(TouchKind::Began) && second.is(TouchKind::Ended)
}

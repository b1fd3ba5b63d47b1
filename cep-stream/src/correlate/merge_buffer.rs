// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Origin-tagged value of a correlated merge.
///
/// Carries the values of two differently-typed streams through one merged stream
/// while remembering which source produced each of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tagged<A, B> {
    /// Emitted by the first (receiver) stream
    First(A),
    /// Emitted by the second (argument) stream
    Second(B),
}

const WINDOW: usize = 2;

/// Non-overlapping window of two tagged values.
///
/// Every second push closes the window. A pair comes out only when the window
/// holds exactly one value of each origin; either way the window starts over.
#[derive(Debug)]
pub struct MergeBuffer<A, B> {
    window: Vec<Tagged<A, B>>,
}

impl<A, B> MergeBuffer<A, B> {
    pub fn new() -> Self {
        Self {
            window: Vec::with_capacity(WINDOW),
        }
    }

    pub fn push(&mut self, tagged: Tagged<A, B>) -> Option<(A, B)> {
        self.window.push(tagged);
        if self.window.len() < WINDOW {
            return None;
        }

        let mut first = None;
        let mut second = None;
        for tagged in self.window.drain(..) {
            match tagged {
                Tagged::First(a) => {
                    first.get_or_insert(a);
                }
                Tagged::Second(b) => {
                    second.get_or_insert(b);
                }
            }
        }

        match (first, second) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => {
                trace!("correlate: dropping window without one value of each origin");
                None
            }
        }
    }
}

impl<A, B> Default for MergeBuffer<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{MergeBuffer, Tagged};

    #[test]
    fn releases_pair_regardless_of_arrival_order() {
        let mut buffer = MergeBuffer::<i32, &str>::new();

        assert_eq!(buffer.push(Tagged::Second("b1")), None);
        assert_eq!(buffer.push(Tagged::First(1)), Some((1, "b1")));

        // The window starts over after a pair
        assert_eq!(buffer.push(Tagged::First(2)), None);
        assert_eq!(buffer.push(Tagged::Second("b2")), Some((2, "b2")));
    }

    #[test]
    fn same_origin_window_is_dropped_and_reset() {
        let mut buffer = MergeBuffer::<i32, &str>::new();

        assert_eq!(buffer.push(Tagged::First(1)), None);
        assert_eq!(buffer.push(Tagged::First(2)), None);

        // Windows never overlap: b1 starts a fresh window instead of pairing with 2
        assert_eq!(buffer.push(Tagged::Second("b1")), None);
        assert_eq!(buffer.push(Tagged::First(3)), Some((3, "b1")));
    }
}

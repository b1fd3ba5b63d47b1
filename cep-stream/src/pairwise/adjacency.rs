// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Operator-local state of [`pairwise`](super::PairwiseExt::pairwise).
///
/// Holds at most one pending element. The first element is held back and only
/// becomes part of a pair once a second element arrives.
#[derive(Debug, Clone)]
pub struct Adjacency<T> {
    previous: Option<T>,
}

impl<T: Clone> Adjacency<T> {
    pub const fn new() -> Self {
        Self { previous: None }
    }

    /// Feeds the next element and returns the `(previous, current)` pair, if any.
    pub fn advance(&mut self, current: T) -> Option<(T, T)> {
        self.previous
            .replace(current.clone())
            .map(|previous| (previous, current))
    }
}

impl<T: Clone> Default for Adjacency<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Adjacency;

    #[test]
    fn first_element_is_held_back() {
        let mut adjacency = Adjacency::new();

        assert_eq!(adjacency.advance(1), None);
        assert_eq!(adjacency.advance(2), Some((1, 2)));
    }

    #[test]
    fn each_element_pairs_with_its_predecessor() {
        let mut adjacency = Adjacency::new();

        let pairs: Vec<_> = [1, 2, 3, 4]
            .into_iter()
            .filter_map(|x| adjacency.advance(x))
            .collect();

        assert_eq!(pairs, vec![(1, 2), (2, 3), (3, 4)]);
    }
}

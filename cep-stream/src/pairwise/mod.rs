// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Adjacency operators: [`pairwise`](PairwiseExt::pairwise) and
//! [`followed_by`](PairwiseExt::followed_by).
//!
//! # Behavior
//!
//! - First value: held back, nothing is emitted
//! - Every later value: emits `(previous, current)`, then becomes the new previous
//! - Failure: forwarded unchanged, then the output stream ends
//! - Completion: passes through; fewer than two values produce no pair
//!
//! # Examples
//!
//! ```rust
//! use cep_core::StreamItem;
//! use cep_stream::PairwiseExt;
//! use futures::{stream, StreamExt};
//!
//! # async fn example() {
//! let source = stream::iter([1, 2, 3]).map(StreamItem::<i32>::Value);
//!
//! let pairs: Vec<_> = source.pairwise().filter_map(|item| async move { item.ok() }).collect().await;
//!
//! assert_eq!(pairs, vec![(1, 2), (2, 3)]);
//! # }
//! ```
//!
//! Detecting an ordered pair of events:
//!
//! ```rust
//! use cep_core::StreamItem;
//! use cep_stream::PairwiseExt;
//! use futures::{stream, StreamExt};
//!
//! # async fn example() {
//! let touches = stream::iter(["began", "ended", "began", "began", "ended"])
//!     .map(StreamItem::<&str>::Value);
//!
//! let taps: Vec<_> = touches
//!     .followed_by(|a, b| *a == "began" && *b == "ended")
//!     .collect()
//!     .await;
//!
//! assert_eq!(taps.len(), 2);
//! # }
//! ```

mod adjacency;

pub use adjacency::Adjacency;

use crate::terminate_on_error::TerminateOnError;
use cep_core::StreamItem;
use futures::future::ready;
use futures::{Stream, StreamExt};

/// Extension trait providing the adjacency operators.
pub trait PairwiseExt<T, E>: Stream<Item = StreamItem<T, E>> + Sized
where
    T: Clone + Send + 'static,
    E: Send + 'static,
{
    /// Emits every element paired with its predecessor.
    ///
    /// See the [module-level documentation](crate::pairwise) for details.
    fn pairwise(self) -> impl Stream<Item = StreamItem<(T, T), E>> + Send + 'static;

    /// Emits only the adjacent pairs `(a, b)` for which `predicate(&a, &b)` holds.
    ///
    /// Equivalent to `pairwise()` followed by a filter; failures are never filtered out.
    fn followed_by<P>(self, predicate: P) -> impl Stream<Item = StreamItem<(T, T), E>> + Send + 'static
    where
        P: FnMut(&T, &T) -> bool + Send + 'static;
}

impl<S, T, E> PairwiseExt<T, E> for S
where
    S: Stream<Item = StreamItem<T, E>> + Send + 'static,
    T: Clone + Send + 'static,
    E: Send + 'static,
{
    fn pairwise(self) -> impl Stream<Item = StreamItem<(T, T), E>> + Send + 'static {
        TerminateOnError::new(self)
            .scan(
                Adjacency::new(),
                |adjacency: &mut Adjacency<T>, item: StreamItem<T, E>| {
                    ready(Some(match item {
                        StreamItem::Value(current) => {
                            adjacency.advance(current).map(StreamItem::Value)
                        }
                        StreamItem::Error(e) => Some(StreamItem::Error(e)),
                    }))
                },
            )
            .filter_map(ready)
    }

    fn followed_by<P>(self, mut predicate: P) -> impl Stream<Item = StreamItem<(T, T), E>> + Send + 'static
    where
        P: FnMut(&T, &T) -> bool + Send + 'static,
    {
        self.pairwise().filter(move |item| {
            ready(match item {
                StreamItem::Value((previous, current)) => predicate(previous, current),
                StreamItem::Error(_) => true,
            })
        })
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cold, re-playable stream description.
//!
//! A [`Publisher`] does not hold a running stream: it holds the recipe that
//! produces one. Every call to [`stream`](Publisher::stream) starts a fresh
//! production, so operators attached to a publisher get fresh operator state
//! for every subscription and the source publisher itself is never changed.
//!
//! # Examples
//!
//! ```rust
//! use cep_stream::Publisher;
//! use futures::StreamExt;
//!
//! # async fn example() {
//! let taps = Publisher::<&str>::from_values(vec!["began", "ended", "began", "ended"])
//!     .followed_by(|a, b| *a == "began" && *b == "ended");
//!
//! // Each subscription replays the source from scratch
//! for handle in taps.duplicate(2) {
//!     assert_eq!(handle.stream().count().await, 2);
//! }
//! # }
//! ```

use crate::collect_all::CollectAllExt;
use crate::correlate::CorrelateExt;
use crate::pairwise::PairwiseExt;
use cep_core::{CepError, StreamItem};
use futures::future::ready;
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use std::fmt;
use std::sync::Arc;

type Factory<T, E> = dyn Fn() -> BoxStream<'static, StreamItem<T, E>> + Send + Sync;

/// Cold stream of `T` values failing with `E`.
///
/// Cloning is cheap and yields another handle to the same description.
pub struct Publisher<T, E = CepError> {
    factory: Arc<Factory<T, E>>,
}

impl<T, E> Clone for Publisher<T, E> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T, E> fmt::Debug for Publisher<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher").finish_non_exhaustive()
    }
}

impl<T, E> Publisher<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Creates a publisher from a factory invoked once per subscription.
    pub fn new<F, S>(factory: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Stream<Item = StreamItem<T, E>> + Send + 'static,
    {
        Self {
            factory: Arc::new(move || factory().boxed()),
        }
    }

    /// Replays `values`, then completes.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
        I::IntoIter: Send + 'static,
    {
        Self::new(move || stream::iter(values.clone()).map(StreamItem::Value))
    }

    /// Completes without emitting.
    pub fn empty() -> Self {
        Self::new(stream::empty)
    }

    /// Fails with `error` without emitting.
    pub fn failing(error: E) -> Self
    where
        E: Clone + Sync,
    {
        Self::new(move || stream::once(ready(StreamItem::Error(error.clone()))))
    }

    /// Starts a new production of this publisher.
    pub fn stream(&self) -> BoxStream<'static, StreamItem<T, E>> {
        (self.factory)()
    }

    /// Returns `count` handles to this same description.
    ///
    /// The handles share nothing at runtime: subscribing to each one re-runs the
    /// production from scratch. `count == 0` yields an empty vector.
    pub fn duplicate(&self, count: usize) -> Vec<Self> {
        (0..count).map(|_| self.clone()).collect()
    }

    pub fn map<U, F>(&self, f: F) -> Publisher<U, E>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        Publisher::new(move || {
            let f = Arc::clone(&f);
            source.stream().map(move |item| item.map(|value| f(value)))
        })
    }

    /// Keeps the values matching `predicate`; failures always pass.
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let source = self.clone();
        let predicate = Arc::new(predicate);
        Self::new(move || {
            let predicate = Arc::clone(&predicate);
            source.stream().filter(move |item| {
                ready(match item {
                    StreamItem::Value(value) => predicate(value),
                    StreamItem::Error(_) => true,
                })
            })
        })
    }

    /// See [`PairwiseExt::pairwise`].
    pub fn pairwise(&self) -> Publisher<(T, T), E>
    where
        T: Clone,
    {
        let source = self.clone();
        Publisher::new(move || source.stream().pairwise())
    }

    /// See [`PairwiseExt::followed_by`].
    pub fn followed_by<P>(&self, predicate: P) -> Publisher<(T, T), E>
    where
        T: Clone,
        P: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        let source = self.clone();
        let predicate = Arc::new(predicate);
        Publisher::new(move || {
            let predicate = Arc::clone(&predicate);
            source
                .stream()
                .followed_by(move |previous, current| predicate(previous, current))
        })
    }

    /// See [`CorrelateExt::correlate_with`].
    pub fn correlate_with<U>(&self, other: &Publisher<U, E>) -> Publisher<(T, U), E>
    where
        U: Send + 'static,
    {
        let first = self.clone();
        let second = other.clone();
        Publisher::new(move || first.stream().correlate_with(second.stream()))
    }

    /// See [`CollectAllExt::collect_all`].
    pub fn collect_all(&self) -> Publisher<Vec<T>, E> {
        let source = self.clone();
        Publisher::new(move || source.stream().collect_all())
    }
}

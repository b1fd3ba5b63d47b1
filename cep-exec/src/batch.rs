// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Collect-all-then-deliver-once sinks: [`group_on_main`](BatchExt::group_on_main)
//! and [`order_on_main`](BatchExt::order_on_main).
//!
//! Both buffer the whole stream with [`collect_all`](cep_stream::CollectAllExt::collect_all)
//! and hand the snapshot to the single-shot sink
//! ([`subscribe_once_on_main`](crate::SubscribeOnceExt::subscribe_once_on_main)):
//! the callback runs exactly once after a successful completion, and never after a
//! failure. The snapshot is grouped or sorted on the main context, right before
//! the callback.

use crate::main_context::MainContext;
use crate::subscribe_once::SubscribeOnceExt;
use crate::subscription::Subscription;
use cep_core::StreamItem;
use cep_stream::batch::{group_by_key, sort_stable_by};
use cep_stream::CollectAllExt;
use futures::Stream;
use std::fmt::Debug;
use std::hash::Hash;

/// Extension trait providing the grouping and ordering sinks.
pub trait BatchExt<T, E>: Stream<Item = StreamItem<T, E>> + Sized {
    /// Delivers the whole stream partitioned by `key_of`, once, on completion.
    ///
    /// Groups come out in unspecified order; inside a group the emission order is
    /// kept. If `key_of` fails for any element the grouping is abandoned and
    /// `on_groups` is never called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cep_core::StreamItem;
    /// use cep_exec::{BatchExt, MainContext};
    /// use futures::{stream, StreamExt};
    /// use std::convert::Infallible;
    /// use std::sync::mpsc::channel;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let context = MainContext::new().unwrap();
    /// let (tx, rx) = channel();
    ///
    /// stream::iter([1, 2, 3, 4])
    ///     .map(StreamItem::<i32>::Value)
    ///     .group_on_main(&context, |x| Ok::<_, Infallible>(x % 2), move |groups| {
    ///         tx.send(groups).unwrap();
    ///     })
    ///     .finished()
    ///     .await;
    ///
    /// let mut groups = rx.recv().unwrap();
    /// groups.sort();
    /// assert_eq!(groups, vec![vec![1, 3], vec![2, 4]]);
    /// # }
    /// ```
    fn group_on_main<K, Er, KF, F>(self, context: &MainContext, key_of: KF, on_groups: F) -> Subscription
    where
        K: Eq + Hash,
        Er: Debug,
        KF: FnMut(&T) -> Result<K, Er> + Send + 'static,
        F: FnOnce(Vec<Vec<T>>) + Send + 'static;

    /// Delivers the whole stream sorted by `by`, once, on completion.
    ///
    /// `by(x, y)` returns `true` when `x` must come before `y`. The sort is stable.
    fn order_on_main<P, F>(self, context: &MainContext, by: P, on_sorted: F) -> Subscription
    where
        P: FnMut(&T, &T) -> bool + Send + 'static,
        F: FnOnce(Vec<T>) + Send + 'static;
}

impl<S, T, E> BatchExt<T, E> for S
where
    S: Stream<Item = StreamItem<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Debug + Send + 'static,
{
    fn group_on_main<K, Er, KF, F>(self, context: &MainContext, key_of: KF, on_groups: F) -> Subscription
    where
        K: Eq + Hash,
        Er: Debug,
        KF: FnMut(&T) -> Result<K, Er> + Send + 'static,
        F: FnOnce(Vec<Vec<T>>) + Send + 'static,
    {
        self.collect_all()
            .subscribe_once_on_main(context, move |batch| match group_by_key(batch, key_of) {
                Ok(groups) => on_groups(groups),
                Err(e) => warn!("group: key extraction failed, no groups delivered: {e:?}"),
            })
    }

    fn order_on_main<P, F>(self, context: &MainContext, by: P, on_sorted: F) -> Subscription
    where
        P: FnMut(&T, &T) -> bool + Send + 'static,
        F: FnOnce(Vec<T>) + Send + 'static,
    {
        self.collect_all()
            .subscribe_once_on_main(context, move |batch| on_sorted(sort_stable_by(batch, by)))
    }
}

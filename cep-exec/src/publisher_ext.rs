// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Terminal operations on a [`Publisher`].
//!
//! Each call starts a new production of the publisher, so subscribing twice to
//! the same publisher replays it twice.

use crate::batch::BatchExt;
use crate::main_context::MainContext;
use crate::merge::MergeOnMainExt;
use crate::subscribe_main::SubscribeMainExt;
use crate::subscribe_once::SubscribeOnceExt;
use crate::subscription::Subscription;
use cep_stream::Publisher;
use std::fmt::Debug;
use std::hash::Hash;

/// Extension trait wiring a [`Publisher`] to callbacks on a [`MainContext`].
///
/// # Examples
///
/// ```rust
/// use cep_exec::{MainContext, PublisherExt};
/// use cep_stream::Publisher;
/// use std::sync::mpsc::channel;
///
/// # #[tokio::main]
/// # async fn main() {
/// let context = MainContext::new().unwrap();
/// let (tx, rx) = channel();
///
/// Publisher::<i32>::from_values(vec![3, 1, 2])
///     .order(&context, |a, b| a < b, move |sorted| tx.send(sorted).unwrap())
///     .finished()
///     .await;
///
/// assert_eq!(rx.recv().unwrap(), vec![1, 2, 3]);
/// # }
/// ```
pub trait PublisherExt<T, E> {
    /// See [`SubscribeMainExt::subscribe_on_main`].
    fn subscribe<F>(&self, context: &MainContext, on_value: F) -> Subscription
    where
        F: FnMut(T) + Send + 'static;

    /// See [`SubscribeOnceExt::subscribe_once_on_main`].
    fn subscribe_once<F>(&self, context: &MainContext, on_value: F) -> Subscription
    where
        F: FnOnce(T) + Send + 'static;

    /// See [`MergeOnMainExt::merge_on_main`].
    fn merge<U, F>(&self, other: &Publisher<U, E>, context: &MainContext, on_pair: F) -> Subscription
    where
        U: Send + 'static,
        F: FnMut(T, U) + Send + 'static;

    /// See [`BatchExt::group_on_main`].
    fn group<K, Er, KF, F>(&self, context: &MainContext, key_of: KF, on_groups: F) -> Subscription
    where
        K: Eq + Hash,
        Er: Debug,
        KF: FnMut(&T) -> Result<K, Er> + Send + 'static,
        F: FnOnce(Vec<Vec<T>>) + Send + 'static;

    /// See [`BatchExt::order_on_main`].
    fn order<P, F>(&self, context: &MainContext, by: P, on_sorted: F) -> Subscription
    where
        P: FnMut(&T, &T) -> bool + Send + 'static,
        F: FnOnce(Vec<T>) + Send + 'static;
}

impl<T, E> PublisherExt<T, E> for Publisher<T, E>
where
    T: Send + 'static,
    E: Debug + Send + 'static,
{
    fn subscribe<F>(&self, context: &MainContext, on_value: F) -> Subscription
    where
        F: FnMut(T) + Send + 'static,
    {
        self.stream().subscribe_on_main(context, on_value)
    }

    fn subscribe_once<F>(&self, context: &MainContext, on_value: F) -> Subscription
    where
        F: FnOnce(T) + Send + 'static,
    {
        self.stream().subscribe_once_on_main(context, on_value)
    }

    fn merge<U, F>(&self, other: &Publisher<U, E>, context: &MainContext, on_pair: F) -> Subscription
    where
        U: Send + 'static,
        F: FnMut(T, U) + Send + 'static,
    {
        self.stream().merge_on_main(other.stream(), context, on_pair)
    }

    fn group<K, Er, KF, F>(&self, context: &MainContext, key_of: KF, on_groups: F) -> Subscription
    where
        K: Eq + Hash,
        Er: Debug,
        KF: FnMut(&T) -> Result<K, Er> + Send + 'static,
        F: FnOnce(Vec<Vec<T>>) + Send + 'static,
    {
        self.stream().group_on_main(context, key_of, on_groups)
    }

    fn order<P, F>(&self, context: &MainContext, by: P, on_sorted: F) -> Subscription
    where
        P: FnMut(&T, &T) -> bool + Send + 'static,
        F: FnOnce(Vec<T>) + Send + 'static,
    {
        self.stream().order_on_main(context, by, on_sorted)
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::main_context::MainContext;
use crate::subscribe_main::SubscribeMainExt;
use crate::subscription::Subscription;
use cep_core::StreamItem;
use cep_stream::CorrelateExt;
use futures::Stream;
use std::fmt::Debug;

/// Extension trait providing the terminal correlated merge.
pub trait MergeOnMainExt<T, E>: Stream<Item = StreamItem<T, E>> + Sized {
    /// Correlates `self` with `other` and calls `on_pair` on `context` for every pair.
    ///
    /// Windowing follows [`correlate_with`](cep_stream::CorrelateExt::correlate_with):
    /// consecutive values are taken two at a time and a window holding two values of
    /// the same origin is dropped. Failures of either source end the subscription
    /// silently.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cep_exec::{MainContext, MergeOnMainExt};
    /// use cep_test_utils::{test_channel, Recorder};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let context = MainContext::new().unwrap();
    /// let (touch_tx, touches) = test_channel::<&str>();
    /// let (pressure_tx, pressures) = test_channel::<u32>();
    /// let recorder = Recorder::new();
    ///
    /// let pairs = recorder.clone();
    /// let subscription = touches.merge_on_main(pressures, &context, move |touch, pressure| {
    ///     pairs.record((touch, pressure));
    /// });
    ///
    /// touch_tx.send("began").unwrap();
    /// pressure_tx.send(7).unwrap();
    ///
    /// assert_eq!(recorder.wait_for(1, 500).await, vec![("began", 7)]);
    /// subscription.cancel();
    /// # }
    /// ```
    fn merge_on_main<U, S2, F>(self, other: S2, context: &MainContext, on_pair: F) -> Subscription
    where
        S2: Stream<Item = StreamItem<U, E>> + Send + 'static,
        U: Send + 'static,
        F: FnMut(T, U) + Send + 'static;
}

impl<S, T, E> MergeOnMainExt<T, E> for S
where
    S: Stream<Item = StreamItem<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Debug + Send + 'static,
{
    fn merge_on_main<U, S2, F>(self, other: S2, context: &MainContext, mut on_pair: F) -> Subscription
    where
        S2: Stream<Item = StreamItem<U, E>> + Send + 'static,
        U: Send + 'static,
        F: FnMut(T, U) + Send + 'static,
    {
        self.correlate_with(other)
            .subscribe_on_main(context, move |(first, second)| on_pair(first, second))
    }
}

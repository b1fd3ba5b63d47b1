// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::main_context::MainContext;
use crate::subscription::Subscription;
use cep_core::StreamItem;
use futures::Stream;
use std::fmt::Debug;

/// Extension trait delivering the terminal value of a stream once.
pub trait SubscribeOnceExt<T, E>: Stream<Item = StreamItem<T, E>> + Sized {
    /// Calls `on_value` once on `context` with the last value, after the stream
    /// completed successfully.
    ///
    /// Intended for streams that produce a single value on completion, such as
    /// [`collect_all`](cep_stream::CollectAllExt::collect_all).
    ///
    /// # Behavior
    ///
    /// - Values: only the most recent one is kept
    /// - Completion after at least one value: one call of `on_value`
    /// - Completion without a value: no call
    /// - Failure: no call; the failure is logged at debug level
    fn subscribe_once_on_main<F>(self, context: &MainContext, on_value: F) -> Subscription
    where
        F: FnOnce(T) + Send + 'static;
}

impl<S, T, E> SubscribeOnceExt<T, E> for S
where
    S: Stream<Item = StreamItem<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Debug + Send + 'static,
{
    fn subscribe_once_on_main<F>(self, context: &MainContext, on_value: F) -> Subscription
    where
        F: FnOnce(T) + Send + 'static,
    {
        Subscription::spawn(context, move |delivery| async move {
            let mut source = Box::pin(self);
            let mut last = None;
            while let Some(item) = delivery.next(&mut source).await {
                match item {
                    StreamItem::Value(value) => last = Some(value),
                    StreamItem::Error(e) => {
                        debug!("subscribe_once: discarding upstream failure: {e:?}");
                        return;
                    }
                }
            }

            if delivery.is_cancelled() {
                return;
            }
            if let Some(value) = last {
                if delivery.post(move || on_value(value)).is_err() {
                    warn!("subscribe_once: main context closed, result dropped");
                }
            }
        })
    }
}

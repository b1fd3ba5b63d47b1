// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::main_context::MainContext;
use crate::subscription::Subscription;
use cep_core::StreamItem;
use futures::Stream;
use parking_lot::Mutex;
use std::fmt::Debug;
use std::sync::Arc;

/// Extension trait delivering every value of a stream on a [`MainContext`].
pub trait SubscribeMainExt<T, E>: Stream<Item = StreamItem<T, E>> + Sized {
    /// Calls `on_value` on `context` for every value, in emission order.
    ///
    /// # Behavior
    ///
    /// - Values: each one posted to `context`; a call returns before the next starts
    /// - Failure: discarded (logged at debug level); the subscription ends
    /// - Completion: the subscription ends, no hook is called
    ///
    /// Must be called within a Tokio runtime: the source is pulled by a spawned task.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cep_exec::{MainContext, SubscribeMainExt};
    /// use cep_test_utils::{test_channel, Recorder};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let context = MainContext::new().unwrap();
    /// let (tx, stream) = test_channel::<&str>();
    /// let recorder = Recorder::new();
    ///
    /// let subscription = stream.subscribe_on_main(&context, recorder.callback());
    ///
    /// tx.send("began").unwrap();
    /// tx.send("ended").unwrap();
    ///
    /// assert_eq!(recorder.wait_for(2, 500).await, vec!["began", "ended"]);
    /// subscription.cancel();
    /// # }
    /// ```
    fn subscribe_on_main<F>(self, context: &MainContext, on_value: F) -> Subscription
    where
        F: FnMut(T) + Send + 'static;
}

impl<S, T, E> SubscribeMainExt<T, E> for S
where
    S: Stream<Item = StreamItem<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Debug + Send + 'static,
{
    fn subscribe_on_main<F>(self, context: &MainContext, on_value: F) -> Subscription
    where
        F: FnMut(T) + Send + 'static,
    {
        let on_value = Arc::new(Mutex::new(on_value));

        Subscription::spawn(context, move |delivery| async move {
            let mut source = Box::pin(self);
            while let Some(item) = delivery.next(&mut source).await {
                match item {
                    StreamItem::Value(value) => {
                        let on_value = Arc::clone(&on_value);
                        let posted = delivery.post(move || {
                            let mut callback = on_value.lock();
                            (&mut *callback)(value);
                        });
                        if posted.is_err() {
                            warn!("subscribe: main context closed, dropping subscription");
                            break;
                        }
                    }
                    StreamItem::Error(e) => {
                        debug!("subscribe: discarding upstream failure: {e:?}");
                        break;
                    }
                }
            }
        })
    }
}

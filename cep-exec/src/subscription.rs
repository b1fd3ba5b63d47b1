// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::main_context::MainContext;
use cep_core::{CancellationToken, Result};
use futures::{FutureExt, Stream, StreamExt};
use std::future::Future;
use std::panic::AssertUnwindSafe;

/// Handle to a running terminal subscription.
///
/// The source is pulled by a Tokio task and every callback is posted to a
/// [`MainContext`]. Dropping the handle cancels the subscription: the source is
/// no longer pulled and callbacks that have not started yet are skipped. Use
/// [`detach`](Self::detach) to let it run until the source terminates.
///
/// # Example
///
/// ```rust
/// use cep_exec::{MainContext, SubscribeMainExt};
/// use cep_core::StreamItem;
/// use futures::{stream, StreamExt};
///
/// # async fn example() -> cep_core::Result<()> {
/// let context = MainContext::new()?;
/// let source = stream::iter([1, 2, 3]).map(StreamItem::<i32>::Value);
///
/// let subscription = source.subscribe_on_main(&context, |value| println!("{value}"));
/// subscription.finished().await;
/// # Ok(())
/// # }
/// ```
#[must_use = "dropping a Subscription cancels it; call `detach()` to keep it running"]
#[derive(Debug)]
pub struct Subscription {
    cancel: CancellationToken,
    done: CancellationToken,
    detached: bool,
}

impl Subscription {
    /// Spawns `drive` on the Tokio runtime and marks the subscription finished
    /// once every callback it posted has run.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub(crate) fn spawn<F, Fut>(context: &MainContext, drive: F) -> Self
    where
        F: FnOnce(Delivery) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let done = CancellationToken::new();
        let driver = drive(Delivery {
            context: context.clone(),
            cancel: cancel.clone(),
        });

        let context = context.clone();
        let latch = done.clone();
        tokio::spawn(async move {
            if AssertUnwindSafe(driver).catch_unwind().await.is_err() {
                error!("subscription: source panicked, subscription ended");
            }
            // Queued behind the callbacks, so it fires after the last of them
            let on_context = latch.clone();
            if context.post(move || on_context.cancel()).is_err() {
                latch.cancel();
            }
        });

        Self {
            cancel,
            done,
            detached: false,
        }
    }

    /// Stops pulling from the source and skips every callback not yet started.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// `true` once the source terminated (completed, failed, panicked or was
    /// cancelled) and every posted callback has run.
    pub fn is_finished(&self) -> bool {
        self.done.is_cancelled()
    }

    /// Waits until [`is_finished`](Self::is_finished) holds.
    pub async fn finished(&self) {
        self.done.cancelled().await;
    }

    /// Releases the handle without cancelling; the subscription lives until its
    /// source terminates.
    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.detached {
            self.cancel.cancel();
        }
    }
}

/// Driver-side half of a subscription: pulls the source and posts callbacks.
pub(crate) struct Delivery {
    context: MainContext,
    cancel: CancellationToken,
}

impl Delivery {
    /// Next source item, or `None` once the source completed or the subscription was cancelled.
    pub(crate) async fn next<S>(&self, source: &mut S) -> Option<S::Item>
    where
        S: Stream + Unpin,
    {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => None,
            item = source.next() => item,
        }
    }

    /// Posts `callback` to the main context; it is skipped if the subscription
    /// gets cancelled before it runs.
    pub(crate) fn post<F>(&self, callback: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let cancel = self.cancel.clone();
        self.context.post(move || {
            if !cancel.is_cancelled() {
                callback();
            }
        })
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Heterogeneous merge-and-correlate operator.
//!
//! [`correlate_with`](CorrelateExt::correlate_with) merges two streams with different
//! element types but a shared failure type and emits `(first, second)` pairs.
//!
//! # Behavior
//!
//! - Values of both sources are tagged with their origin ([`Tagged`]) and interleaved
//!   in arrival order
//! - The interleaved values are cut into consecutive, non-overlapping windows of two
//! - A window holding one value of each origin emits a pair; a window holding two
//!   values of the same origin is dropped without any signal
//! - A single value left over when both sources complete is dropped
//! - Completion: once both sources have completed
//! - Failure: the first failure of either source is forwarded, then the stream ends
//!
//! The windowing is lossy for sources running at different rates: it is meant for
//! sources that emit in lock-step.
//!
//! # Examples
//!
//! ```rust
//! use cep_core::StreamItem;
//! use cep_stream::CorrelateExt;
//! use cep_test_utils::{test_channel, unwrap_stream};
//!
//! # async fn example() {
//! let (touch_tx, touches) = test_channel::<&str>();
//! let (pressure_tx, pressures) = test_channel::<u32>();
//!
//! let mut correlated = Box::pin(touches.correlate_with(pressures));
//!
//! touch_tx.send("began").unwrap();
//! pressure_tx.send(42).unwrap();
//!
//! assert_eq!(unwrap_stream(&mut correlated, 500).await.ok(), Some(("began", 42)));
//! # }
//! ```

mod merge_buffer;

pub use merge_buffer::{MergeBuffer, Tagged};

use crate::terminate_on_error::TerminateOnError;
use cep_core::StreamItem;
use futures::future::ready;
use futures::stream::select;
use futures::{Stream, StreamExt};

/// Extension trait providing the [`correlate_with`](Self::correlate_with) operator.
pub trait CorrelateExt<T, E>: Stream<Item = StreamItem<T, E>> + Sized
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Merges `self` with `other` and emits correlated `(T, U)` pairs.
    ///
    /// See the [module-level documentation](crate::correlate) for the windowing rules.
    fn correlate_with<U, S2>(self, other: S2) -> impl Stream<Item = StreamItem<(T, U), E>> + Send + 'static
    where
        S2: Stream<Item = StreamItem<U, E>> + Send + 'static,
        U: Send + 'static;
}

impl<S, T, E> CorrelateExt<T, E> for S
where
    S: Stream<Item = StreamItem<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    fn correlate_with<U, S2>(self, other: S2) -> impl Stream<Item = StreamItem<(T, U), E>> + Send + 'static
    where
        S2: Stream<Item = StreamItem<U, E>> + Send + 'static,
        U: Send + 'static,
    {
        let first = self.map(|item: StreamItem<T, E>| item.map(Tagged::<T, U>::First));
        let second = other.map(|item: StreamItem<U, E>| item.map(Tagged::<T, U>::Second));

        TerminateOnError::new(select(first, second))
            .scan(
                MergeBuffer::new(),
                |buffer: &mut MergeBuffer<T, U>, item: StreamItem<Tagged<T, U>, E>| {
                    ready(Some(match item {
                        StreamItem::Value(tagged) => buffer.push(tagged).map(StreamItem::Value),
                        StreamItem::Error(e) => {
                            debug!("correlate: forwarding upstream failure");
                            Some(StreamItem::Error(e))
                        }
                    }))
                },
            )
            .filter_map(ready)
    }
}

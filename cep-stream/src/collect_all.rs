// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Buffer-to-completion operator.
//!
//! [`collect_all`](CollectAllExt::collect_all) turns a finite stream into a stream of
//! exactly one item: the snapshot of every value, emitted when the source completes.
//!
//! # Behavior
//!
//! - Values: buffered in arrival order, nothing is emitted
//! - Completion: emits the buffered `Vec<T>` (possibly empty), then completes
//! - Failure: the buffer is discarded, the failure is forwarded and the stream ends
//!
//! # Examples
//!
//! ```rust
//! use cep_core::StreamItem;
//! use cep_stream::CollectAllExt;
//! use futures::{stream, StreamExt};
//!
//! # async fn example() {
//! let source = stream::iter([3, 1, 2]).map(StreamItem::<i32>::Value);
//!
//! let mut batches = Box::pin(source.collect_all());
//!
//! assert_eq!(batches.next().await.and_then(StreamItem::ok), Some(vec![3, 1, 2]));
//! assert!(batches.next().await.is_none());
//! # }
//! ```

use cep_core::StreamItem;
use futures::stream::once;
use futures::{Stream, StreamExt};

/// Extension trait providing the [`collect_all`](Self::collect_all) operator.
pub trait CollectAllExt<T, E>: Stream<Item = StreamItem<T, E>> + Sized
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Buffers the whole stream and emits it as one snapshot on completion.
    fn collect_all(self) -> impl Stream<Item = StreamItem<Vec<T>, E>> + Send + 'static;
}

impl<S, T, E> CollectAllExt<T, E> for S
where
    S: Stream<Item = StreamItem<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    fn collect_all(self) -> impl Stream<Item = StreamItem<Vec<T>, E>> + Send + 'static {
        once(async move {
            let mut source = Box::pin(self);
            let mut batch = Vec::new();
            while let Some(item) = source.next().await {
                match item {
                    StreamItem::Value(value) => batch.push(value),
                    StreamItem::Error(e) => {
                        debug!(
                            "collect_all: discarding {} buffered values after upstream failure",
                            batch.len()
                        );
                        return StreamItem::Error(e);
                    }
                }
            }
            StreamItem::Value(batch)
        })
    }
}

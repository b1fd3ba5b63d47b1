// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the `cep-rx` workspace.
//!
//! Production code builds pipelines from streams and publishers; tests drive them
//! imperatively through channels. This crate bridges the two:
//!
//! - [`test_channel`] / [`test_channel_with_errors`]: a sender plus a `StreamItem` stream
//! - [`helpers`]: timeout-guarded assertions on streams
//! - [`Recorder`]: a callback sink that tests can await
//! - [`touch_event`], [`person`]: fixtures
//!
//! # Example
//!
//! ```rust
//! use cep_test_utils::{test_channel, unwrap_stream};
//! use cep_test_utils::touch_event::touch_began;
//!
//! # async fn example() {
//! let (tx, mut stream) = test_channel();
//!
//! tx.send(touch_began(1)).unwrap();
//!
//! let item = unwrap_stream(&mut stream, 500).await;
//! assert_eq!(item.ok(), Some(touch_began(1)));
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod person;
pub mod recorder;
pub mod touch_event;

use cep_core::StreamItem;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use helpers::{assert_no_element_emitted, assert_stream_ended, unwrap_stream};
pub use recorder::Recorder;

/// Creates a test channel that automatically wraps values in `StreamItem::Value`.
///
/// Dropping the sender completes the stream.
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts `StreamItem<T, E>` for testing failure propagation.
pub fn test_channel_with_errors<T: Send + 'static, E: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T, E>>,
    impl Stream<Item = StreamItem<T, E>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}

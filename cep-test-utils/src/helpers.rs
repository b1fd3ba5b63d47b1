// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::StreamExt;
use futures::Stream;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Waits for the next item of `stream`.
///
/// # Panics
///
/// Panics if the stream ends or nothing arrives within `timeout_ms`.
pub async fn unwrap_stream<S>(stream: &mut S, timeout_ms: u64) -> S::Item
where
    S: Stream + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(item)) => item,
        Ok(None) => panic!("Expected an item but the stream ended"),
        Err(_) => panic!("Timeout: no item received within {timeout_ms} ms"),
    }
}

/// Asserts that `stream` stays silent for `timeout_ms`.
///
/// # Panics
///
/// Panics if the stream emits or ends during the wait.
pub async fn assert_no_element_emitted<S>(stream: &mut S, timeout_ms: u64)
where
    S: Stream + Unpin,
{
    tokio::select! {
        state = stream.next() => {
            panic!(
                "Unexpected emission, expected no output (stream ended: {})",
                state.is_none()
            );
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Asserts that `stream` completes within `timeout_ms` without emitting.
///
/// # Panics
///
/// Panics if an item arrives or the stream is still open after the wait.
pub async fn assert_stream_ended<S>(stream: &mut S, timeout_ms: u64)
where
    S: Stream + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(None) => {}
        Ok(Some(_)) => panic!("Expected the stream to end, but it emitted an item"),
        Err(_) => panic!("Timeout: stream still open after {timeout_ms} ms"),
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::{timeout_at, Instant};

/// Callback sink that records every delivery and lets a test await them.
///
/// # Example
///
/// ```rust
/// use cep_test_utils::Recorder;
///
/// # async fn example() {
/// let recorder = Recorder::new();
/// let mut callback = recorder.callback();
///
/// callback(1);
/// callback(2);
///
/// assert_eq!(recorder.wait_for(2, 500).await, vec![1, 2]);
/// # }
/// ```
#[derive(Debug)]
pub struct Recorder<T> {
    values: Arc<Mutex<Vec<T>>>,
    notify: Arc<Notify>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
            notify: Arc::clone(&self.notify),
        }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            values: Arc::new(Mutex::new(Vec::new())),
            notify: Arc::new(Notify::new()),
        }
    }
}

impl<T: Clone + Send + 'static> Recorder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a callback that records its argument.
    pub fn callback(&self) -> impl FnMut(T) + Send + 'static {
        let recorder = self.clone();
        move |value| recorder.record(value)
    }

    pub fn record(&self, value: T) {
        self.values.lock().push(value);
        self.notify.notify_one();
    }

    /// Snapshot of everything recorded so far.
    pub fn values(&self) -> Vec<T> {
        self.values.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Waits until at least `count` values were recorded and returns them.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `count` values arrive within `timeout_ms`.
    pub async fn wait_for(&self, count: usize, timeout_ms: u64) -> Vec<T> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            if self.len() >= count {
                return self.values();
            }
            if timeout_at(deadline, self.notify.notified()).await.is_err() {
                panic!(
                    "Timeout: expected {count} recorded values, got {} within {timeout_ms} ms",
                    self.len()
                );
            }
        }
    }
}

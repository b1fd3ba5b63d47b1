// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The designated serial execution context for terminal callbacks.
//!
//! A [`MainContext`] owns one dedicated thread draining a FIFO queue of jobs.
//! Every callback of `subscribe`, `merge`, `group` and `order` is posted here,
//! which guarantees that callbacks never overlap, run in posting order, and that
//! each one returns before the next starts.
//!
//! The thread stops once every handle to the context has been dropped and the
//! queue is drained.

use cep_core::{CepError, Result};
use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures::executor::block_on_stream;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};
use std::thread::{self, ThreadId};

type Job = Box<dyn FnOnce() + Send + 'static>;

const DEFAULT_NAME: &str = "cep-main";

static GLOBAL: OnceLock<MainContext> = OnceLock::new();

/// Handle to a serial execution context. Cheap to clone.
///
/// # Example
///
/// ```
/// use cep_exec::MainContext;
/// use std::sync::mpsc::channel;
///
/// let context = MainContext::builder().name("ui").build().unwrap();
/// let (tx, rx) = channel();
///
/// let probe = context.clone();
/// context.post(move || tx.send(probe.is_current()).unwrap()).unwrap();
///
/// assert!(rx.recv().unwrap());
/// assert!(!context.is_current());
/// ```
#[derive(Clone)]
pub struct MainContext {
    inner: Arc<Shared>,
}

struct Shared {
    sender: UnboundedSender<Job>,
    name: String,
    thread_id: ThreadId,
}

impl fmt::Debug for MainContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainContext")
            .field("name", &self.inner.name)
            .field("thread_id", &self.inner.thread_id)
            .finish()
    }
}

impl MainContext {
    pub fn builder() -> MainContextBuilder {
        MainContextBuilder::default()
    }

    /// Spawns a context with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CepError::ContextError`] if the thread cannot be spawned.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// The process-wide default context, spawned on first use.
    ///
    /// # Errors
    ///
    /// Returns [`CepError::ContextError`] if the thread cannot be spawned.
    pub fn global() -> Result<Self> {
        if let Some(context) = GLOBAL.get() {
            return Ok(context.clone());
        }
        let context = Self::new()?;
        // A racing initializer may win; the losing context stops once dropped
        Ok(GLOBAL.get_or_init(|| context).clone())
    }

    /// Queues `job` behind every job posted before it.
    ///
    /// # Errors
    ///
    /// Returns [`CepError::ContextClosed`] if the context thread has stopped.
    pub fn post<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner
            .sender
            .unbounded_send(Box::new(job))
            .map_err(|_| CepError::ContextClosed)
    }

    /// `true` when called from this context's thread.
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.inner.thread_id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn is_closed(&self) -> bool {
        self.inner.sender.is_closed()
    }
}

/// Configuration of a [`MainContext`].
#[derive(Debug, Clone)]
pub struct MainContextBuilder {
    name: String,
    stack_size: Option<usize>,
}

impl Default for MainContextBuilder {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            stack_size: None,
        }
    }
}

impl MainContextBuilder {
    /// Name of the context thread. Defaults to `cep-main`.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub const fn stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// Spawns the context thread.
    ///
    /// # Errors
    ///
    /// Returns [`CepError::ContextError`] if the thread cannot be spawned.
    pub fn build(self) -> Result<MainContext> {
        let (sender, receiver) = unbounded::<Job>();

        let mut builder = thread::Builder::new().name(self.name.clone());
        if let Some(bytes) = self.stack_size {
            builder = builder.stack_size(bytes);
        }

        let handle = builder.spawn(move || run(receiver)).map_err(|e| {
            CepError::context_error(format!("failed to spawn thread '{}': {e}", self.name))
        })?;
        debug!("main context '{}' started", self.name);

        Ok(MainContext {
            inner: Arc::new(Shared {
                sender,
                thread_id: handle.thread().id(),
                name: self.name,
            }),
        })
    }
}

fn run(receiver: UnboundedReceiver<Job>) {
    for job in block_on_stream(receiver) {
        if let Err(panic) = catch_unwind(AssertUnwindSafe(job)) {
            error!(
                "main context: callback panicked: {}",
                panic_message(panic.as_ref())
            );
        }
    }
    debug!("main context stopped");
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic payload>")
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types shared by every `cep-rx` crate.
//!
//! - [`StreamItem`]: the item vocabulary of every stream. A value, or a failure that
//!   terminates the sequence. The end of the stream is the completion signal.
//! - [`CepError`]: the default failure type.
//! - [`CancellationToken`]: a runtime-agnostic cancellation latch used by subscriptions.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod cancellation_token;
pub mod cep_error;
pub mod stream_item;

pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::cep_error::{CepError, Result};
pub use self::stream_item::StreamItem;

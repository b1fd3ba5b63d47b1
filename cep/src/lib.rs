// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # cep-rx
//!
//! Complex event processing on top of `futures` streams.
//!
//! ## Overview
//!
//! - **Detection operators** (`cep-stream`): [`pairwise`](PairwiseExt::pairwise),
//!   [`followed_by`](PairwiseExt::followed_by), [`correlate_with`](CorrelateExt::correlate_with)
//!   and [`collect_all`](CollectAllExt::collect_all), on any stream of [`StreamItem`]s
//!   and on the cold [`Publisher`] description
//! - **Terminal sinks** (`cep-exec`): `subscribe`, `merge`, `group` and `order`, each
//!   delivering to a callback on a serial [`MainContext`]
//!
//! A failure ends a pipeline. Sinks never hand a failure to a callback: the
//! subscription just stops.
//!
//! ## Quick Start
//!
//! ```rust
//! use cep_rx::prelude::*;
//! use std::sync::mpsc::channel;
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Touch {
//!     Began,
//!     Ended,
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), CepError> {
//! let context = MainContext::new()?;
//! let (tx, rx) = channel();
//!
//! let touches = Publisher::<Touch>::from_values(vec![Touch::Began, Touch::Ended, Touch::Began]);
//! let taps = touches.followed_by(|a, b| *a == Touch::Began && *b == Touch::Ended);
//!
//! taps.subscribe(&context, move |tap| tx.send(tap).unwrap())
//!     .finished()
//!     .await;
//!
//! assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![(Touch::Began, Touch::Ended)]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `tracing`: forwards internal diagnostics (dropped windows, discarded failures,
//!   callback panics) to the `tracing` crate

// Re-export core types
pub use cep_core::{CancellationToken, CepError, Result, StreamItem};

// Re-export operators
pub use cep_stream::{CollectAllExt, CorrelateExt, PairwiseExt, Publisher, Tagged};

// Re-export sinks and the execution context
pub use cep_exec::{
    BatchExt, MainContext, MainContextBuilder, MergeOnMainExt, PublisherExt, SubscribeMainExt,
    SubscribeOnceExt, Subscription,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use cep_core::{CepError, StreamItem};
    pub use cep_exec::{
        BatchExt, MainContext, MergeOnMainExt, PublisherExt, SubscribeMainExt, Subscription,
    };
    pub use cep_stream::{CollectAllExt, CorrelateExt, PairwiseExt, Publisher};
}

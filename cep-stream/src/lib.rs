// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Complex-event-processing operators for `futures` streams.
//!
//! Every operator works on streams of [`StreamItem<T, E>`](cep_core::StreamItem): a
//! `StreamItem::Error` is the failure signal, the end of the stream is completion.
//! Operators are provided through extension traits, and mirrored on the cold
//! [`Publisher`] description so that each subscription gets its own operator state.
//!
//! ## Operators
//!
//! | Operator | Output | State |
//! |----------|--------|-------|
//! | [`pairwise`](PairwiseExt::pairwise) | `(previous, current)` for every element after the first | one pending element |
//! | [`followed_by`](PairwiseExt::followed_by) | adjacent pairs matching a predicate | one pending element |
//! | [`correlate_with`](CorrelateExt::correlate_with) | `(T, U)` pairs from two differently-typed streams | window of two tagged values |
//! | [`collect_all`](CollectAllExt::collect_all) | one `Vec<T>` on completion | the whole stream |
//! | [`Publisher::duplicate`] | N handles to the same description | none |
//!
//! Delivery to a callback on the main execution context (`subscribe`, `merge`,
//! `group`, `order`) lives in the `cep-exec` crate.
//!
//! ## Failure handling
//!
//! The operators in this crate forward the first failure unchanged and then end
//! their output stream.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod batch;
pub mod collect_all;
pub mod correlate;
pub mod pairwise;
pub mod publisher;
pub mod terminate_on_error;

pub use collect_all::CollectAllExt;
pub use correlate::{CorrelateExt, MergeBuffer, Tagged};
pub use pairwise::{Adjacency, PairwiseExt};
pub use publisher::Publisher;
pub use terminate_on_error::TerminateOnError;

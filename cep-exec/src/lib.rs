// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Terminal sinks delivering stream results on a serial main context.
//!
//! | Sink | Callback | Calls |
//! |------|----------|-------|
//! | [`subscribe_on_main`](SubscribeMainExt::subscribe_on_main) | `FnMut(T)` | one per value |
//! | [`merge_on_main`](MergeOnMainExt::merge_on_main) | `FnMut(T, U)` | one per correlated pair |
//! | [`group_on_main`](BatchExt::group_on_main) | `FnOnce(Vec<Vec<T>>)` | at most one |
//! | [`order_on_main`](BatchExt::order_on_main) | `FnOnce(Vec<T>)` | at most one |
//!
//! Sources are pulled by Tokio tasks; callbacks always run on the [`MainContext`]
//! thread, one at a time, in posting order. Failures are never delivered to a
//! callback: the subscription just ends.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod batch;
pub mod main_context;
pub mod merge;
pub mod publisher_ext;
pub mod subscribe_main;
pub mod subscribe_once;
pub mod subscription;

pub use batch::BatchExt;
pub use main_context::{MainContext, MainContextBuilder};
pub use merge::MergeOnMainExt;
pub use publisher_ext::PublisherExt;
pub use subscribe_main::SubscribeMainExt;
pub use subscribe_once::SubscribeOnceExt;
pub use subscription::Subscription;

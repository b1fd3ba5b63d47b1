// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cep_core::StreamItem;
use futures::Stream;
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream adapter that ends right after forwarding the first failure.
///
/// The source is not polled again once a [`StreamItem::Error`] went through,
/// which makes a failure terminal even for sources that would keep producing.
#[pin_project]
#[derive(Debug)]
pub struct TerminateOnError<S> {
    #[pin]
    inner: S,
    terminated: bool,
}

impl<S> TerminateOnError<S> {
    pub const fn new(stream: S) -> Self {
        Self {
            inner: stream,
            terminated: false,
        }
    }
}

impl<S, T, E> Stream for TerminateOnError<S>
where
    S: Stream<Item = StreamItem<T, E>>,
{
    type Item = StreamItem<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.terminated {
            return Poll::Ready(None);
        }

        match this.inner.poll_next(cx) {
            Poll::Ready(Some(StreamItem::Error(e))) => {
                *this.terminated = true;
                Poll::Ready(Some(StreamItem::Error(e)))
            }
            Poll::Ready(None) => {
                *this.terminated = true;
                Poll::Ready(None)
            }
            other => other,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.terminated {
            (0, Some(0))
        } else {
            (0, self.inner.size_hint().1)
        }
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Single-input, single-output transform stages.
//!
//! A [`Transform`] decides, chunk by chunk, whether to forward a chunk, end the
//! output, or fail it. [`TransformStream`] drives one over a stream of
//! `StreamItem`s:
//!
//! - `StreamItem::Error` from upstream is forwarded without reaching the transform
//! - [`Flow::Terminate`] closes the output cleanly
//! - an `Err` from the transform is emitted as the terminal error
//!
//! Either way the upstream is dropped at termination and never polled again.

use braid_core::{Result, StreamItem};
use core::pin::Pin;
use core::task::{ready, Context, Poll};
use futures::stream::{FusedStream, Stream};
use pin_project::pin_project;

/// What a transform step decided for one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow<T> {
    /// Emit this chunk downstream.
    Forward(T),
    /// Drop the chunk and close the output.
    Terminate,
}

/// A stateful per-chunk transform step.
pub trait Transform<T> {
    /// Chunk type produced downstream.
    type Output;

    /// Process one incoming chunk.
    ///
    /// # Errors
    ///
    /// An error ends the output with that error.
    fn transform(&mut self, chunk: T) -> Result<Flow<Self::Output>>;
}

/// Stream produced by [`TransformExt::pipe_through`].
#[pin_project]
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct TransformStream<S, X> {
    #[pin]
    upstream: Option<S>,
    transform: X,
}

impl<S, X> TransformStream<S, X> {
    /// Drive `transform` over `upstream`.
    pub fn new(upstream: S, transform: X) -> Self {
        Self {
            upstream: Some(upstream),
            transform,
        }
    }

    /// The transform stage and its current state.
    pub fn transform(&self) -> &X {
        &self.transform
    }
}

impl<S, X, T> Stream for TransformStream<S, X>
where
    S: Stream<Item = StreamItem<T>>,
    X: Transform<T>,
{
    type Item = StreamItem<X::Output>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        let Some(upstream) = this.upstream.as_mut().as_pin_mut() else {
            return Poll::Ready(None);
        };

        let chunk = match ready!(upstream.poll_next(cx)) {
            Some(StreamItem::Value(chunk)) => chunk,
            Some(StreamItem::Error(e)) => return Poll::Ready(Some(StreamItem::Error(e))),
            None => {
                this.upstream.set(None);
                return Poll::Ready(None);
            }
        };

        match this.transform.transform(chunk) {
            Ok(Flow::Forward(out)) => Poll::Ready(Some(StreamItem::Value(out))),
            Ok(Flow::Terminate) => {
                this.upstream.set(None);
                Poll::Ready(None)
            }
            Err(e) => {
                this.upstream.set(None);
                Poll::Ready(Some(StreamItem::Error(e)))
            }
        }
    }
}

impl<S, X, T> FusedStream for TransformStream<S, X>
where
    S: Stream<Item = StreamItem<T>>,
    X: Transform<T>,
{
    fn is_terminated(&self) -> bool {
        self.upstream.is_none()
    }
}

/// Extension trait piping a stream of `StreamItem`s through a [`Transform`].
pub trait TransformExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Runs every value chunk through `transform`.
    fn pipe_through<X>(self, transform: X) -> TransformStream<Self, X>
    where
        X: Transform<T>,
    {
        TransformStream::new(self, transform)
    }
}

impl<S, T> TransformExt<T> for S where S: Stream<Item = StreamItem<T>> {}

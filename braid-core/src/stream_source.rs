// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{BraidError, CancelReason, Result, Source, StreamItem};
use core::pin::Pin;
use core::task::{ready, Context, Poll};
use futures::stream::{Map, Stream, StreamExt};
use pin_project::pin_project;

/// Adapts a `Stream<Item = StreamItem<T>>` into a [`Source`] of `T`.
///
/// `StreamItem::Error` becomes a failed read. Cancelling drops the wrapped stream
/// immediately; any later read fails with [`BraidError::SourceCancelled`].
#[pin_project]
#[derive(Debug)]
pub struct StreamSource<S> {
    #[pin]
    stream: Option<S>,
    cancelled: Option<CancelReason>,
}

impl<S> StreamSource<S> {
    /// Wrap a stream of `StreamItem`s.
    pub fn new(stream: S) -> Self {
        Self {
            stream: Some(stream),
            cancelled: None,
        }
    }

    /// Returns `true` once the source has been released.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.is_some()
    }

    /// The reason the source was released with, if it was.
    pub fn cancel_reason(&self) -> Option<&CancelReason> {
        self.cancelled.as_ref()
    }
}

impl<S, T> Source for StreamSource<S>
where
    S: Stream<Item = StreamItem<T>>,
{
    type Item = T;

    fn poll_read(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<Option<T>>> {
        let this = self.project();

        let Some(stream) = this.stream.as_pin_mut() else {
            let reason = this
                .cancelled
                .as_ref()
                .map_or_else(String::new, ToString::to_string);
            return Poll::Ready(Err(BraidError::SourceCancelled { reason }));
        };

        Poll::Ready(match ready!(stream.poll_next(cx)) {
            Some(StreamItem::Value(value)) => Ok(Some(value)),
            Some(StreamItem::Error(e)) => Err(e),
            None => Ok(None),
        })
    }

    fn poll_cancel(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        reason: &CancelReason,
    ) -> Poll<Result<()>> {
        let mut this = self.project();
        this.stream.set(None);
        if this.cancelled.is_none() {
            *this.cancelled = Some(reason.clone());
        }
        Poll::Ready(Ok(()))
    }
}

/// Source built from a stream of plain values.
pub type ValueSource<S> =
    StreamSource<Map<S, fn(<S as Stream>::Item) -> StreamItem<<S as Stream>::Item>>>;

/// Extension trait turning streams into [`Source`]s.
pub trait IntoSource: Stream + Sized {
    /// Treat every item of the stream as a successful read.
    fn into_source(self) -> ValueSource<Self> {
        StreamSource::new(self.map(StreamItem::Value as fn(Self::Item) -> StreamItem<Self::Item>))
    }

    /// Treat `StreamItem::Error` items as failed reads.
    fn into_fallible_source<T>(self) -> StreamSource<Self>
    where
        Self: Stream<Item = StreamItem<T>>,
    {
        StreamSource::new(self)
    }
}

impl<S: Stream> IntoSource for S {}

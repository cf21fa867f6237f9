// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pull-based sources.
//!
//! A [`Source`] is an ordered sequence that is read one item at a time and can be
//! released early. It is the input side of every braid component: the merger owns
//! one exclusive handle per source and decides when to read and when to cancel.
//!
//! Both operations are poll-based so that components can drive several of them
//! from a single `poll_next` without spawning. [`SourceExt`] adds the usual
//! future-returning conveniences.
//!
//! # Contract
//!
//! - `poll_read` resolves to `Ok(Some(item))`, `Ok(None)` at end-of-stream, or an
//!   error. It must be cancel-safe: dropping a read that returned `Pending` must
//!   not lose an item.
//! - `poll_cancel` releases the source. The same reason is passed on every poll of
//!   one cancellation. After it resolves no further reads are issued.
//!
//! # Example
//!
//! ```rust
//! use braid_core::{CancelReason, IntoSource, SourceExt};
//! use futures::stream;
//!
//! # #[tokio::main]
//! # async fn main() -> braid_core::Result<()> {
//! let mut source = stream::iter(vec![1, 2, 3]).into_source();
//!
//! assert_eq!(source.read().await?, Some(1));
//! source.cancel(CancelReason::requested("enough")).await?;
//! assert!(source.read().await.is_err());
//! # Ok(())
//! # }
//! ```

use crate::{CancelReason, Result};
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

/// An ordered, pull-based sequence that can be released early.
pub trait Source {
    /// The element type produced by the source.
    type Item;

    /// Attempt to read the next item.
    fn poll_read(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<Option<Self::Item>>>;

    /// Attempt to release the source with the given reason.
    fn poll_cancel(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        reason: &CancelReason,
    ) -> Poll<Result<()>>;
}

impl<S> Source for Box<S>
where
    S: Source + Unpin + ?Sized,
{
    type Item = S::Item;

    fn poll_read(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<Option<Self::Item>>> {
        Pin::new(&mut **self).poll_read(cx)
    }

    fn poll_cancel(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        reason: &CancelReason,
    ) -> Poll<Result<()>> {
        Pin::new(&mut **self).poll_cancel(cx, reason)
    }
}

impl<S> Source for &mut S
where
    S: Source + Unpin + ?Sized,
{
    type Item = S::Item;

    fn poll_read(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<Option<Self::Item>>> {
        Pin::new(&mut **self).poll_read(cx)
    }

    fn poll_cancel(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        reason: &CancelReason,
    ) -> Poll<Result<()>> {
        Pin::new(&mut **self).poll_cancel(cx, reason)
    }
}

/// A type-erased source, for merging sources of different concrete types.
pub type BoxSource<'a, T> = Box<dyn Source<Item = T> + Send + Unpin + 'a>;

/// Future-returning conveniences for [`Source`].
pub trait SourceExt: Source {
    /// Read the next item, `None` at end-of-stream.
    fn read(&mut self) -> Read<'_, Self>
    where
        Self: Unpin,
    {
        Read { source: self }
    }

    /// Release the source with `reason`.
    fn cancel(&mut self, reason: CancelReason) -> Cancel<'_, Self>
    where
        Self: Unpin,
    {
        Cancel {
            source: self,
            reason,
        }
    }

    /// Erase the concrete type of the source.
    fn boxed<'a>(self) -> BoxSource<'a, Self::Item>
    where
        Self: Sized + Send + Unpin + 'a,
    {
        Box::new(self)
    }
}

impl<S: Source + ?Sized> SourceExt for S {}

/// Future returned by [`SourceExt::read`].
#[derive(Debug)]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Read<'a, S: ?Sized> {
    source: &'a mut S,
}

impl<S> Future for Read<'_, S>
where
    S: Source + Unpin + ?Sized,
{
    type Output = Result<Option<S::Item>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut *this.source).poll_read(cx)
    }
}

/// Future returned by [`SourceExt::cancel`].
#[derive(Debug)]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Cancel<'a, S: ?Sized> {
    source: &'a mut S,
    reason: CancelReason,
}

impl<S> Future for Cancel<'_, S>
where
    S: Source + Unpin + ?Sized,
{
    type Output = Result<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut *this.source).poll_cancel(cx, &this.reason)
    }
}

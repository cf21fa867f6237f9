// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::release::ReleaseBatch;
use braid_core::{BraidError, CancelReason, Result, Source, StreamItem};
use core::future::Future;
use core::pin::Pin;
use core::task::{ready, Context, Poll};
use futures::stream::{FusedStream, Stream};

/// Interleaves one item per source per round and ends as soon as any source ends.
///
/// Created by [`EarlyZip::new`] or [`EarlyZipExt::early_zip`](super::EarlyZipExt::early_zip).
/// See the [module-level documentation](crate::early_zip) for the full contract.
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct EarlyZip<S> {
    sources: Vec<S>,
    phase: Phase,
}

#[derive(Debug)]
enum Phase {
    /// Waiting on the read of `sources[cursor]`.
    Reading { cursor: usize },
    /// Releasing every source; `failure` is emitted once the batch settles.
    Releasing {
        batch: ReleaseBatch,
        failure: Option<BraidError>,
    },
    Done,
}

impl<S> EarlyZip<S>
where
    S: Source + Unpin,
{
    /// Merge `sources` in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`BraidError::InvalidConfiguration`] if `sources` is empty.
    pub fn new(sources: Vec<S>) -> Result<Self> {
        if sources.is_empty() {
            return Err(BraidError::invalid_configuration(
                "early zip needs at least one source",
            ));
        }
        Ok(Self::from_non_empty(sources))
    }

    pub(super) fn from_non_empty(sources: Vec<S>) -> Self {
        Self {
            sources,
            phase: Phase::Reading { cursor: 0 },
        }
    }

    /// Number of merged sources.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Cancel the merged output and every source it still owns.
    ///
    /// All sources are cancelled together with
    /// [`CancelReason::Requested`]; the returned future resolves once every
    /// cancellation has settled. Safe to call mid-round, after dropping a pending
    /// `next()`. If the merge already terminated, nothing is cancelled again.
    ///
    /// # Errors
    ///
    /// Fails if a cancellation fails. If a read failure was still waiting for
    /// its cleanup batch, the future resolves to that failure instead.
    pub fn cancel(&mut self, reason: impl Into<String>) -> CancelEarlyZip<'_, S> {
        CancelEarlyZip {
            zip: self,
            reason: Some(CancelReason::requested(reason)),
        }
    }

    fn release(&mut self, reason: CancelReason, failure: Option<BraidError>) {
        debug!(
            "early zip releasing {} sources: {}",
            self.sources.len(),
            reason
        );
        self.phase = Phase::Releasing {
            batch: ReleaseBatch::new(reason, self.sources.len()),
            failure,
        };
    }

    /// Drive an in-flight release batch to completion, returning its result.
    fn poll_settle(&mut self, cx: &mut Context<'_>) -> Poll<(Result<()>, Option<BraidError>)> {
        let Phase::Releasing { batch, failure } = &mut self.phase else {
            return Poll::Ready((Ok(()), None));
        };

        let released = ready!(batch.poll_release(&mut self.sources, cx));
        let failure = failure.take();
        self.phase = Phase::Done;
        Poll::Ready((released, failure))
    }
}

impl<S> Stream for EarlyZip<S>
where
    S: Source + Unpin,
{
    type Item = StreamItem<S::Item>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            match &mut this.phase {
                Phase::Reading { cursor } => {
                    let index = *cursor;
                    match ready!(Pin::new(&mut this.sources[index]).poll_read(cx)) {
                        Ok(Some(item)) => {
                            *cursor = (index + 1) % this.sources.len();
                            return Poll::Ready(Some(StreamItem::Value(item)));
                        }
                        Ok(None) => this.release(CancelReason::SourceEnded { index }, None),
                        Err(e) => this.release(CancelReason::SourceFailed { index }, Some(e)),
                    }
                }
                Phase::Releasing { .. } => {
                    let (released, failure) = ready!(this.poll_settle(cx));
                    return Poll::Ready(terminal_error(released, failure).map(StreamItem::Error));
                }
                Phase::Done => return Poll::Ready(None),
            }
        }
    }
}

impl<S> FusedStream for EarlyZip<S>
where
    S: Source + Unpin,
{
    fn is_terminated(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }
}

/// Future returned by [`EarlyZip::cancel`].
#[derive(Debug)]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct CancelEarlyZip<'a, S> {
    zip: &'a mut EarlyZip<S>,
    reason: Option<CancelReason>,
}

impl<S> Future for CancelEarlyZip<'_, S>
where
    S: Source + Unpin,
{
    type Output = Result<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if let Some(reason) = this.reason.take() {
            if matches!(this.zip.phase, Phase::Reading { .. }) {
                this.zip.release(reason, None);
            }
        }

        let (released, failure) = ready!(this.zip.poll_settle(cx));
        Poll::Ready(terminal_error(released, failure).map_or(Ok(()), Err))
    }
}

/// The error that ends a settled release, if any. A read failure wins over
/// cleanup failures, which are only logged.
fn terminal_error(released: Result<()>, failure: Option<BraidError>) -> Option<BraidError> {
    match (failure, released) {
        (Some(e), released) => {
            if let Err(cleanup) = released {
                warn!("early zip cleanup after read failure failed: {}", cleanup);
            }
            Some(e)
        }
        (None, Err(e)) => Some(e),
        (None, Ok(())) => None,
    }
}

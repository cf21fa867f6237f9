// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use braid_core::{BraidError, CancelReason, Result, Source};
use core::mem;
use core::pin::Pin;
use core::task::{Context, Poll};

/// One batch of cancellations, issued to every source together.
///
/// Each poll drives every cancellation that has not settled yet, so a slow
/// release never delays the others. The batch resolves once all of them have
/// settled; failures are collected rather than short-circuiting.
#[derive(Debug)]
pub(super) struct ReleaseBatch {
    reason: CancelReason,
    settled: Vec<bool>,
    failures: Vec<(usize, BraidError)>,
}

impl ReleaseBatch {
    pub(super) fn new(reason: CancelReason, sources: usize) -> Self {
        Self {
            reason,
            settled: vec![false; sources],
            failures: Vec::new(),
        }
    }

    pub(super) fn poll_release<S>(
        &mut self,
        sources: &mut [S],
        cx: &mut Context<'_>,
    ) -> Poll<Result<()>>
    where
        S: Source + Unpin,
    {
        for (index, source) in sources.iter_mut().enumerate() {
            if self.settled[index] {
                continue;
            }

            if let Poll::Ready(result) = Pin::new(source).poll_cancel(cx, &self.reason) {
                self.settled[index] = true;
                if let Err(e) = result {
                    warn!("cancelling source {} ({}) failed: {}", index, self.reason, e);
                    self.failures.push((index, e));
                }
            }
        }

        if self.settled.iter().any(|settled| !settled) {
            return Poll::Pending;
        }

        let mut failures = mem::take(&mut self.failures);
        failures.sort_by_key(|(index, _)| *index);
        let errors = failures.into_iter().map(|(_, e)| e).collect();

        Poll::Ready(match BraidError::aggregate(errors) {
            Some(e) => Err(e),
            None => Ok(()),
        })
    }
}

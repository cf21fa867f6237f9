// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Scripted in-memory sources.
//!
//! A [`ScriptedSource`] replays a fixed list of [`Step`]s and records every
//! resolved read and every cancellation into a [`SourceLog`] that can be shared
//! by all sources of one test. This makes ordering properties observable: which
//! source was read when, and whether a cancellation batch was issued together.

use braid_core::{BraidError, CancelReason, Result, Source};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// One scripted outcome of a read.
#[derive(Debug, Clone)]
pub enum Step<T> {
    /// The read yields this item.
    Item(T),
    /// The read fails with this error.
    Fail(BraidError),
    /// The read returns `Pending` once, waking itself, then moves on.
    Yield,
    /// The read stays `Pending` forever and never wakes.
    Stall,
}

/// How a source answers `poll_cancel`.
#[derive(Debug, Clone, Default)]
pub enum CancelBehavior {
    /// Settle immediately.
    #[default]
    Accept,
    /// Return `Pending` once, waking itself, then settle.
    Yield,
    /// Settle with a failure.
    Fail(String),
}

/// Something a scripted source did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    /// A read resolved (item, end-of-stream or failure).
    Read { source: usize },
    /// The first `poll_cancel` of a cancellation reached the source.
    CancelIssued { source: usize, reason: CancelReason },
    /// The cancellation settled.
    CancelSettled { source: usize },
}

/// Event log shared between scripted sources and the test observing them.
#[derive(Debug, Clone, Default)]
pub struct SourceLog {
    events: Arc<Mutex<Vec<SourceEvent>>>,
}

impl SourceLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, event: SourceEvent) {
        self.events.lock().push(event);
    }

    /// Snapshot of every event so far.
    pub fn events(&self) -> Vec<SourceEvent> {
        self.events.lock().clone()
    }

    /// Number of resolved reads of `source`.
    pub fn reads(&self, source: usize) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| matches!(event, SourceEvent::Read { source: s } if *s == source))
            .count()
    }

    /// Every issued cancellation, in issue order.
    pub fn cancellations(&self) -> Vec<(usize, CancelReason)> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                SourceEvent::CancelIssued { source, reason } => Some((*source, reason.clone())),
                _ => None,
            })
            .collect()
    }

    /// Sources whose cancellation settled, in settle order.
    pub fn settled(&self) -> Vec<usize> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                SourceEvent::CancelSettled { source } => Some(*source),
                _ => None,
            })
            .collect()
    }
}

/// A [`Source`] replaying scripted steps; end-of-stream after the last step.
#[derive(Debug)]
pub struct ScriptedSource<T> {
    id: usize,
    steps: VecDeque<Step<T>>,
    on_cancel: CancelBehavior,
    log: SourceLog,
    cancel_in_flight: bool,
    cancelled: bool,
}

impl<T> Unpin for ScriptedSource<T> {}

impl<T> ScriptedSource<T> {
    /// A source yielding `items`, then end-of-stream.
    pub fn new(id: usize, items: impl IntoIterator<Item = T>, log: &SourceLog) -> Self {
        Self::from_steps(id, items.into_iter().map(Step::Item), log)
    }

    /// A source replaying arbitrary steps, then end-of-stream.
    pub fn from_steps(id: usize, steps: impl IntoIterator<Item = Step<T>>, log: &SourceLog) -> Self {
        Self {
            id,
            steps: steps.into_iter().collect(),
            on_cancel: CancelBehavior::Accept,
            log: log.clone(),
            cancel_in_flight: false,
            cancelled: false,
        }
    }

    /// Sets how this source answers cancellation.
    #[must_use]
    pub fn with_cancel(mut self, on_cancel: CancelBehavior) -> Self {
        self.on_cancel = on_cancel;
        self
    }

    /// Identifier recorded in every event of this source.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Whether a cancellation has settled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl<T> Source for ScriptedSource<T> {
    type Item = T;

    fn poll_read(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<Option<T>>> {
        let this = self.get_mut();

        if this.cancelled {
            return Poll::Ready(Err(BraidError::SourceCancelled {
                reason: format!("source {} read after cancel", this.id),
            }));
        }

        let result = match this.steps.pop_front() {
            Some(Step::Item(item)) => Ok(Some(item)),
            Some(Step::Fail(e)) => Err(e),
            Some(Step::Yield) => {
                cx.waker().wake_by_ref();
                return Poll::Pending;
            }
            Some(Step::Stall) => {
                this.steps.push_front(Step::Stall);
                return Poll::Pending;
            }
            None => Ok(None),
        };

        this.log.record(SourceEvent::Read { source: this.id });
        Poll::Ready(result)
    }

    fn poll_cancel(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        reason: &CancelReason,
    ) -> Poll<Result<()>> {
        let this = self.get_mut();

        if !this.cancel_in_flight {
            this.cancel_in_flight = true;
            this.log.record(SourceEvent::CancelIssued {
                source: this.id,
                reason: reason.clone(),
            });

            if matches!(this.on_cancel, CancelBehavior::Yield) {
                cx.waker().wake_by_ref();
                return Poll::Pending;
            }
        }

        this.cancel_in_flight = false;
        this.cancelled = true;
        this.log.record(SourceEvent::CancelSettled { source: this.id });

        match &this.on_cancel {
            CancelBehavior::Fail(message) => Poll::Ready(Err(BraidError::stream_error(format!(
                "source {} refused cancel: {}",
                this.id, message
            )))),
            CancelBehavior::Accept | CancelBehavior::Yield => Poll::Ready(Ok(())),
        }
    }
}

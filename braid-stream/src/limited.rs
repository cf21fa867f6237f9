// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Limited operator - forwards at most `size` chunks.
//!
//! The limiter reacts to the `size + 1`-th chunk, never to end-of-stream, and
//! never forwards it. What happens then depends on [`LimitOptions::error`]:
//!
//! - `false` (default): the output closes cleanly
//! - `true`: the output ends with [`BraidError::LimitExceeded`] carrying `size`
//!
//! Upstream `StreamItem::Error`s pass through and do not count as chunks.
//!
//! # Example
//!
//! ```rust
//! use braid_core::{BraidError, StreamItem};
//! use braid_stream::{drain, LimitOptions, LimitedExt};
//! use futures::stream;
//! use std::num::NonZeroUsize;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let size = NonZeroUsize::new(2).unwrap();
//! let chunks = || stream::iter((1..=5).map(StreamItem::Value));
//!
//! let lenient = drain(chunks().limited(size, LimitOptions::default())).await;
//! assert_eq!(lenient.unwrap(), vec![1, 2]);
//!
//! let strict = drain(chunks().limited(size, LimitOptions::strict())).await;
//! assert!(matches!(strict, Err(BraidError::LimitExceeded { size: 2 })));
//! # }
//! ```

use crate::transform::{Flow, Transform, TransformStream};
use braid_core::{BraidError, Result, StreamItem};
use core::num::NonZeroUsize;
use futures::Stream;

/// Settings of a [`LimitedTransform`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LimitOptions {
    /// Fail with [`BraidError::LimitExceeded`] instead of closing silently.
    pub error: bool,
}

impl LimitOptions {
    /// Options that fail on overflow.
    pub const fn strict() -> Self {
        Self { error: true }
    }

    /// Returns these options with `error` set.
    #[must_use]
    pub const fn with_error(self, error: bool) -> Self {
        Self { error }
    }
}

/// Transform stage counting forwarded chunks against a fixed limit.
#[derive(Debug, Clone)]
pub struct LimitedTransform {
    size: NonZeroUsize,
    options: LimitOptions,
    count: usize,
}

impl LimitedTransform {
    /// A limiter forwarding at most `size` chunks.
    pub fn new(size: NonZeroUsize, options: LimitOptions) -> Self {
        Self {
            size,
            options,
            count: 0,
        }
    }

    /// Like [`new`](Self::new), for a size that is not known to be positive.
    ///
    /// # Errors
    ///
    /// Returns [`BraidError::InvalidConfiguration`] if `size` is zero.
    pub fn try_new(size: usize, options: LimitOptions) -> Result<Self> {
        NonZeroUsize::new(size)
            .map(|size| Self::new(size, options))
            .ok_or_else(|| BraidError::invalid_configuration("limit size must be positive"))
    }

    /// The configured limit.
    pub fn size(&self) -> usize {
        self.size.get()
    }

    /// What happens on overflow.
    pub fn options(&self) -> LimitOptions {
        self.options
    }

    /// Chunks forwarded so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Chunks that may still be forwarded.
    pub fn remaining(&self) -> usize {
        self.size.get() - self.count
    }
}

impl<T> Transform<T> for LimitedTransform {
    type Output = T;

    fn transform(&mut self, chunk: T) -> Result<Flow<T>> {
        if self.count == self.size.get() {
            if self.options.error {
                return Err(BraidError::LimitExceeded {
                    size: self.size.get(),
                });
            }
            debug!("limit of {} chunks reached, closing", self.size);
            return Ok(Flow::Terminate);
        }

        self.count += 1;
        Ok(Flow::Forward(chunk))
    }
}

/// Stream returned by [`LimitedExt::limited`].
pub type Limited<S> = TransformStream<S, LimitedTransform>;

/// Extension trait providing the `limited` operator for streams.
pub trait LimitedExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Forwards at most `size` chunks, then closes or fails per `options`.
    ///
    /// See the [module-level documentation](crate::limited) for details.
    fn limited(self, size: NonZeroUsize, options: LimitOptions) -> Limited<Self> {
        TransformStream::new(self, LimitedTransform::new(size, options))
    }

    /// Like [`limited`](Self::limited), for a size that is not known to be positive.
    ///
    /// # Errors
    ///
    /// Returns [`BraidError::InvalidConfiguration`] if `size` is zero.
    fn try_limited(self, size: usize, options: LimitOptions) -> Result<Limited<Self>> {
        LimitedTransform::try_new(size, options).map(|limit| TransformStream::new(self, limit))
    }
}

impl<S, T> LimitedExt<T> for S where S: Stream<Item = StreamItem<T>> {}

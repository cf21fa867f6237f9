// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Early-zip operator - interleaves N sources and stops at the first exhaustion.
//!
//! Every pull performs the next step of a *round*: one read per source, strictly
//! in index order. Read *i + 1* is only issued once read *i* resolved, so a fast
//! source can never run more than one item ahead of a slow one.
//!
//! # Behavior
//!
//! - Each item is emitted as soon as it is read, before the round completes
//! - The first source to report end-of-stream ends the merge: every source,
//!   including the exhausted one, is cancelled with
//!   [`CancelReason::SourceEnded`](braid_core::CancelReason::SourceEnded) and the
//!   output closes cleanly
//! - Items already emitted earlier in that round stay emitted
//! - A failed read cancels every source with
//!   [`CancelReason::SourceFailed`](braid_core::CancelReason::SourceFailed) and is
//!   then emitted as the terminal error
//! - A failed cancellation turns the clean close into a terminal error
//! - [`EarlyZip::cancel`] releases every source with the consumer's reason
//!
//! Cancellations of one batch are issued together and awaited together; none
//! waits for another.
//!
//! # Example
//!
//! ```rust
//! use braid_core::IntoSource;
//! use braid_stream::{drain, EarlyZipExt};
//! use futures::stream;
//!
//! # #[tokio::main]
//! # async fn main() -> braid_core::Result<()> {
//! let numbers = stream::iter(vec!["1", "2", "3", "4"]).into_source();
//! let letters = stream::iter(vec!["a", "b"]).into_source();
//!
//! let merged = drain(numbers.early_zip([letters])).await?;
//!
//! // "3" was read in the round that found `letters` exhausted
//! assert_eq!(merged, vec!["1", "a", "2", "b", "3"]);
//! # Ok(())
//! # }
//! ```
//!
//! # See Also
//!
//! - [`LimitedExt::limited`](crate::LimitedExt::limited) - Cap the number of chunks

mod implementation;
mod release;

pub use implementation::{CancelEarlyZip, EarlyZip};

use braid_core::Source;

/// Extension trait providing the `early_zip` operator for sources.
pub trait EarlyZipExt: Source + Unpin + Sized {
    /// Merges `self` (index 0) with `others` (indices 1..) into an [`EarlyZip`].
    ///
    /// All sources must share one type; use [`BoxSource`](braid_core::BoxSource)
    /// to merge sources of different concrete types.
    ///
    /// See the [module-level documentation](crate::early_zip) for detailed behavior.
    fn early_zip<I>(self, others: I) -> EarlyZip<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut sources = vec![self];
        sources.extend(others);
        EarlyZip::from_non_empty(sources)
    }
}

impl<S> EarlyZipExt for S where S: Source + Unpin {}

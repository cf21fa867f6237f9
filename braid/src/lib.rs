// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Braid
//!
//! Round-robin merging of async sources that stops at the first exhausted source,
//! and a chunk limiter that caps a stream at a fixed number of chunks.
//!
//! ## Overview
//!
//! - [`Source`]: a pull-based producer that can be read one item at a time and
//!   cancelled with a [`CancelReason`]
//! - [`EarlyZip`]: reads one item per source per round, in index order, and
//!   releases every source once any of them ends, fails, or the consumer cancels
//! - [`LimitedExt::limited`]: forwards at most `size` chunks, then closes or fails
//!   with [`BraidError::LimitExceeded`]
//!
//! Every output stream yields [`StreamItem`]s, so failures travel in-band.
//!
//! ## Quick Start
//!
//! ```rust
//! use braid::prelude::*;
//! use futures::stream;
//! use std::num::NonZeroUsize;
//!
//! # #[tokio::main]
//! # async fn main() -> braid::Result<()> {
//! let capped = stream::iter((1..=100).map(StreamItem::Value))
//!     .limited(NonZeroUsize::new(2).unwrap(), LimitOptions::default())
//!     .into_fallible_source()
//!     .boxed();
//! let squares = stream::iter([1, 4, 9]).into_source().boxed();
//!
//! let merged = drain(capped.early_zip([squares])).await?;
//!
//! assert_eq!(merged, vec![1, 1, 2, 4]);
//! # Ok(())
//! # }
//! ```

pub use braid_core::{
    BoxSource, BraidError, CancelReason, IntoBraidError, IntoSource, Result, Source, SourceExt,
    StreamItem, StreamSource, ValueSource,
};
pub use braid_stream::{
    drain, CancelEarlyZip, EarlyZip, EarlyZipExt, Flow, LimitOptions, Limited, LimitedExt,
    LimitedTransform, Transform, TransformExt, TransformStream,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        drain, BraidError, CancelReason, EarlyZip, EarlyZipExt, IntoSource, LimitOptions,
        LimitedExt, Source, SourceExt, StreamItem, TransformExt,
    };
}

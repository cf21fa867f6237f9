// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stream operators over pull-based, backpressure-aware sources.
//!
//! # Operators
//!
//! - **[`early_zip`](EarlyZipExt::early_zip)**: interleaves one item from each of
//!   N [`Source`](braid_core::Source)s per round and ends the moment any of them
//!   ends, cancelling all of them together
//! - **[`limited`](LimitedExt::limited)**: forwards at most `size` chunks, then
//!   closes or fails with [`BraidError::LimitExceeded`](braid_core::BraidError::LimitExceeded)
//!
//! Both produce `Stream<Item = StreamItem<T>>`: a failure is delivered as the
//! last item, and every output is fused once it terminated.
//!
//! # Composition
//!
//! Outputs are plain streams, so they can be turned back into sources and fed to
//! another merger:
//!
//! ```rust
//! use braid_core::{IntoSource, SourceExt, StreamItem};
//! use braid_stream::{drain, EarlyZipExt, LimitOptions, LimitedExt};
//! use futures::stream;
//! use std::num::NonZeroUsize;
//!
//! # #[tokio::main]
//! # async fn main() -> braid_core::Result<()> {
//! let two = NonZeroUsize::new(2).unwrap();
//! let capped = stream::iter((1..=10).map(StreamItem::Value))
//!     .limited(two, LimitOptions::default())
//!     .into_fallible_source();
//! let tens = stream::iter(vec![10, 20, 30]).into_source().boxed();
//!
//! let merged = drain(capped.boxed().early_zip([tens])).await?;
//! assert_eq!(merged, vec![1, 10, 2, 20]);
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Nothing here spawns. Reads and cancellations are driven from the consumer's
//! own polls: reads strictly one after another, cancellations of a batch all at
//! once.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
mod drain;
pub mod early_zip;
pub mod limited;
pub mod transform;

pub use drain::drain;
pub use early_zip::{CancelEarlyZip, EarlyZip, EarlyZipExt};
pub use limited::{LimitOptions, Limited, LimitedExt, LimitedTransform};
pub use transform::{Flow, Transform, TransformExt, TransformStream};

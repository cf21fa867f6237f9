// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the braid workspace.
//!
//! Designed for development and testing only, not for production code.
//!
//! # Key Types
//!
//! - [`ScriptedSource`]: a [`Source`](braid_core::Source) replaying scripted
//!   reads, failures and pending polls, with a shared [`SourceLog`]
//! - [`test_channel`]: an unbounded channel whose receiving half is a stream of
//!   `StreamItem`s
//! - [`helpers`]: assertion helpers with timeouts
//!
//! # Example
//!
//! ```rust
//! use braid_core::SourceExt;
//! use braid_test_utils::{ScriptedSource, SourceLog};
//!
//! # #[tokio::main]
//! # async fn main() -> braid_core::Result<()> {
//! let log = SourceLog::new();
//! let mut source = ScriptedSource::new(0, ["x"], &log);
//!
//! assert_eq!(source.read().await?, Some("x"));
//! assert_eq!(source.read().await?, None);
//! assert_eq!(log.reads(0), 2);
//! # Ok(())
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod scripted_source;

use braid_core::StreamItem;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use helpers::{assert_no_element_emitted, assert_stream_ended, unwrap_stream};
pub use scripted_source::{CancelBehavior, ScriptedSource, SourceEvent, SourceLog, Step};

/// Creates a test channel that automatically wraps values in `StreamItem::Value`.
///
/// # Example
///
/// ```rust
/// use braid_test_utils::test_channel;
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel();
///
/// tx.send(42).unwrap();
///
/// let item = stream.next().await.unwrap().unwrap(); // Option -> StreamItem -> Value
/// assert_eq!(item, 42);
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts `StreamItem<T>` for testing error propagation.
///
/// # Example
///
/// ```rust
/// use braid_test_utils::test_channel_with_errors;
/// use braid_core::{StreamItem, BraidError};
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel_with_errors();
///
/// tx.send(StreamItem::Value(42)).unwrap();
/// tx.send(StreamItem::Error(BraidError::stream_error("test error"))).unwrap();
///
/// assert!(stream.next().await.unwrap().is_value());
/// assert!(stream.next().await.unwrap().is_error());
/// # }
/// ```
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}

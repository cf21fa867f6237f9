// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core traits and types shared by the braid crates.
//!
//! - [`Source`]: a pull-based sequence with explicit early release
//! - [`StreamItem`]: value-or-error item type of every output stream
//! - [`BraidError`]: root error type
//! - [`CancelReason`]: why a source was released

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod cancel_reason;
pub mod error;
pub mod source;
pub mod stream_item;
pub mod stream_source;

pub use self::cancel_reason::CancelReason;
pub use self::error::{BraidError, IntoBraidError, Result};
pub use self::source::{BoxSource, Source, SourceExt};
pub use self::stream_item::StreamItem;
pub use self::stream_source::{IntoSource, StreamSource, ValueSource};

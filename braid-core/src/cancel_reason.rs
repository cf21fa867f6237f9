// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;

/// Why a source is being released before it was fully drained.
///
/// The index carried by the merger-originated variants is the position of the
/// source in the list the merger was constructed with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// The source at `index` reached end-of-stream, ending the merge.
    SourceEnded {
        /// Index of the exhausted source
        index: usize,
    },
    /// Reading the source at `index` failed, aborting the merge.
    SourceFailed {
        /// Index of the failing source
        index: usize,
    },
    /// The consumer of the output cancelled it.
    Requested(String),
}

impl CancelReason {
    /// Reason supplied by a consumer cancelling an output stream.
    pub fn requested(reason: impl Into<String>) -> Self {
        Self::Requested(reason.into())
    }

    /// Index of the source that triggered the cancellation, if any.
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::SourceEnded { index } | Self::SourceFailed { index } => Some(*index),
            Self::Requested(_) => None,
        }
    }
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceEnded { index } => write!(f, "stream at index {index} ended"),
            Self::SourceFailed { index } => write!(f, "stream at index {index} failed"),
            Self::Requested(reason) => f.write_str(reason),
        }
    }
}

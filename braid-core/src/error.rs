// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for braid source composition
//!
//! Every failure that can surface from a source, a merger or a limiter is a
//! [`BraidError`]. Stream outputs carry it inside [`StreamItem::Error`](crate::StreamItem)
//! as their terminal item.
//!
//! # Examples
//!
//! ```
//! use braid_core::{BraidError, Result};
//!
//! fn check_limit(size: usize) -> Result<usize> {
//!     if size == 0 {
//!         return Err(BraidError::invalid_configuration("limit size must be positive"));
//!     }
//!     Ok(size)
//! }
//!
//! assert!(check_limit(0).is_err());
//! ```

/// Root error type for all braid operations
#[derive(Debug, thiserror::Error)]
pub enum BraidError {
    /// Stream processing encountered an error
    ///
    /// General failure for stream operations that don't fit another variant.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong
        context: String,
    },

    /// Custom error raised by a user-supplied source
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Several failures settled in the same cancellation batch
    #[error("Multiple errors occurred: {count} errors")]
    MultipleErrors {
        /// Number of errors that occurred
        count: usize,
        /// The individual errors, in source index order
        errors: Vec<BraidError>,
    },

    /// A limited stream received more chunks than it was allowed to forward
    #[error("Limit exceeded: more than {size} chunks")]
    LimitExceeded {
        /// The configured limit
        size: usize,
    },

    /// A source was read after it had been cancelled
    #[error("Source cancelled: {reason}")]
    SourceCancelled {
        /// The reason the source was released with
        reason: String,
    },

    /// A component was constructed with settings it cannot honour
    #[error("Invalid configuration: {context}")]
    InvalidConfiguration {
        /// Which setting was rejected
        context: String,
    },
}

impl BraidError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Create an invalid configuration error with the given context
    pub fn invalid_configuration(context: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Collapse the failures of one cancellation batch into a single error.
    ///
    /// Returns `None` for an empty batch, the error itself for a single failure
    /// and [`BraidError::MultipleErrors`] otherwise.
    ///
    /// ```
    /// use braid_core::BraidError;
    ///
    /// assert!(BraidError::aggregate(Vec::new()).is_none());
    ///
    /// let single = BraidError::aggregate(vec![BraidError::stream_error("a")]);
    /// assert!(matches!(single, Some(BraidError::StreamProcessingError { .. })));
    ///
    /// let many = BraidError::aggregate(vec![
    ///     BraidError::stream_error("a"),
    ///     BraidError::stream_error("b"),
    /// ]);
    /// assert!(matches!(many, Some(BraidError::MultipleErrors { count: 2, .. })));
    /// ```
    pub fn aggregate(mut errors: Vec<BraidError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            count => Some(Self::MultipleErrors { count, errors }),
        }
    }

    /// Check if this error was produced by the limiter's strict mode
    #[must_use]
    pub const fn is_limit_exceeded(&self) -> bool {
        matches!(self, Self::LimitExceeded { .. })
    }
}

/// Specialized Result type for braid operations
pub type Result<T> = std::result::Result<T, BraidError>;

/// Extension trait for converting errors into `BraidError`
///
/// Implemented for every `std::error::Error + Send + Sync + 'static`, so sources
/// can hand their native failures to a merger without a manual wrapper.
pub trait IntoBraidError {
    /// Convert this error into a `BraidError` with additional context
    fn into_braid_error(self, context: &str) -> BraidError;

    /// Convert this error into a `BraidError` without additional context
    fn into_braid(self) -> BraidError
    where
        Self: Sized,
    {
        self.into_braid_error("")
    }
}

impl<E: std::error::Error + Send + Sync + 'static> IntoBraidError for E {
    fn into_braid_error(self, context: &str) -> BraidError {
        if context.is_empty() {
            BraidError::user_error(self)
        } else {
            BraidError::stream_error(format!("{context}: {self}"))
        }
    }
}

impl Clone for BraidError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // Boxed user errors can't be cloned, keep their message
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {}", e),
            },
            Self::MultipleErrors { count, errors } => Self::MultipleErrors {
                count: *count,
                errors: errors.clone(),
            },
            Self::LimitExceeded { size } => Self::LimitExceeded { size: *size },
            Self::SourceCancelled { reason } => Self::SourceCancelled {
                reason: reason.clone(),
            },
            Self::InvalidConfiguration { context } => Self::InvalidConfiguration {
                context: context.clone(),
            },
        }
    }
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the rivulet event-stream engine
//!
//! [`RivuletError`] is the failure payload carried by [`StreamItem::Error`](crate::StreamItem)
//! and the error returned by the few fallible entry points (such as
//! [`PublishSubject::send`](crate::PublishSubject::send)).
//!
//! # Examples
//!
//! ```
//! use rivulet_core::{Result, RivuletError};
//!
//! fn parse_reading(raw: &str) -> Result<u32> {
//!     raw.parse()
//!         .map_err(|_| RivuletError::stream_error(format!("not a reading: {raw}")))
//! }
//!
//! assert!(parse_reading("abc").is_err());
//! ```

/// Root error type for all rivulet operations
#[derive(Debug, thiserror::Error)]
pub enum RivuletError {
    /// Stream processing encountered an error
    ///
    /// General failure raised by producers and operators that don't fit
    /// other specific categories.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// Custom error from user code
    ///
    /// Wraps errors produced by user-provided producers and callbacks,
    /// so they can travel through a stream as a failure event.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An event was pushed into a subject that already terminated
    #[error("Subject already terminated")]
    SubjectTerminated,
}

impl RivuletError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Returns `true` if the error was raised by user code.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::UserError(_))
    }
}

/// Specialized Result type for rivulet operations
pub type Result<T> = std::result::Result<T, RivuletError>;

impl Clone for RivuletError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // A boxed user error can't be cloned, keep its message
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {}", e),
            },
            Self::SubjectTerminated => Self::SubjectTerminated,
        }
    }
}

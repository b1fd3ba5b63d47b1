// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the `cep-rx` operators.
//!
//! [`CepError`] is the default failure type carried by [`StreamItem::Error`](crate::StreamItem)
//! and the error returned by the main-context plumbing.
//!
//! # Examples
//!
//! ```
//! use cep_core::{CepError, Result};
//!
//! fn touch_source_ready() -> Result<()> {
//!     Err(CepError::stream_error("touch source not attached"))
//! }
//!
//! assert!(touch_source_ready().is_err());
//! ```

/// Root error type for all `cep-rx` operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CepError {
    /// Stream processing encountered an error.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// The main execution context could not be set up.
    #[error("Main context error: {context}")]
    ContextError {
        /// What failed while setting up the context
        context: String,
    },

    /// The main execution context no longer accepts work.
    #[error("Main context is closed")]
    ContextClosed,
}

impl CepError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Create a main-context setup error with the given context
    pub fn context_error(context: impl Into<String>) -> Self {
        Self::ContextError {
            context: context.into(),
        }
    }
}

/// Specialized Result type for `cep-rx` operations
pub type Result<T> = std::result::Result<T, CepError>;

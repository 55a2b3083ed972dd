// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the Sluice stream-processing engine
//!
//! Every failure a pipeline can report is a variant of [`SluiceError`]. The
//! variants fall into four kinds (see [`ErrorKind`]), and the engine treats
//! each kind differently:
//!
//! - **Structural** errors describe a misconfigured pipeline (a stage appended
//!   after execution started, a stream executed twice, an invalid parameter).
//!   They are raised eagerly and never reach an error handler.
//! - **Data** errors come from user strategies while items flow. An installed
//!   error handler may skip the item or abort the run.
//! - **Contract** violations mean a pluggable strategy broke its contract, for
//!   example a discriminator returning a label that is not a string, an
//!   integer or a boolean. They are always fatal.
//! - **Resource** errors wrap I/O failures of producers.
//!
//! # Examples
//!
//! ```
//! use sluice_error::{SluiceError, Result};
//!
//! fn validate_chunk_size(size: usize) -> Result<usize> {
//!     if size == 0 {
//!         return Err(SluiceError::invalid_argument("chunk size must be at least 1"));
//!     }
//!     Ok(size)
//! }
//!
//! assert!(validate_chunk_size(0).unwrap_err().is_structural());
//! ```

/// Classification of a [`SluiceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Pipeline misconfiguration, detected before items flow
    Structural,
    /// Failure raised by user code while an item was handled
    Data,
    /// A pluggable strategy returned something outside its contract
    Contract,
    /// An external resource (reader, cursor) failed
    Resource,
}

/// Root error type for all Sluice operations
#[derive(Debug, thiserror::Error)]
pub enum SluiceError {
    /// A parameter was rejected while the pipeline was configured
    ///
    /// Raised for negative or zero sizes where at least one is required,
    /// empty ranges for random generators, comparators whose arity does not
    /// fit the requested mode, and similar.
    #[error("Invalid argument: {context}")]
    InvalidArgument {
        /// Which parameter was rejected and why
        context: String,
    },

    /// The operation chain can no longer be modified
    ///
    /// A chain is sealed once execution has started or a terminal stage has
    /// been appended.
    #[error("Operation chain is locked: {context}")]
    ChainLocked {
        /// What was attempted on the locked chain
        context: String,
    },

    /// The stream was already executed
    ///
    /// A stream runs its producer and chain at most once.
    #[error("Stream has already been executed")]
    AlreadyExecuted,

    /// Items would be routed back into the stream that is routing them
    #[error("Loop detected: {context}")]
    LoopDetected {
        /// Which routing stage closed the loop
        context: String,
    },

    /// A pluggable strategy broke its contract
    #[error("Contract violation: {context}")]
    ContractViolation {
        /// Description of the offending result
        context: String,
    },

    /// Stream processing encountered an error
    ///
    /// General data error for failures that do not originate in a foreign
    /// error type.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong while processing an item
        context: String,
    },

    /// Custom error from user code
    ///
    /// This wraps errors produced by user-provided strategies, allowing them
    /// to be propagated through the Sluice error system.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An I/O failure of a producer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SluiceError {
    /// Create an invalid argument error with the given context
    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Self::InvalidArgument {
            context: context.into(),
        }
    }

    /// Create a chain locked error with the given context
    pub fn chain_locked(context: impl Into<String>) -> Self {
        Self::ChainLocked {
            context: context.into(),
        }
    }

    /// Create a loop detected error with the given context
    pub fn loop_detected(context: impl Into<String>) -> Self {
        Self::LoopDetected {
            context: context.into(),
        }
    }

    /// Create a contract violation error with the given context
    pub fn contract_violation(context: impl Into<String>) -> Self {
        Self::ContractViolation {
            context: context.into(),
        }
    }

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

    /// The kind of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. }
            | Self::ChainLocked { .. }
            | Self::AlreadyExecuted
            | Self::LoopDetected { .. } => ErrorKind::Structural,
            Self::ContractViolation { .. } => ErrorKind::Contract,
            Self::StreamProcessingError { .. } | Self::UserError(_) => ErrorKind::Data,
            Self::Io(_) => ErrorKind::Resource,
        }
    }

    /// Check if this error describes a misconfigured pipeline
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self.kind(), ErrorKind::Structural)
    }

    /// Check if this error was raised by user code while handling an item
    ///
    /// Only data errors are offered to an installed error handler.
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::Data)
    }

    /// Check if this error is a strategy contract violation
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Contract)
    }
}

impl Clone for SluiceError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidArgument { context } => Self::invalid_argument(context.clone()),
            Self::ChainLocked { context } => Self::chain_locked(context.clone()),
            Self::AlreadyExecuted => Self::AlreadyExecuted,
            Self::LoopDetected { context } => Self::loop_detected(context.clone()),
            Self::ContractViolation { context } => Self::contract_violation(context.clone()),
            Self::StreamProcessingError { context } => Self::stream_error(context.clone()),
            // The boxed error can't be cloned; keep its message and kind
            Self::UserError(e) => Self::stream_error(format!("User error: {e}")),
            Self::Io(e) => Self::Io(std::io::Error::new(e.kind(), e.to_string())),
        }
    }
}

/// Specialized Result type for Sluice operations
///
/// # Examples
///
/// ```
/// use sluice_error::Result;
///
/// fn process() -> Result<String> {
///     Ok("processed".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, SluiceError>;

/// Extension trait for converting errors into `SluiceError`
///
/// Implemented for all types that implement
/// `std::error::Error + Send + Sync + 'static`.
pub trait IntoSluiceError {
    /// Convert this error into a `SluiceError` with additional context
    fn into_sluice_error(self, context: &str) -> SluiceError;

    /// Convert this error into a `SluiceError` without additional context
    fn into_sluice(self) -> SluiceError
    where
        Self: Sized,
    {
        self.into_sluice_error("")
    }
}

impl<E: std::error::Error + Send + Sync + 'static> IntoSluiceError for E {
    fn into_sluice_error(self, context: &str) -> SluiceError {
        if context.is_empty() {
            SluiceError::user_error(self)
        } else {
            SluiceError::stream_error(format!("{context}: {self}"))
        }
    }
}

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(SluiceError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(SluiceError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<SluiceError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| attach(e.into(), context.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| attach(e.into(), f()))
    }
}

// Only foreign user errors are rewrapped; engine errors keep their variant and kind.
fn attach(error: SluiceError, context: String) -> SluiceError {
    match error {
        SluiceError::UserError(inner) => SluiceError::StreamProcessingError {
            context: format!("{context}: {inner}"),
        },
        other => other,
    }
}

//! Core error type for texdiff operations
//!
//! Provides the main `CoreError` enum shared by the tokenizer, the change
//! taxonomy and the lexical diff engine.
//!
//! # Error Philosophy
//!
//! - Use `thiserror` for structured error handling (no `anyhow` in libraries)
//! - Carry the offending value (offset, change, revision) in the variant
//! - Distinguish caller bugs from recoverable input problems
//! - No retries: I/O failures abort the whole call

use core::fmt;
use thiserror::Error;

/// Main error type for texdiff core operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Tokenization errors (scanner lost track of the input)
    #[error("Tokenization error at character {position}: {message}")]
    Tokenization { position: usize, message: String },

    /// Reading a source text failed
    #[error("I/O error: {0}")]
    Io(String),

    /// A change was constructed with inconsistent fields
    #[error("Invalid change at position {position}: {message}")]
    InvalidChange { position: usize, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal consistency error (should not happen)
    #[error("Internal error: {0} (this is a bug, please report)")]
    Internal(String),
}

impl CoreError {
    /// Create tokenization error at a character offset
    pub fn tokenization<T: fmt::Display>(position: usize, message: T) -> Self {
        Self::Tokenization {
            position,
            message: message.to_string(),
        }
    }

    /// Create change validation error
    pub fn invalid_change<T: fmt::Display>(position: usize, message: T) -> Self {
        Self::InvalidChange {
            position,
            message: message.to_string(),
        }
    }

    /// Create configuration error
    pub fn config<T: fmt::Display>(message: T) -> Self {
        Self::Config(message.to_string())
    }

    /// Create internal error (indicates a bug)
    pub fn internal<T: fmt::Display>(message: T) -> Self {
        Self::Internal(message.to_string())
    }

    /// Check if error is recoverable
    ///
    /// I/O and configuration problems can be fixed by the caller and retried
    /// with different input; everything else indicates a defect.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) | Self::Config(_) => true,
            Self::Tokenization { .. } | Self::InvalidChange { .. } | Self::Internal(_) => false,
        }
    }

    /// Check if error indicates a bug in the library
    #[must_use]
    pub const fn is_internal_bug(&self) -> bool {
        matches!(self, Self::Internal(_) | Self::Tokenization { .. })
    }
}

/// Convert from standard I/O errors
impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(format!("{err}"))
    }
}

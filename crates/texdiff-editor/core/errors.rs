//! Error types for the texdiff-editor crate
//!
//! Provides the main `EditorError` enum that wraps `CoreError` from
//! texdiff-core and adds the cases of the attributed text and the
//! accumulation engine:
//! - Use thiserror for structured error handling (no anyhow)
//! - Carry the offending offset or revision index
//! - Edit positions are never clamped; a bad offset is reported

use core::fmt;
use texdiff_core::CoreError;
use thiserror::Error;

/// Main error type for texdiff-editor operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Errors from texdiff-core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Position out of bounds
    #[error("Position out of bounds: {position} (text length: {length})")]
    PositionOutOfBounds { position: usize, length: usize },

    /// Invalid text range
    #[error("Invalid range: start {start}, end {end} (text length: {length})")]
    InvalidRange {
        start: usize,
        end: usize,
        length: usize,
    },

    /// A revision could not be read
    #[error("Failed to read revision {index}: {message}")]
    RevisionRead { index: usize, message: String },

    /// The accumulation was cancelled between two steps
    #[error("Accumulation cancelled after {completed} step(s)")]
    Cancelled { completed: usize },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EditorError {
    /// Create a revision read error
    pub fn revision_read<T: fmt::Display>(index: usize, message: T) -> Self {
        Self::RevisionRead {
            index,
            message: message.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config<T: fmt::Display>(message: T) -> Self {
        Self::Config(message.to_string())
    }

    /// Check if error is recoverable
    ///
    /// Unreadable revisions, cancellation and configuration problems can be
    /// retried by the caller; position errors indicate a defect.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Core(core_err) => core_err.is_recoverable(),
            Self::RevisionRead { .. } | Self::Cancelled { .. } | Self::Config(_) => true,
            Self::PositionOutOfBounds { .. } | Self::InvalidRange { .. } => false,
        }
    }

    /// Check if this is a position-related error
    #[must_use]
    pub const fn is_position_error(&self) -> bool {
        matches!(
            self,
            Self::PositionOutOfBounds { .. } | Self::InvalidRange { .. }
        )
    }

    /// Get the underlying core error if this wraps one
    #[must_use]
    pub const fn as_core_error(&self) -> Option<&CoreError> {
        match self {
            Self::Core(core_err) => Some(core_err),
            _ => None,
        }
    }
}

/// Result type alias for editor operations
pub type Result<T> = core::result::Result<T, EditorError>;

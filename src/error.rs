//! Custom error types for flatledger
//!
//! This module defines the error hierarchy for the record store using
//! thiserror for ergonomic error definitions. Every variant is typed so the
//! presentation layer can map failures to user-facing messages without
//! inspecting text.

use thiserror::Error;

/// The main error type for record-store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// A file or directory required by a read or append path is missing
    #[error("File not found: {0}")]
    NotFound(String),

    /// `create()` was called on a path that already holds a file
    #[error("File already exists: {0}")]
    AlreadyExists(String),

    /// A row could not be decoded; tagged with file name and 1-based line
    #[error("Cannot parse {file}:{line} - {reason}")]
    Parse {
        file: String,
        line: u64,
        reason: String,
    },

    /// A record violates a domain invariant (e.g. non-positive savings balance)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Underlying read/write/copy failure
    #[error("I/O error: {0}")]
    Io(String),

    /// A rewrite failed and the backup could not be restored afterwards;
    /// the on-disk state may now be inconsistent
    #[error("Restore of {file} failed after write error ({write_error}): {restore_error}")]
    RestoreFailed {
        file: String,
        write_error: String,
        restore_error: String,
    },
}

impl StoreError {
    /// Create a parse error for a row of the given file
    pub fn parse(file: impl Into<String>, line: u64, reason: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for record-store operations
pub type StoreResult<T> = Result<T, StoreError>;

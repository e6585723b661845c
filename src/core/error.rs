//! Typed error handling for the table engine
//!
//! Filtering, searching and sorting never fail: missing columns pass
//! through and values that cannot be coerced are simply excluded. The
//! errors below only cover the edges of the engine where something outside
//! the data can go wrong.
//!
//! # Error Categories
//!
//! - [`EditError`]: Misuse of the filter editing session by the host
//! - [`PreferenceError`]: Failures of a preference store backend
//!
//! # Example
//!
//! ```rust,ignore
//! use rowsift::prelude::*;
//!
//! match session.mutate("status", FilterEdit::Select(None)) {
//!     Ok(()) => {}
//!     Err(EditError::UnknownColumn { column }) => {
//!         println!("No filter for {}", column);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The umbrella error type for the engine
#[derive(Debug, Error)]
pub enum TableError {
    /// Filter editing session misuse
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Preference store failures
    #[error(transparent)]
    Preference(#[from] PreferenceError),
}

impl TableError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            TableError::Edit(e) => e.error_code(),
            TableError::Preference(e) => e.error_code(),
        }
    }
}

// =============================================================================
// Edit Errors
// =============================================================================

/// Errors raised when a filter edit cannot be applied to the draft
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The session is not open
    #[error("filter session is not open")]
    NotOpen,

    /// The column has no filter entry in the draft model
    #[error("no filter defined for column '{column}'")]
    UnknownColumn { column: String },

    /// The edit targets a different filter kind than the column has
    #[error("cannot apply {edit} edit to {kind} filter on column '{column}'")]
    KindMismatch {
        column: String,
        kind: &'static str,
        edit: &'static str,
    },
}

impl EditError {
    pub fn error_code(&self) -> &'static str {
        match self {
            EditError::NotOpen => "SESSION_NOT_OPEN",
            EditError::UnknownColumn { .. } => "UNKNOWN_FILTER_COLUMN",
            EditError::KindMismatch { .. } => "FILTER_KIND_MISMATCH",
        }
    }
}

// =============================================================================
// Preference Errors
// =============================================================================

/// Errors related to preference store backends
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// Reading or writing the backing file failed
    #[error("preference file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not contain a JSON object of strings
    #[error("preference file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The store lock was poisoned by a panicking writer
    #[error("failed to acquire {0} lock on preference store")]
    Lock(&'static str),
}

impl PreferenceError {
    pub fn error_code(&self) -> &'static str {
        match self {
            PreferenceError::Io(_) => "PREFERENCE_IO_ERROR",
            PreferenceError::Malformed(_) => "PREFERENCE_MALFORMED",
            PreferenceError::Lock(_) => "PREFERENCE_LOCK_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_error_display() {
        let err = EditError::KindMismatch {
            column: "age".to_string(),
            kind: "range",
            edit: "toggle",
        };
        assert_eq!(
            err.to_string(),
            "cannot apply toggle edit to range filter on column 'age'"
        );
    }

    #[test]
    fn test_umbrella_error_codes() {
        let err: TableError = EditError::NotOpen.into();
        assert_eq!(err.error_code(), "SESSION_NOT_OPEN");

        let err: TableError = PreferenceError::Lock("read").into();
        assert_eq!(err.error_code(), "PREFERENCE_LOCK_ERROR");
        assert_eq!(
            err.to_string(),
            "failed to acquire read lock on preference store"
        );
    }
}

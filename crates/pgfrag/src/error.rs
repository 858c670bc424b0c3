//! Error types for pgfrag

use thiserror::Error;

/// Result type alias for pgfrag operations
pub type FragResult<T> = Result<T, FragError>;

/// Errors raised while building or composing fragments.
///
/// Most builders are total; only batch inserts, statement composition and
/// JSON/serde conversion can fail.
#[derive(Debug, Error)]
pub enum FragError {
    /// Batch insert called with no rows
    #[error("Batch insert requires at least one row")]
    EmptyBatch,

    /// A batch row does not share the first row's keys
    #[error("Row {row} keys {found:?} do not match first row keys {expected:?}")]
    MismatchedRowKeys {
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A fragment was built for a different start index than the statement expects
    #[error("Fragment starts at ${found} but statement expects ${expected}")]
    IndexMismatch { expected: usize, found: usize },

    /// Input that must be a JSON object was something else
    #[error("Expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FragError {
    /// Create a key mismatch error for a batch row
    pub fn mismatched_row_keys(
        row: usize,
        expected: impl IntoIterator<Item = impl Into<String>>,
        found: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::MismatchedRowKeys {
            row,
            expected: expected.into_iter().map(Into::into).collect(),
            found: found.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this is a batch validation error
    pub fn is_batch_error(&self) -> bool {
        matches!(self, Self::EmptyBatch | Self::MismatchedRowKeys { .. })
    }

    /// Check if this is an index mismatch error
    pub fn is_index_mismatch(&self) -> bool {
        matches!(self, Self::IndexMismatch { .. })
    }
}

impl From<serde_json::Error> for FragError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

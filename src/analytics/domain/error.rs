//! Error types for analytics domain validation.

use thiserror::Error;

/// Errors returned while constructing analytics domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalyticsDomainError {
    /// The question is empty after trimming.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// The schema descriptor holds no columns.
    #[error("schema descriptor must list at least one column")]
    EmptySchema,

    /// Two columns in the descriptor share a name.
    #[error("duplicate column name in schema descriptor: {0}")]
    DuplicateColumn(String),

    /// A column name is empty after trimming.
    #[error("column name must not be empty")]
    EmptyColumnName,

    /// A table identifier segment is empty after trimming.
    #[error("table identifier {0} segment must not be empty")]
    EmptyTableIdSegment(&'static str),

    /// A result row holds a different number of cells than the column list.
    #[error("result row has {actual} cells but the result set declares {expected} columns")]
    RowWidthMismatch {
        /// Number of columns declared by the result set.
        expected: usize,
        /// Number of cells in the offending row.
        actual: usize,
    },
}

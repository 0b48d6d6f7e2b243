//! Error types.
//!
//! Only structural problems are errors. Collisions and omissions found
//! while replaying a schedule are reported as
//! [`Violation`](crate::simulator::Violation) values, never as `Err`.

use thiserror::Error;

use crate::models::ActionId;

/// A table that cannot be turned into a shop floor.
///
/// `row` and `column` are 0-indexed positions in the input table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed input at row {row}, column {column}: {kind}")]
pub struct MalformedInputError {
    /// Offending row.
    pub row: usize,
    /// Offending column.
    pub column: usize,
    /// What is wrong with it.
    pub kind: MalformedKind,
}

/// Categories of malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedKind {
    /// The table has no rows at all.
    #[error("missing header row")]
    MissingHeader,
    /// The table has a header but no operations.
    #[error("missing data rows")]
    MissingDataRows,
    /// A row's cell count differs from the header's.
    #[error("expected {expected} columns, found {found}")]
    ColumnCount {
        /// Header width.
        expected: usize,
        /// Row width.
        found: usize,
    },
    /// A duration cell does not hold an integer.
    #[error("duration '{0}' is not an integer")]
    NotAnInteger(String),
    /// A duration cell holds a negative integer.
    #[error("duration {0} is negative")]
    NegativeDuration(i64),
    /// The first data row continues a job that was never named.
    #[error("continuation row with no preceding job")]
    OrphanContinuation,
}

impl MalformedInputError {
    pub(crate) fn new(row: usize, column: usize, kind: MalformedKind) -> Self {
        Self { row, column, kind }
    }
}

/// Failure while reading a table from an external source.
#[derive(Debug, Error)]
pub enum TableError {
    /// The source is not a JSON array of arrays.
    #[error("invalid table JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Malformed(#[from] MalformedInputError),
}

/// Failure while assigning start times.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    /// `min > max`.
    #[error("empty start window [{min}, {max}]")]
    EmptyWindow {
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
    },
    /// A strategy chose a start outside the window.
    #[error("start {start} for action {action} is outside [{min}, {max}]")]
    OutOfWindow {
        /// Action being placed.
        action: ActionId,
        /// Chosen start.
        start: i64,
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
    },
    /// `start + duration` does not fit in an `i64` tick.
    #[error("end of action {action} overflows: start {start} + duration {duration}")]
    EndOverflow {
        /// Action being placed.
        action: ActionId,
        /// Chosen start.
        start: i64,
        /// Action duration.
        duration: i64,
    },
    /// A fixed strategy ran out of start times.
    #[error("no start time left for action {action} ({provided} provided)")]
    Exhausted {
        /// Action being placed.
        action: ActionId,
        /// Number of start times the strategy held.
        provided: usize,
    },
}

/// Crate result alias for loader operations.
pub type LoadResult<T> = std::result::Result<T, MalformedInputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_position() {
        let err = MalformedInputError::new(
            3,
            4,
            MalformedKind::ColumnCount {
                expected: 7,
                found: 4,
            },
        );
        assert_eq!(
            err.to_string(),
            "malformed input at row 3, column 4: expected 7 columns, found 4"
        );
    }

    #[test]
    fn test_table_error_wraps_malformed() {
        let inner = MalformedInputError::new(0, 0, MalformedKind::MissingHeader);
        let err: TableError = inner.clone().into();
        assert!(matches!(err, TableError::Malformed(ref e) if *e == inner));
        assert_eq!(
            err.to_string(),
            "malformed input at row 0, column 0: missing header row"
        );
    }
}

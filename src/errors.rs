//! Errors
//!
//! Custom error types used throughout the `chisquare` crate.
use std::fmt;
use thiserror::Error;

/// Axis of a contingency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Reasons a contingency table is rejected at construction.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A cell holds a negative count.
    #[error("Value {value} at row {row}, column {column} is negative, all values must be greater or equal to 0.")]
    NegativeValue { row: usize, column: usize, value: f64 },
    /// A cell holds NaN or an infinite value.
    #[error("Value at row {row}, column {column} is not a finite number.")]
    NonFiniteValue { row: usize, column: usize },
    /// Number of data rows differs from the number of row labels.
    #[error("Expected {labels} rows of data to match the row labels, but {rows} were provided.")]
    RowCountMismatch { labels: usize, rows: usize },
    /// A data row has a different length than the number of column labels.
    #[error("Row {row} has {found} values, expected {expected} to match the column labels.")]
    ColumnCountMismatch { row: usize, expected: usize, found: usize },
    /// No rows or no columns were provided.
    #[error("The table needs at least one row and one column.")]
    EmptyTable,
    /// The same label was used twice on one axis.
    #[error("Duplicate {axis} label {label:?}.")]
    DuplicateLabel { axis: Axis, label: String },
}

/// Errors that can occur while running a chi-square test.
#[derive(Debug, Error)]
pub enum ChiSquareError {
    /// The contingency table is malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Significance level outside of (0, 1].
    #[error("Invalid significance level {0}, expected a value in (0, 1].")]
    InvalidSignificanceLevel(f64),
    /// Degrees of freedom not a positive integer.
    #[error("Invalid degrees of freedom {0}, expected a positive integer.")]
    InvalidDegreesOfFreedom(f64),
    /// The table is structurally valid, but no statistic is defined for it.
    #[error("Degenerate table: {0}")]
    DegenerateTable(String),
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
    /// Unable to write to file.
    #[error("Unable to write to file: {0}")]
    UnableToWrite(String),
    /// Unable to read from file.
    #[error("Unable to read from file {0}")]
    UnableToRead(String),
}

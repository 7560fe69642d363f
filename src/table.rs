//! Contingency Table
//!
//! Observed counts of an R x C cross tabulation, validated at construction
//! and immutable afterwards.
use crate::data::RowMajorMatrix;
use crate::errors::{Axis, ValidationError};
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

/// Raw description of a table, as handed in by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub data: Vec<Vec<f64>>,
}

/// Validated contingency table of non-negative counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableData", into = "TableData")]
pub struct ContingencyTable {
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    counts: RowMajorMatrix<f64>,
}

impl ContingencyTable {
    /// Create a new table.
    ///
    /// * `row_labels` - Unique label for each row.
    /// * `column_labels` - Unique label for each column.
    /// * `counts` - One vector per row, each holding one count per column.
    ///
    /// Values are checked first, then the row count, then each row's length,
    /// then that both axes are non-empty, and finally label uniqueness.
    pub fn new<S: Into<String>>(
        row_labels: Vec<S>,
        column_labels: Vec<S>,
        counts: Vec<Vec<f64>>,
    ) -> Result<Self, ValidationError> {
        let row_labels: Vec<String> = row_labels.into_iter().map(Into::into).collect();
        let column_labels: Vec<String> = column_labels.into_iter().map(Into::into).collect();

        for (i, row) in counts.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(ValidationError::NonFiniteValue { row: i, column: j });
                }
                if value < 0.0 {
                    return Err(ValidationError::NegativeValue { row: i, column: j, value });
                }
            }
        }

        if counts.len() != row_labels.len() {
            return Err(ValidationError::RowCountMismatch {
                labels: row_labels.len(),
                rows: counts.len(),
            });
        }

        if let Some((i, row)) = counts
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != column_labels.len())
        {
            return Err(ValidationError::ColumnCountMismatch {
                row: i,
                expected: column_labels.len(),
                found: row.len(),
            });
        }

        if row_labels.is_empty() || column_labels.is_empty() {
            return Err(ValidationError::EmptyTable);
        }

        check_unique(&row_labels, Axis::Row)?;
        check_unique(&column_labels, Axis::Column)?;

        Ok(ContingencyTable {
            counts: RowMajorMatrix::from_rows(&counts),
            row_labels,
            column_labels,
        })
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    /// The observed counts.
    pub fn counts(&self) -> &RowMajorMatrix<f64> {
        &self.counts
    }

    /// Observed count at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        *self.counts.get(i, j)
    }

    /// Observed counts of row `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        self.counts.row(i)
    }

    /// Row marginals in row order.
    pub fn row_totals_by_index(&self) -> Vec<f64> {
        self.counts.iter_rows().map(|r| r.iter().sum()).collect()
    }

    /// Column marginals in column order.
    pub fn column_totals_by_index(&self) -> Vec<f64> {
        (0..self.counts.cols)
            .map(|j| self.counts.col_iter(j).sum())
            .collect()
    }

    /// Row marginals keyed by row label.
    pub fn row_totals(&self) -> HashMap<String, f64> {
        self.row_labels
            .iter()
            .cloned()
            .zip(self.row_totals_by_index())
            .collect()
    }

    /// Column marginals keyed by column label.
    pub fn column_totals(&self) -> HashMap<String, f64> {
        self.column_labels
            .iter()
            .cloned()
            .zip(self.column_totals_by_index())
            .collect()
    }

    /// Sum of all cells.
    pub fn total(&self) -> f64 {
        self.counts.iter_rows().map(|r| r.iter().sum::<f64>()).sum()
    }

    /// Degrees of freedom, `(R - 1) * (C - 1)`.
    pub fn degrees_of_freedom(&self) -> usize {
        let (rows, cols) = self.shape();
        (rows - 1) * (cols - 1)
    }

    /// Number of rows and columns.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_labels.len(), self.column_labels.len())
    }
}

fn check_unique(labels: &[String], axis: Axis) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(labels.len());
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(ValidationError::DuplicateLabel {
                axis,
                label: label.clone(),
            });
        }
    }
    Ok(())
}

impl TryFrom<TableData> for ContingencyTable {
    type Error = ValidationError;

    fn try_from(value: TableData) -> Result<Self, Self::Error> {
        ContingencyTable::new(value.rows, value.columns, value.data)
    }
}

impl From<ContingencyTable> for TableData {
    fn from(value: ContingencyTable) -> Self {
        TableData {
            data: value.counts.to_rows(),
            rows: value.row_labels,
            columns: value.column_labels,
        }
    }
}

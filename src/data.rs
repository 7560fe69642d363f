use serde::{Deserialize, Serialize};
use std::fmt;

/// A lightweight row major matrix that owns its data.
///
/// Observed counts and derived cell values are both kept in
/// this container, one contiguous block per table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowMajorMatrix<T> {
    /// The raw data in row-major order.
    pub data: Vec<T>,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl<T> RowMajorMatrix<T> {
    /// Create a new RowMajorMatrix.
    pub fn new(data: Vec<T>, rows: usize, cols: usize) -> Self {
        RowMajorMatrix { data, rows, cols }
    }

    /// Get a single reference to an item in the matrix.
    ///
    /// * `i` - The ith row of the data to get.
    /// * `j` - the jth column of the data to get.
    pub fn get(&self, i: usize, j: usize) -> &T {
        &self.data[self.item_index(i, j)]
    }

    fn item_index(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    /// Get a row of the matrix as a slice.
    pub fn row(&self, i: usize) -> &[T] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterate over the rows of the matrix.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact panics on zero, an empty matrix simply has no rows.
        self.data.chunks_exact(self.cols.max(1))
    }

    /// Iterate over the items of column `j`, top to bottom.
    pub fn col_iter(&self, j: usize) -> impl Iterator<Item = &T> {
        self.data.iter().skip(j).step_by(self.cols.max(1))
    }

    /// Build a matrix of the same shape by applying `f` to each item with its position.
    pub fn map_indexed<U, F>(&self, mut f: F) -> RowMajorMatrix<U>
    where
        F: FnMut(usize, usize, &T) -> U,
    {
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(k, v)| f(k / self.cols, k % self.cols, v))
            .collect();
        RowMajorMatrix {
            data,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T: Clone> RowMajorMatrix<T> {
    /// Flatten a vector of equally sized rows.
    pub(crate) fn from_rows(rows: &[Vec<T>]) -> Self {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for r in rows {
            assert_eq!(r.len(), cols, "All rows must have the same length");
            data.extend_from_slice(r);
        }
        RowMajorMatrix {
            data,
            rows: rows.len(),
            cols,
        }
    }

    /// Copy the matrix into a vector of rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.iter_rows().map(|r| r.to_vec()).collect()
    }
}

impl<T: fmt::Display> fmt::Display for RowMajorMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut val = String::new();
        for i in 0..self.rows {
            for j in 0..self.cols {
                val.push_str(self.get(i, j).to_string().as_str());
                if j == (self.cols - 1) {
                    val.push('\n');
                } else {
                    val.push(' ');
                }
            }
        }
        write!(f, "{}", val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rowmatrix_get() {
        let v = vec![1, 2, 3, 5, 6, 7];
        let m = RowMajorMatrix::new(v, 2, 3);
        println!("{:?}", m);
        assert_eq!(m.get(0, 0), &1);
        assert_eq!(m.get(1, 0), &5);
        assert_eq!(m.get(0, 2), &3);
        assert_eq!(m.get(1, 1), &6);
    }

    #[test]
    fn test_rowmatrix_rows_and_cols() {
        let m = RowMajorMatrix::from_rows(&[vec![1, 2, 3], vec![5, 6, 7]]);
        assert_eq!(m.row(1), &[5, 6, 7]);
        assert_eq!(m.iter_rows().count(), 2);
        assert_eq!(m.col_iter(2).copied().collect::<Vec<_>>(), vec![3, 7]);
        assert_eq!(m.to_rows(), vec![vec![1, 2, 3], vec![5, 6, 7]]);
    }

    #[test]
    fn test_rowmatrix_map_indexed() {
        let m = RowMajorMatrix::new(vec![1, 2, 3, 4], 2, 2);
        let n = m.map_indexed(|i, j, v| v * 10 + (i * 2 + j) as i32);
        assert_eq!(n.data, vec![10, 21, 32, 43]);
        assert_eq!(format!("{}", n), "10 21\n32 43\n");
    }

    #[test]
    #[should_panic]
    fn test_rowmatrix_ragged_rows() {
        RowMajorMatrix::from_rows(&[vec![1, 2], vec![3]]);
    }
}

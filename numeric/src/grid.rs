use ndarray::{Array2, ArrayView2, s};
use serde::{Deserialize, Serialize};

use crate::{NumericErr, Result};

/// A rectangular, row-major matrix of scalars.
///
/// Images, kernels, feature maps and pooling inputs are all grids. The
/// rows of a grid always have the same length, which is enforced when a
/// grid is built from nested rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f32>>", into = "Vec<Vec<f32>>")]
pub struct Grid {
    cells: Array2<f32>,
}

impl Grid {
    /// Builds a grid from its rows.
    ///
    /// # Errors
    /// Returns `NumericErr::RaggedGrid` if any row's length differs from the first row's.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut flat = Vec::with_capacity(rows.len() * cols);

        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(NumericErr::RaggedGrid {
                    row,
                    got: values.len(),
                    expected: cols,
                });
            }

            flat.extend_from_slice(values);
        }

        let got = flat.len();
        let cells = Array2::from_shape_vec((rows.len(), cols), flat).map_err(|_| {
            NumericErr::SizeMismatch {
                a: "rows",
                b: "cells",
                got,
                expected: rows.len() * cols,
            }
        })?;

        Ok(Self { cells })
    }

    /// Returns a `rows × cols` grid filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            cells: Array2::zeros((rows, cols)),
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the value at `(row, col)`, if it is inside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.cells.get((row, col)).copied()
    }

    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.cells.view()
    }

    /// Iterates over the rows of the grid, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = Vec<f32>> + '_ {
        self.cells.rows().into_iter().map(|row| row.to_vec())
    }

    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.iter_rows().collect()
    }

    pub(crate) fn from_array(cells: Array2<f32>) -> Self {
        Self { cells }
    }
}

impl TryFrom<Vec<Vec<f32>>> for Grid {
    type Error = NumericErr;

    fn try_from(rows: Vec<Vec<f32>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

/// Fixed-size literals are rectangular by construction.
impl<const R: usize, const C: usize> From<[[f32; C]; R]> for Grid {
    fn from(rows: [[f32; C]; R]) -> Self {
        Self::from_array(Array2::from_shape_fn((R, C), |(i, j)| rows[i][j]))
    }
}

impl From<Grid> for Vec<Vec<f32>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

/// Surrounds `grid` with `padding` rings of zero-valued cells.
pub fn pad(grid: &Grid, padding: usize) -> Grid {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut padded = Array2::zeros((rows + 2 * padding, cols + 2 * padding));

    padded
        .slice_mut(s![padding..padding + rows, padding..padding + cols])
        .assign(&grid.cells);

    Grid::from_array(padded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_keeps_row_major_order() {
        let grid = Grid::from_rows(vec![vec![1., 2., 3.], vec![4., 5., 6.]]).unwrap();

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.get(0, 2), Some(3.));
        assert_eq!(grid.get(1, 0), Some(4.));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn from_literal_matches_from_rows() {
        let literal = Grid::from([[1., -1.], [-1., 1.]]);
        let rows = Grid::from_rows(vec![vec![1., -1.], vec![-1., 1.]]).unwrap();

        assert_eq!(literal, rows);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Grid::from_rows(vec![vec![1., 2.], vec![3.]]).unwrap_err();

        assert_eq!(
            err,
            NumericErr::RaggedGrid {
                row: 1,
                got: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn empty_grid() {
        let grid = Grid::from_rows(Vec::new()).unwrap();

        assert!(grid.is_empty());
        assert_eq!((grid.rows(), grid.cols()), (0, 0));
    }

    #[test]
    fn pad_surrounds_with_zeros() {
        let grid = Grid::from_rows(vec![vec![1., 2.], vec![3., 4.]]).unwrap();
        let padded = pad(&grid, 1);

        assert_eq!(
            padded.to_rows(),
            vec![
                vec![0., 0., 0., 0.],
                vec![0., 1., 2., 0.],
                vec![0., 3., 4., 0.],
                vec![0., 0., 0., 0.],
            ]
        );
    }

    #[test]
    fn pad_zero_is_identity() {
        let grid = Grid::from_rows(vec![vec![1., 2.], vec![3., 4.]]).unwrap();
        assert_eq!(pad(&grid, 0), grid);
    }
}

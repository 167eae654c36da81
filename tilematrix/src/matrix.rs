//! Index matrix and its C array literal form.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

/// Name of the array in the generated C literal
const ARRAY_NAME: &str = "map_array";

/// 2D grid of unique tile indices, indexed as `[row][col]` where row is the
/// tile's y position and col its x position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<usize>,
}

impl IndexMatrix {
    /// Zero-filled matrix of the given shape
    pub fn new(rows: usize, cols: usize) -> Self {
        IndexMatrix {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Build a matrix from existing rows, which must all have the same length
    pub fn from_rows(rows: Vec<Vec<usize>>) -> Result<Self, ConversionError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(ConversionError::Matrix("matrix has no cells".to_string()));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(ConversionError::Matrix(format!(
                "row {} has {} columns, expected {}",
                i,
                row.len(),
                cols
            )));
        }

        Ok(IndexMatrix {
            rows: rows.len(),
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: usize) {
        self.cells[row * self.cols + col] = value;
    }

    /// Iterate over the rows as slices
    pub fn iter_rows(&self) -> impl Iterator<Item = &[usize]> {
        // chunks(0) panics, and an empty matrix has no rows anyway
        self.cells.chunks(self.cols.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<usize>> {
        self.iter_rows().map(<[usize]>::to_vec).collect()
    }

    /// Render as `int map_array[R][C] = {{a, b},{c, d}};`
    pub fn to_c_array(&self) -> Result<String, ConversionError> {
        serialize_matrix(self)
    }
}

/// Render `matrix` as a C 2D array literal.
///
/// Values in a row are separated by `", "`, rows by `","`, with no trailing
/// separator after the last value or row.
pub fn serialize_matrix(matrix: &IndexMatrix) -> Result<String, ConversionError> {
    if matrix.is_empty() {
        return Err(ConversionError::Matrix(
            "cannot serialize a matrix with no cells; build the index matrix first".to_string(),
        ));
    }

    let body = matrix
        .iter_rows()
        .map(|row| format!("{{{}}}", row.iter().join(", ")))
        .join(",");

    Ok(format!(
        "int {}[{}][{}] = {{{}}};",
        ARRAY_NAME,
        matrix.rows(),
        matrix.cols(),
        body
    ))
}

/// Line-break a serialized matrix for pasting into source code.
///
/// Presentational only: puts each row on its own line and indents braces
/// with a tab.
pub fn prettify(c_array: &str) -> String {
    c_array
        .replace("},", "},\n")
        .replace("{{", "{\n{")
        .replace("}}", "}\n}")
        .replace('{', "\t{")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_uniform_2x2() {
        let matrix = IndexMatrix::new(2, 2);
        assert_eq!(
            serialize_matrix(&matrix).unwrap(),
            "int map_array[2][2] = {{0, 0},{0, 0}};"
        );
    }

    #[test]
    fn test_serialize_non_square_uses_rows_then_cols() {
        let matrix = IndexMatrix::from_rows(vec![vec![0, 1, 2], vec![3, 4, 5]]).unwrap();
        assert_eq!(
            matrix.to_c_array().unwrap(),
            "int map_array[2][3] = {{0, 1, 2},{3, 4, 5}};"
        );
    }

    #[test]
    fn test_serialize_single_cell() {
        let matrix = IndexMatrix::from_rows(vec![vec![7]]).unwrap();
        assert_eq!(matrix.to_c_array().unwrap(), "int map_array[1][1] = {{7}};");
    }

    #[test]
    fn test_serialize_empty_matrix_fails() {
        let matrix = IndexMatrix::new(0, 0);
        assert!(matches!(
            serialize_matrix(&matrix),
            Err(ConversionError::Matrix(_))
        ));
    }

    #[test]
    fn test_from_rows_rejects_ragged_and_empty() {
        assert!(matches!(
            IndexMatrix::from_rows(vec![vec![0, 1], vec![2]]),
            Err(ConversionError::Matrix(_))
        ));
        assert!(matches!(
            IndexMatrix::from_rows(Vec::new()),
            Err(ConversionError::Matrix(_))
        ));
        assert!(matches!(
            IndexMatrix::from_rows(vec![Vec::new()]),
            Err(ConversionError::Matrix(_))
        ));
    }

    #[test]
    fn test_get_and_set() {
        let mut matrix = IndexMatrix::new(2, 3);
        matrix.set(1, 2, 9);
        assert_eq!(matrix.get(1, 2), Some(9));
        assert_eq!(matrix.get(0, 0), Some(0));
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.to_rows(), vec![vec![0, 0, 0], vec![0, 0, 9]]);
    }

    #[test]
    fn test_prettify() {
        let pretty = prettify("int map_array[2][2] = {{0, 1},{1, 1}};");
        assert_eq!(
            pretty,
            "int map_array[2][2] = \t{\n\t{0, 1},\n\t{1, 1}\n};"
        );
    }
}

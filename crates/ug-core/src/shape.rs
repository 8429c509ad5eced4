//! Rotation of rectangular matrices in quarter turns
//!
//! Item footprints and their background anchor grids are both rotated with
//! the same routine, so the cell type is left generic.

/// Rotate `matrix` clockwise by `times` quarter turns (taken modulo 4).
///
/// The input is left untouched. An R×C matrix becomes C×R after an odd
/// number of turns. Ragged input is squared off to the width of its first
/// row: longer rows are cut and shorter rows padded with `T::default()`.
pub fn rotate_90_clockwise<T: Clone + Default>(matrix: &[Vec<T>], times: u32) -> Vec<Vec<T>> {
    let (cols, _) = dimensions(matrix);
    let mut rotated: Vec<Vec<T>> = matrix
        .iter()
        .map(|row| (0..cols).map(|j| row.get(j).cloned().unwrap_or_default()).collect())
        .collect();
    for _ in 0..times % 4 {
        rotated = rotate_once(&rotated);
    }
    rotated
}

fn rotate_once<T: Clone>(matrix: &[Vec<T>]) -> Vec<Vec<T>> {
    let rows = matrix.len();
    let cols = matrix.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    // new[j][rows - 1 - i] = old[i][j]
    (0..cols)
        .map(|j| (0..rows).rev().map(|i| matrix[i][j].clone()).collect())
        .collect()
}

/// Width and height of a matrix, as (columns, rows).
pub fn dimensions<T>(matrix: &[Vec<T>]) -> (usize, usize) {
    (matrix.first().map_or(0, Vec::len), matrix.len())
}

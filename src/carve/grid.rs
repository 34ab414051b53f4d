//! Shrinkable 2D grid backing the working buffer and origin map.
//!
//! The backing allocation keeps the stride of the session's first shape;
//! removals compact cells in place and shrink the active rectangle, so no
//! reallocation happens while carving.

use crate::util::{SeamCarveError, SeamCarveResult};

/// Coordinate of a pixel in the original, uncarved image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    /// Creates a coordinate from column `x` and row `y`.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Row-major grid with an active `width x height` rectangle at the origin.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    data: Vec<T>,
    stride: usize,
    width: usize,
    height: usize,
}

impl<T: Copy> Grid<T> {
    /// Builds a grid from contiguous row-major data.
    pub fn from_vec(data: Vec<T>, width: usize, height: usize) -> SeamCarveResult<Self> {
        let needed = width
            .checked_mul(height)
            .ok_or(SeamCarveError::InvalidDimensions { width, height })?;
        if width == 0 || height == 0 {
            return Err(SeamCarveError::InvalidDimensions { width, height });
        }
        if data.len() != needed {
            return Err(SeamCarveError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            stride: width,
            width,
            height,
        })
    }

    /// Builds a grid filled with `value`.
    pub(crate) fn filled(value: T, width: usize, height: usize) -> SeamCarveResult<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(SeamCarveError::InvalidDimensions { width, height })?;
        Self::from_vec(vec![value; len], width, height)
    }

    /// Active width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Active height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at `(x, y)` without checking the active rectangle.
    ///
    /// Outside callers use [`Grid::get`].
    #[inline]
    pub(crate) fn at(&self, x: usize, y: usize) -> T {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.stride + x]
    }

    /// Returns the cell at `(x, y)` if it is inside the active rectangle.
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.at(x, y))
    }

    #[inline]
    pub(crate) fn set(&mut self, x: usize, y: usize, value: T) {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.stride + x] = value;
    }

    /// Returns the active part of row `y`.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.stride;
        self.data.get(start..start + self.width)
    }

    /// Copies the active rectangle into contiguous row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            let start = y * self.stride;
            out.extend_from_slice(&self.data[start..start + self.width]);
        }
        out
    }

    /// Deletes column `cols[y]` from every row `y`, shifting the tail left.
    ///
    /// Returns the deleted cells in row order.
    pub(crate) fn remove_column_per_row(&mut self, cols: &[usize]) -> SeamCarveResult<Vec<T>> {
        if self.width < 2 {
            return Err(SeamCarveError::InternalInvariant(
                "cannot remove a column from a single-column buffer",
            ));
        }
        if cols.len() != self.height {
            return Err(SeamCarveError::InternalInvariant(
                "vertical seam length differs from buffer height",
            ));
        }
        if cols.iter().any(|&c| c >= self.width) {
            return Err(SeamCarveError::InternalInvariant(
                "vertical seam leaves the active rectangle",
            ));
        }
        let mut removed = Vec::with_capacity(self.height);
        for (y, &c) in cols.iter().enumerate() {
            let start = y * self.stride;
            let row = &mut self.data[start..start + self.width];
            removed.push(row[c]);
            row.copy_within(c + 1.., c);
        }
        self.width -= 1;
        Ok(removed)
    }

    /// Deletes row `rows[x]` from every column `x`, shifting the tail up.
    ///
    /// Returns the deleted cells in column order.
    pub(crate) fn remove_row_per_column(&mut self, rows: &[usize]) -> SeamCarveResult<Vec<T>> {
        if self.height < 2 {
            return Err(SeamCarveError::InternalInvariant(
                "cannot remove a row from a single-row buffer",
            ));
        }
        if rows.len() != self.width {
            return Err(SeamCarveError::InternalInvariant(
                "horizontal seam length differs from buffer width",
            ));
        }
        if rows.iter().any(|&r| r >= self.height) {
            return Err(SeamCarveError::InternalInvariant(
                "horizontal seam leaves the active rectangle",
            ));
        }
        let mut removed = Vec::with_capacity(self.width);
        for (x, &r) in rows.iter().enumerate() {
            removed.push(self.data[r * self.stride + x]);
            for y in r..self.height - 1 {
                self.data[y * self.stride + x] = self.data[(y + 1) * self.stride + x];
            }
        }
        self.height -= 1;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: usize, height: usize) -> Grid<usize> {
        Grid::from_vec((0..width * height).collect(), width, height).unwrap()
    }

    #[test]
    fn column_removal_compacts_rows() {
        let mut grid = numbered(3, 2);
        let removed = grid.remove_column_per_row(&[0, 2]).unwrap();
        assert_eq!(removed, vec![0, 5]);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn row_removal_compacts_columns() {
        let mut grid = numbered(2, 3);
        let removed = grid.remove_row_per_column(&[1, 0]).unwrap();
        assert_eq!(removed, vec![2, 1]);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.to_vec(), vec![0, 3, 4, 5]);
    }

    #[test]
    fn removal_from_minimum_size_is_an_invariant_violation() {
        let mut grid = numbered(1, 2);
        assert!(matches!(
            grid.remove_column_per_row(&[0, 0]),
            Err(SeamCarveError::InternalInvariant(_))
        ));
        assert_eq!(grid.width(), 1);
    }
}

//! Forward-energy dynamic programming over the working buffer.
//!
//! The recurrence is written once in terms of an *along* axis (rows for
//! vertical seams, columns for horizontal seams) and an *across* axis. For a
//! cell at `(along = i, across = j)`:
//!
//! ```text
//! cost[0][j] = energy[0][j]
//! cost[i][j] = energy[i][j] + min(
//!     cost[i-1][j-1] + base + |I[i-1][j] - I[i][j-1]|   if j > 0      (Left)
//!     cost[i-1][j]   + base                                           (Up)
//!     cost[i-1][j+1] + base + |I[i-1][j] - I[i][j+1]|   if j < n - 1  (Right))
//! base = |I[i][j-1] - I[i][j+1]|
//! ```
//!
//! At either end of the across axis the missing neighbour in `base` is the
//! cell itself. Ties go to `Up`, then `Left`, then `Right`.

use crate::carve::energy::EnergyField;
use crate::carve::grid::Grid;
use crate::carve::seam::Orientation;
use crate::util::SeamCarveResult;

/// Where a cell's cheapest predecessor sits, relative to the cell's across
/// index, on the previous along line.
///
/// For horizontal seams `Left` is the row above and `Right` the row below.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    Left,
    #[default]
    Up,
    Right,
}

impl Direction {
    /// Across-axis step taken when backtracking through this direction.
    #[inline]
    pub fn offset(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Up => 0,
            Direction::Right => 1,
        }
    }

    #[inline]
    pub(crate) fn apply(self, across: usize) -> usize {
        match self {
            Direction::Left => across - 1,
            Direction::Up => across,
            Direction::Right => across + 1,
        }
    }
}

/// Maps `(along, across)` to `(x, y)` for an orientation.
#[inline]
pub(crate) fn to_xy(orientation: Orientation, along: usize, across: usize) -> (usize, usize) {
    match orientation {
        Orientation::Vertical => (across, along),
        Orientation::Horizontal => (along, across),
    }
}

/// Cumulative costs and backtrack directions for one seam extraction.
#[derive(Clone, Debug)]
pub struct CostMatrix {
    orientation: Orientation,
    cost: Grid<f64>,
    back: Grid<Direction>,
}

impl CostMatrix {
    /// Fills the matrix for `orientation` from fresh energies and the
    /// intensities they were computed from.
    pub fn fill(
        energy: &EnergyField,
        intensities: &Grid<u8>,
        orientation: Orientation,
    ) -> SeamCarveResult<Self> {
        let (width, height) = (intensities.width(), intensities.height());
        let mut cost = Grid::filled(0.0f64, width, height)?;
        let mut back = Grid::filled(Direction::Up, width, height)?;
        let (along_len, across_len) = match orientation {
            Orientation::Vertical => (height, width),
            Orientation::Horizontal => (width, height),
        };

        let px = |along: usize, across: usize| {
            let (x, y) = to_xy(orientation, along, across);
            i32::from(intensities.at(x, y))
        };

        for j in 0..across_len {
            let (x, y) = to_xy(orientation, 0, j);
            cost.set(x, y, energy.energy_at(y, x));
        }

        for i in 1..along_len {
            for j in 0..across_len {
                let lo = j.saturating_sub(1);
                let hi = if j + 1 < across_len { j + 1 } else { j };
                let base = f64::from((px(i, lo) - px(i, hi)).abs());
                let above = px(i - 1, j);
                let prev = |k: usize| {
                    let (x, y) = to_xy(orientation, i - 1, k);
                    cost.at(x, y)
                };

                let mut best = prev(j) + base;
                let mut dir = Direction::Up;
                if j > 0 {
                    let left = prev(j - 1) + base + f64::from((above - px(i, j - 1)).abs());
                    if left < best {
                        best = left;
                        dir = Direction::Left;
                    }
                }
                if j + 1 < across_len {
                    let right = prev(j + 1) + base + f64::from((above - px(i, j + 1)).abs());
                    if right < best {
                        best = right;
                        dir = Direction::Right;
                    }
                }

                let (x, y) = to_xy(orientation, i, j);
                cost.set(x, y, energy.energy_at(y, x) + best);
                back.set(x, y, dir);
            }
        }

        Ok(Self {
            orientation,
            cost,
            back,
        })
    }

    /// Returns the seam orientation the matrix was filled for.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the matrix width in cells.
    pub fn width(&self) -> usize {
        self.cost.width()
    }

    /// Returns the matrix height in cells.
    pub fn height(&self) -> usize {
        self.cost.height()
    }

    /// Cumulative cost at `(x, y)`.
    #[inline]
    pub fn cost_at(&self, x: usize, y: usize) -> f64 {
        self.cost.at(x, y)
    }

    /// Backtrack direction at `(x, y)`.
    #[inline]
    pub fn back_at(&self, x: usize, y: usize) -> Direction {
        self.back.at(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(data: &[u8], width: usize, height: usize, orientation: Orientation) -> CostMatrix {
        let grid = Grid::from_vec(data.to_vec(), width, height).unwrap();
        let energy = EnergyField::compute(&grid).unwrap();
        CostMatrix::fill(&energy, &grid, orientation).unwrap()
    }

    #[test]
    fn first_line_is_seeded_with_energy() {
        let data = [0, 40, 80, 120, 0, 40];
        let grid = Grid::from_vec(data.to_vec(), 3, 2).unwrap();
        let energy = EnergyField::compute(&grid).unwrap();
        let m = CostMatrix::fill(&energy, &grid, Orientation::Vertical).unwrap();
        for x in 0..3 {
            assert_eq!(m.cost_at(x, 0), energy.energy_at(0, x));
        }
        let m = CostMatrix::fill(&energy, &grid, Orientation::Horizontal).unwrap();
        for y in 0..2 {
            assert_eq!(m.cost_at(0, y), energy.energy_at(y, 0));
        }
    }

    #[test]
    fn ties_prefer_straight_up() {
        let m = fill(&[7; 9], 3, 3, Orientation::Vertical);
        for y in 1..3 {
            for x in 0..3 {
                assert_eq!(m.back_at(x, y), Direction::Up);
                assert_eq!(m.cost_at(x, y), 0.0);
            }
        }
    }

    #[test]
    fn equal_diagonals_prefer_left() {
        //   0  0  0
        //   0 50  0
        // Row 0 energy is 0, 35.4, 0; both diagonals into (1, 1) cost 0.
        let m = fill(&[0, 0, 0, 0, 50, 0], 3, 2, Orientation::Vertical);
        assert_eq!(m.back_at(1, 1), Direction::Left);
        assert_eq!(m.back_at(0, 1), Direction::Up);
    }

    #[test]
    fn boundary_base_reuses_single_neighbour() {
        // Row 1 at x = 0 has only a right neighbour: base = |10 - 50| = 40.
        let data = [0, 0, 10, 50];
        let grid = Grid::from_vec(data.to_vec(), 2, 2).unwrap();
        let energy = EnergyField::compute(&grid).unwrap();
        let m = CostMatrix::fill(&energy, &grid, Orientation::Vertical).unwrap();
        let up = m.cost_at(0, 0) + 40.0;
        let right = m.cost_at(1, 0) + 40.0 + 50.0;
        assert_eq!(m.cost_at(0, 1), energy.energy_at(1, 0) + up.min(right));
    }

    #[test]
    fn horizontal_fill_is_the_transpose() {
        let data = [3, 90, 14, 200, 5, 60, 120, 33, 7, 250, 18, 44];
        let transposed: Vec<u8> = (0..4)
            .flat_map(|x| (0..3).map(move |y| (x, y)))
            .map(|(x, y)| data[y * 4 + x])
            .collect();
        let h = fill(&data, 4, 3, Orientation::Horizontal);
        let v = fill(&transposed, 3, 4, Orientation::Vertical);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(h.cost_at(x, y), v.cost_at(y, x));
                assert_eq!(h.back_at(x, y), v.back_at(y, x));
            }
        }
    }
}

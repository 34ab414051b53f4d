//! Seams and minimum-seam tracing.

use crate::carve::cost::{to_xy, CostMatrix};
use crate::util::{SeamCarveError, SeamCarveResult};

/// Which way a seam runs through the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Top to bottom, one pixel per row; removing it narrows the image.
    Vertical,
    /// Left to right, one pixel per column; removing it shortens the image.
    Horizontal,
}

/// A connected path of working-buffer positions.
///
/// `positions[i]` is the column at row `i` for vertical seams, or the row at
/// column `i` for horizontal seams.
#[derive(Clone, Debug, PartialEq)]
pub struct Seam {
    orientation: Orientation,
    positions: Vec<usize>,
    cost: f64,
}

impl Seam {
    /// Returns which way the seam runs.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Across-axis positions, ordered top-to-bottom or left-to-right.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Terminal cumulative cost of the seam.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Returns the number of pixels in the seam.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if the seam covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterates the seam as `(x, y)` working-buffer coordinates.
    pub fn points(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let orientation = self.orientation;
        self.positions
            .iter()
            .enumerate()
            .map(move |(along, &across)| to_xy(orientation, along, across))
    }
}

/// Traces the minimum-cost seam through a filled cost matrix.
///
/// The terminal line is scanned in increasing index order and only a strictly
/// smaller cost replaces the current best.
pub fn trace_seam(costs: &CostMatrix) -> SeamCarveResult<Seam> {
    let orientation = costs.orientation();
    let (along_len, across_len) = match orientation {
        Orientation::Vertical => (costs.height(), costs.width()),
        Orientation::Horizontal => (costs.width(), costs.height()),
    };
    if along_len == 0 || across_len == 0 {
        return Err(SeamCarveError::InternalInvariant(
            "cost matrix has no terminal line",
        ));
    }

    let last = along_len - 1;
    let terminal = |j: usize| {
        let (x, y) = to_xy(orientation, last, j);
        costs.cost_at(x, y)
    };
    let mut idx = 0;
    let mut min = terminal(0);
    for j in 1..across_len {
        let c = terminal(j);
        if c < min {
            min = c;
            idx = j;
        }
    }

    let mut positions = Vec::with_capacity(along_len);
    for i in (0..along_len).rev() {
        positions.push(idx);
        let (x, y) = to_xy(orientation, i, idx);
        idx = costs.back_at(x, y).apply(idx);
    }
    positions.reverse();

    Ok(Seam {
        orientation,
        positions,
        cost: min,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carve::energy::EnergyField;
    use crate::carve::grid::Grid;

    fn seam(data: &[u8], width: usize, height: usize, orientation: Orientation) -> Seam {
        let grid = Grid::from_vec(data.to_vec(), width, height).unwrap();
        let energy = EnergyField::compute(&grid).unwrap();
        let costs = CostMatrix::fill(&energy, &grid, orientation).unwrap();
        trace_seam(&costs).unwrap()
    }

    #[test]
    fn uniform_image_takes_first_column() {
        let s = seam(&[128; 16], 4, 4, Orientation::Vertical);
        assert_eq!(s.positions(), &[0, 0, 0, 0]);
        assert_eq!(s.cost(), 0.0);
    }

    #[test]
    fn uniform_image_takes_first_row() {
        let s = seam(&[128; 12], 4, 3, Orientation::Horizontal);
        assert_eq!(s.positions(), &[0, 0, 0, 0]);
        let points: Vec<_> = s.points().collect();
        assert_eq!(points, vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn seam_on_banded_image_is_connected() {
        // Dark diagonal band in a bright field.
        let data = [
            0, 0, 255, 255, 255, //
            255, 0, 0, 255, 255, //
            255, 255, 0, 0, 255, //
            255, 255, 255, 0, 0, //
        ];
        let s = seam(&data, 5, 4, Orientation::Vertical);
        assert_eq!(s.len(), 4);
        for pair in s.positions().windows(2) {
            assert!(pair[0].abs_diff(pair[1]) <= 1);
        }
    }
}

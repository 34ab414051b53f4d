//! Per-pixel energy of the working intensity buffer.
//!
//! Each cell is compared with its following neighbour along both axes (the
//! preceding one on the last row/column), and the energy is
//! `sqrt((dy^2 + dx^2) / 2)`. The halving keeps the range at `[0, 255]`.

use crate::carve::grid::Grid;
use crate::gray::{grayscale, GrayscaleSampler};
use crate::image::{ImageView, OwnedImage, Rgb};
use crate::util::SeamCarveResult;

/// Energies of the active rectangle of a working buffer.
#[derive(Clone, Debug)]
pub struct EnergyField {
    values: Grid<f64>,
}

#[inline]
fn neighbour(i: usize, len: usize) -> usize {
    if i + 1 < len {
        i + 1
    } else {
        // Extent-1 axes compare the cell with itself.
        i.saturating_sub(1)
    }
}

impl EnergyField {
    /// Computes the energy of every active cell of `intensities`.
    pub fn compute(intensities: &Grid<u8>) -> SeamCarveResult<Self> {
        let (width, height) = (intensities.width(), intensities.height());
        let mut values = Grid::filled(0.0f64, width, height)?;
        for y in 0..height {
            let ny = neighbour(y, height);
            for x in 0..width {
                let nx = neighbour(x, width);
                let here = f64::from(intensities.at(x, y));
                let dy = f64::from(intensities.at(x, ny)) - here;
                let dx = f64::from(intensities.at(nx, y)) - here;
                values.set(x, y, ((dy * dy + dx * dx) / 2.0).sqrt());
            }
        }
        Ok(Self { values })
    }

    /// Energy at row `y`, column `x`.
    #[inline]
    pub fn energy_at(&self, y: usize, x: usize) -> f64 {
        self.values.at(x, y)
    }

    /// Returns the field width in cells.
    pub fn width(&self) -> usize {
        self.values.width()
    }

    /// Returns the field height in cells.
    pub fn height(&self) -> usize {
        self.values.height()
    }

    /// Returns the energies in row-major order.
    pub fn to_vec(&self) -> Vec<f64> {
        self.values.to_vec()
    }
}

/// Renders the energy of `image` as an 8-bit gradient-magnitude image.
///
/// Values are truncated toward zero.
pub fn gradient_magnitude<S: GrayscaleSampler + ?Sized>(
    image: ImageView<'_, Rgb>,
    sampler: &S,
) -> SeamCarveResult<OwnedImage<u8>> {
    let (width, height) = (image.width(), image.height());
    let gray = Grid::from_vec(grayscale(image, sampler), width, height)?;
    let field = EnergyField::compute(&gray)?;
    let data = field
        .to_vec()
        .into_iter()
        .map(|e| e.min(255.0) as u8)
        .collect();
    OwnedImage::new(data, width, height)
}

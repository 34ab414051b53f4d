//! Grayscale sampling of RGB input.
//!
//! The carving engine only ever sees one intensity per pixel. It asks a
//! [`GrayscaleSampler`] for it once per pixel when a session starts; the
//! working buffer then carries those intensities through every removal.

use crate::image::{ImageView, Rgb};
use crate::util::{SeamCarveError, SeamCarveResult};

/// Maps a pixel of the input image to an intensity in `[0, 255]`.
///
/// Implementations must be pure: the same pixel always yields the same value.
pub trait GrayscaleSampler {
    /// Samples the intensity at `(x, y)`; callers guarantee the bounds.
    fn sample(&self, image: ImageView<'_, Rgb>, x: usize, y: usize) -> u8;
}

/// Integer channel weights for a weighted-average grayscale conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RgbWeights {
    red: u32,
    green: u32,
    blue: u32,
}

impl RgbWeights {
    /// Creates weights; at least one channel must be non-zero.
    pub fn new(red: u32, green: u32, blue: u32) -> SeamCarveResult<Self> {
        let sum = red
            .checked_add(green)
            .and_then(|v| v.checked_add(blue))
            .ok_or(SeamCarveError::InvalidWeights {
                reason: "weight sum overflows",
            })?;
        if sum == 0 {
            return Err(SeamCarveError::InvalidWeights {
                reason: "weights sum to zero",
            });
        }
        if sum > u32::MAX / 255 {
            return Err(SeamCarveError::InvalidWeights {
                reason: "weight sum overflows",
            });
        }
        Ok(Self { red, green, blue })
    }

    /// Returns the sum of all channel weights.
    pub fn sum(&self) -> u32 {
        self.red + self.green + self.blue
    }

    /// Converts one pixel to its weighted gray value.
    pub fn luma(&self, pixel: Rgb) -> u8 {
        let weighted = self.red * u32::from(pixel[0])
            + self.green * u32::from(pixel[1])
            + self.blue * u32::from(pixel[2]);
        (weighted / self.sum()) as u8
    }
}

impl Default for RgbWeights {
    fn default() -> Self {
        Self {
            red: 1,
            green: 1,
            blue: 1,
        }
    }
}

impl GrayscaleSampler for RgbWeights {
    fn sample(&self, image: ImageView<'_, Rgb>, x: usize, y: usize) -> u8 {
        image.get(x, y).map_or(0, |p| self.luma(*p))
    }
}

impl<F> GrayscaleSampler for F
where
    F: Fn(Rgb) -> u8,
{
    fn sample(&self, image: ImageView<'_, Rgb>, x: usize, y: usize) -> u8 {
        image.get(x, y).map_or(0, |p| self(*p))
    }
}

/// Samples every pixel of `image` into a row-major intensity buffer.
pub fn grayscale<S: GrayscaleSampler + ?Sized>(image: ImageView<'_, Rgb>, sampler: &S) -> Vec<u8> {
    let mut out = Vec::with_capacity(image.width() * image.height());
    for y in 0..image.height() {
        for x in 0..image.width() {
            out.push(sampler.sample(image, x, y));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_luma_truncates() {
        let w = RgbWeights::new(1, 2, 1).unwrap();
        assert_eq!(w.luma([10, 20, 31]), (10 + 40 + 31) / 4);
        assert_eq!(RgbWeights::default().luma([255, 255, 255]), 255);
    }

    #[test]
    fn zero_weights_are_rejected() {
        assert_eq!(
            RgbWeights::new(0, 0, 0),
            Err(SeamCarveError::InvalidWeights {
                reason: "weights sum to zero"
            })
        );
    }

    #[test]
    fn closures_act_as_samplers() {
        let data = [[1u8, 2, 3], [4, 5, 6]];
        let view = ImageView::from_slice(&data, 2, 1).unwrap();
        let green = |p: Rgb| p[1];
        assert_eq!(grayscale(view, &green), vec![2, 5]);
    }
}

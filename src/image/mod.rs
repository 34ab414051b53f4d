//! Image views and owned pixel buffers.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than the width represents padded rows. `OwnedImage` is the
//! contiguous counterpart returned by carving and visualization.
//!
//! Pixels are `Rgb = [u8; 3]`; highlight colors cross the API packed as
//! `0xRRGGBB` in a `u32`.

use crate::util::{SeamCarveError, SeamCarveResult};

#[cfg(feature = "image-io")]
pub mod io;

/// One RGB pixel.
pub type Rgb = [u8; 3];

/// Packs an RGB pixel into `0xRRGGBB`.
pub fn pack_rgb(pixel: Rgb) -> u32 {
    (u32::from(pixel[0]) << 16) | (u32::from(pixel[1]) << 8) | u32::from(pixel[2])
}

/// Unpacks `0xRRGGBB` into an RGB pixel; the top byte is ignored.
pub fn unpack_rgb(packed: u32) -> Rgb {
    [(packed >> 16) as u8, (packed >> 8) as u8, packed as u8]
}

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> SeamCarveResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> SeamCarveResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(SeamCarveError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }
}

impl<'a, T: Copy> ImageView<'a, T> {
    /// Copies the view into a contiguous owned image, dropping row padding.
    pub fn to_owned_image(&self) -> SeamCarveResult<OwnedImage<T>> {
        let mut data = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            let row = self.row(y).ok_or(SeamCarveError::BufferTooSmall {
                needed: (y + 1) * self.stride,
                got: self.data.len(),
            })?;
            data.extend_from_slice(row);
        }
        OwnedImage::new(data, self.width, self.height)
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> SeamCarveResult<usize> {
    if width == 0 || height == 0 {
        return Err(SeamCarveError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(SeamCarveError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(SeamCarveError::InvalidDimensions { width, height })?;
    Ok(needed)
}

/// Owned contiguous image buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> OwnedImage<T> {
    /// Wraps a contiguous row-major buffer of exactly `width * height` pixels.
    pub fn new(data: Vec<T>, width: usize, height: usize) -> SeamCarveResult<Self> {
        if width == 0 || height == 0 {
            return Err(SeamCarveError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(SeamCarveError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(SeamCarveError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(SeamCarveError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major pixel data.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    /// Returns a mutable reference to the pixel at `(x, y)`.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get_mut(y * self.width + x)
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, T> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}

impl OwnedImage<Rgb> {
    /// Builds an RGB image from interleaved `r, g, b` bytes.
    pub fn from_rgb_bytes(bytes: &[u8], width: usize, height: usize) -> SeamCarveResult<Self> {
        let pixels = width
            .checked_mul(height)
            .ok_or(SeamCarveError::InvalidDimensions { width, height })?;
        let needed = pixels
            .checked_mul(3)
            .ok_or(SeamCarveError::InvalidDimensions { width, height })?;
        if bytes.len() != needed {
            return Err(SeamCarveError::BufferTooSmall {
                needed,
                got: bytes.len(),
            });
        }
        let data = bytes.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Self::new(data, width, height)
    }

    /// Returns the pixels as interleaved `r, g, b` bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|p| p.iter().copied()).collect()
    }
}

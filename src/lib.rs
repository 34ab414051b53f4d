//! seamcarve resizes images by removing low-energy seams.
//!
//! The engine works on a single grayscale working buffer and an origin map
//! that records, for every surviving cell, which pixel of the input it came
//! from. Energy uses forward-looking costs so that seams avoid cutting across
//! strong edges. Image file I/O is available behind the `image-io` feature and
//! structured logging behind the `tracing` feature.

pub mod carve;
pub mod gray;
pub mod image;
mod trace;
pub mod util;

pub use carve::{
    gradient_magnitude, CarveConfig, CarveSession, CarvingScheme, Coord, Orientation,
    RemovedSeam, Seam, SeamCarver,
};
pub use gray::{GrayscaleSampler, RgbWeights};
pub use crate::image::{pack_rgb, unpack_rgb, ImageView, OwnedImage, Rgb};
pub use util::{SeamCarveError, SeamCarveResult};

#[cfg(feature = "image-io")]
pub use crate::image::io;

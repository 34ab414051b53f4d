//! Carving sessions: scheme planning, validation, and output reconstruction.
//!
//! A session owns the working intensity buffer and the origin map for its
//! whole lifetime. Every step recomputes energy over the current rectangle,
//! fills the cost matrix, traces one seam and removes it; nothing carries
//! over between steps except the two shrinking grids.

use crate::carve::cost::CostMatrix;
use crate::carve::energy::EnergyField;
use crate::carve::grid::{Coord, Grid};
use crate::carve::remove::remove_seam;
use crate::carve::seam::{trace_seam, Orientation, Seam};
use crate::gray::{grayscale, GrayscaleSampler, RgbWeights};
use crate::image::{unpack_rgb, ImageView, OwnedImage, Rgb};
use crate::trace::{trace_event, trace_span};
use crate::util::{SeamCarveError, SeamCarveResult};

/// Order in which vertical and horizontal seams are removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CarvingScheme {
    /// All vertical seams, then all horizontal seams.
    #[default]
    VerticalFirst,
    /// All horizontal seams, then all vertical seams.
    HorizontalFirst,
    /// One vertical then one horizontal, until one kind runs out; the rest of
    /// the other kind follows.
    Interleaved,
}

impl CarvingScheme {
    /// Expands the scheme into the ordered list of single-seam steps.
    pub fn plan(self, vertical: usize, horizontal: usize) -> Vec<Orientation> {
        let v = std::iter::repeat(Orientation::Vertical).take(vertical);
        let h = std::iter::repeat(Orientation::Horizontal).take(horizontal);
        match self {
            CarvingScheme::VerticalFirst => v.chain(h).collect(),
            CarvingScheme::HorizontalFirst => h.chain(v).collect(),
            CarvingScheme::Interleaved => {
                let mut steps = Vec::with_capacity(vertical + horizontal);
                let (mut v_left, mut h_left) = (vertical, horizontal);
                while v_left > 0 || h_left > 0 {
                    if v_left > 0 {
                        steps.push(Orientation::Vertical);
                        v_left -= 1;
                    }
                    if h_left > 0 {
                        steps.push(Orientation::Horizontal);
                        h_left -= 1;
                    }
                }
                steps
            }
        }
    }
}

/// Seam counts and ordering for one carving run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CarveConfig {
    /// Number of vertical seams to remove (reduces width).
    pub vertical_seams: usize,
    /// Number of horizontal seams to remove (reduces height).
    pub horizontal_seams: usize,
    pub scheme: CarvingScheme,
}

impl CarveConfig {
    /// Derives seam counts that take a `width x height` image to the target.
    pub fn for_target(
        width: usize,
        height: usize,
        target_width: usize,
        target_height: usize,
    ) -> SeamCarveResult<Self> {
        if target_width > width || target_height > height {
            return Err(SeamCarveError::UpscaleUnsupported {
                width,
                height,
                target_width,
                target_height,
            });
        }
        Ok(Self {
            vertical_seams: width - target_width,
            horizontal_seams: height - target_height,
            scheme: CarvingScheme::default(),
        })
    }

    /// Returns the config with `scheme` as the removal order.
    pub fn with_scheme(mut self, scheme: CarvingScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Checks the seam counts against a `width x height` input.
    ///
    /// At most `width / 2` vertical seams and `height - 1` horizontal seams
    /// may be removed, and the input must be at least 2x2.
    pub fn validate(&self, width: usize, height: usize) -> SeamCarveResult<()> {
        if width < 2 || height < 2 {
            return Err(SeamCarveError::ImageTooSmall { width, height });
        }
        let max_vertical = width / 2;
        if self.vertical_seams > max_vertical {
            return Err(SeamCarveError::TooManyVerticalSeams {
                requested: self.vertical_seams,
                max: max_vertical,
            });
        }
        let max_horizontal = height - 1;
        if self.horizontal_seams > max_horizontal {
            return Err(SeamCarveError::TooManyHorizontalSeams {
                requested: self.horizontal_seams,
                max: max_horizontal,
            });
        }
        Ok(())
    }

    /// Output size after all seams are removed from a `width x height` input.
    pub fn output_size(&self, width: usize, height: usize) -> (usize, usize) {
        (
            width.saturating_sub(self.vertical_seams),
            height.saturating_sub(self.horizontal_seams),
        )
    }
}

/// A seam that has been removed, with the original pixels it covered.
#[derive(Clone, Debug, PartialEq)]
pub struct RemovedSeam {
    /// The seam in working-buffer coordinates at the time it was traced.
    pub seam: Seam,
    /// Original-image coordinates of the removed pixels, in seam order.
    pub origins: Vec<Coord>,
}

impl RemovedSeam {
    /// Returns the orientation of the removed seam.
    pub fn orientation(&self) -> Orientation {
        self.seam.orientation()
    }
}

/// One carving run over a working buffer and its origin map.
pub struct CarveSession {
    intensities: Grid<u8>,
    origins: Grid<Coord>,
    plan: Vec<Orientation>,
    next: usize,
    removed: Vec<RemovedSeam>,
}

impl CarveSession {
    /// Starts a session over row-major intensities with an identity origin map.
    ///
    /// The seam counts in `plan` are checked against `width x height` with the
    /// same limits as [`CarveConfig::validate`] before anything is allocated.
    pub fn new(
        intensities: Vec<u8>,
        width: usize,
        height: usize,
        plan: Vec<Orientation>,
    ) -> SeamCarveResult<Self> {
        let vertical_seams = plan.iter().filter(|&&o| o == Orientation::Vertical).count();
        CarveConfig {
            vertical_seams,
            horizontal_seams: plan.len() - vertical_seams,
            scheme: CarvingScheme::default(),
        }
        .validate(width, height)?;
        let intensities = Grid::from_vec(intensities, width, height)?;
        let coords: Vec<Coord> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Coord::new(x, y)))
            .collect();
        let origins = Grid::from_vec(coords, width, height)?;
        Ok(Self {
            intensities,
            origins,
            removed: Vec::with_capacity(plan.len()),
            plan,
            next: 0,
        })
    }

    /// Active width.
    pub fn width(&self) -> usize {
        self.intensities.width()
    }

    /// Active height.
    pub fn height(&self) -> usize {
        self.intensities.height()
    }

    /// Number of planned steps not yet taken.
    pub fn remaining(&self) -> usize {
        self.plan.len() - self.next
    }

    /// Original coordinate of every live working cell.
    pub fn origin_map(&self) -> &Grid<Coord> {
        &self.origins
    }

    /// Seams removed so far, in removal order.
    pub fn removed_seams(&self) -> &[RemovedSeam] {
        &self.removed
    }

    /// Removes the next planned seam.
    ///
    /// Returns the orientation of the removed seam, or `None` once the plan
    /// is exhausted. A step either completes or leaves the session untouched.
    pub fn step(&mut self) -> SeamCarveResult<Option<Orientation>> {
        let Some(&orientation) = self.plan.get(self.next) else {
            return Ok(None);
        };
        let _span = trace_span!(
            "seam_step",
            step = self.next,
            width = self.width(),
            height = self.height()
        )
        .entered();

        let seam = self.extract(orientation)?;
        let origins = remove_seam(&mut self.intensities, &mut self.origins, &seam)?;
        trace_event!(
            "seam_removed",
            cost = seam.cost(),
            width = self.width(),
            height = self.height()
        );
        self.removed.push(RemovedSeam { seam, origins });
        self.next += 1;
        Ok(Some(orientation))
    }

    /// Traces the seam the next step would remove, without removing it.
    pub fn extract(&self, orientation: Orientation) -> SeamCarveResult<Seam> {
        let energy = EnergyField::compute(&self.intensities)?;
        let costs = CostMatrix::fill(&energy, &self.intensities, orientation)?;
        trace_seam(&costs)
    }

    /// Runs every remaining step.
    pub fn run(&mut self) -> SeamCarveResult<()> {
        let _span = trace_span!("carve_session", steps = self.remaining()).entered();
        while self.step()?.is_some() {}
        trace_event!(
            "carve_session_done",
            width = self.width(),
            height = self.height()
        );
        Ok(())
    }

    /// Builds the carved image by reading each live cell's original pixel.
    pub fn reconstruct(&self, original: ImageView<'_, Rgb>) -> SeamCarveResult<OwnedImage<Rgb>> {
        let (width, height) = (self.width(), self.height());
        let mut data = Vec::with_capacity(width * height);
        for coord in self.origins.to_vec() {
            let pixel = original.get(coord.x, coord.y).ok_or(SeamCarveError::InternalInvariant(
                "origin map points outside the original image",
            ))?;
            data.push(*pixel);
        }
        OwnedImage::new(data, width, height)
    }

    /// Paints removed seams onto a full-size copy of `original`.
    ///
    /// With `only` set, seams of the other orientation are left unpainted.
    pub fn paint_seams(
        &self,
        original: ImageView<'_, Rgb>,
        highlight: u32,
        only: Option<Orientation>,
    ) -> SeamCarveResult<OwnedImage<Rgb>> {
        let color = unpack_rgb(highlight);
        let mut out = original.to_owned_image()?;
        let seams = self
            .removed
            .iter()
            .filter(|r| only.map_or(true, |o| r.orientation() == o));
        for removed in seams {
            for coord in &removed.origins {
                let pixel = out.get_mut(coord.x, coord.y).ok_or(
                    SeamCarveError::InternalInvariant("removed seam lies outside the original"),
                )?;
                *pixel = color;
            }
        }
        Ok(out)
    }
}

/// Content-aware resizer over an RGB image.
///
/// ```
/// use seamcarve::{CarveConfig, CarvingScheme, OwnedImage, SeamCarver};
///
/// let img = OwnedImage::new(vec![[40u8, 80, 120]; 8 * 6], 8, 6).unwrap();
/// let config = CarveConfig::for_target(8, 6, 6, 5)
///     .unwrap()
///     .with_scheme(CarvingScheme::Interleaved);
/// let carved = SeamCarver::new(img.view(), config).unwrap().carve().unwrap();
/// assert_eq!((carved.width(), carved.height()), (6, 5));
/// ```
pub struct SeamCarver<'a, S = RgbWeights> {
    image: ImageView<'a, Rgb>,
    config: CarveConfig,
    sampler: S,
}

impl<'a> SeamCarver<'a, RgbWeights> {
    /// Validates `config` against `image` and prepares a carver using equal
    /// channel weights for grayscale.
    pub fn new(image: ImageView<'a, Rgb>, config: CarveConfig) -> SeamCarveResult<Self> {
        config.validate(image.width(), image.height())?;
        Ok(Self {
            image,
            config,
            sampler: RgbWeights::default(),
        })
    }

    /// Prepares a carver that resizes `image` to `width x height`.
    pub fn to_size(
        image: ImageView<'a, Rgb>,
        width: usize,
        height: usize,
        scheme: CarvingScheme,
    ) -> SeamCarveResult<Self> {
        let config =
            CarveConfig::for_target(image.width(), image.height(), width, height)?.with_scheme(scheme);
        Self::new(image, config)
    }
}

impl<'a, S: GrayscaleSampler> SeamCarver<'a, S> {
    /// Replaces the grayscale sampler used to build the working buffer.
    pub fn with_sampler<T: GrayscaleSampler>(self, sampler: T) -> SeamCarver<'a, T> {
        SeamCarver {
            image: self.image,
            config: self.config,
            sampler,
        }
    }

    /// Returns the validated seam configuration.
    pub fn config(&self) -> &CarveConfig {
        &self.config
    }

    /// Size of the carved output.
    pub fn output_size(&self) -> (usize, usize) {
        self.config
            .output_size(self.image.width(), self.image.height())
    }

    /// Starts a session following the configured scheme, without running it.
    pub fn session(&self) -> SeamCarveResult<CarveSession> {
        let plan = self
            .config
            .scheme
            .plan(self.config.vertical_seams, self.config.horizontal_seams);
        self.session_with_plan(plan)
    }

    fn session_with_plan(&self, plan: Vec<Orientation>) -> SeamCarveResult<CarveSession> {
        let gray = grayscale(self.image, &self.sampler);
        CarveSession::new(gray, self.image.width(), self.image.height(), plan)
    }

    /// Removes all configured seams and returns the resized image.
    pub fn carve(&self) -> SeamCarveResult<OwnedImage<Rgb>> {
        let mut session = self.session()?;
        session.run()?;
        session.reconstruct(self.image)
    }

    /// Runs the full removal sequence and paints every removed seam onto a
    /// copy of the input with the packed `0xRRGGBB` highlight.
    pub fn visualize_seams(&self, highlight: u32) -> SeamCarveResult<OwnedImage<Rgb>> {
        let mut session = self.session()?;
        session.run()?;
        session.paint_seams(self.image, highlight, None)
    }

    /// Removes only the seams of one orientation and paints them.
    pub fn show_seams(
        &self,
        orientation: Orientation,
        highlight: u32,
    ) -> SeamCarveResult<OwnedImage<Rgb>> {
        let plan = match orientation {
            Orientation::Vertical => {
                CarvingScheme::VerticalFirst.plan(self.config.vertical_seams, 0)
            }
            Orientation::Horizontal => {
                CarvingScheme::HorizontalFirst.plan(0, self.config.horizontal_seams)
            }
        };
        let mut session = self.session_with_plan(plan)?;
        session.run()?;
        session.paint_seams(self.image, highlight, Some(orientation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carve::seam::Orientation::{Horizontal as H, Vertical as V};

    #[test]
    fn interleaved_plan_alternates_then_drains() {
        assert_eq!(CarvingScheme::Interleaved.plan(2, 1), vec![V, H, V]);
        assert_eq!(CarvingScheme::Interleaved.plan(1, 3), vec![V, H, H, H]);
        assert_eq!(CarvingScheme::HorizontalFirst.plan(1, 2), vec![H, H, V]);
        assert!(CarvingScheme::VerticalFirst.plan(0, 0).is_empty());
    }

    #[test]
    fn validation_limits() {
        let cfg = |v, h| CarveConfig {
            vertical_seams: v,
            horizontal_seams: h,
            scheme: CarvingScheme::VerticalFirst,
        };
        assert!(cfg(3, 5).validate(7, 6).is_ok());
        assert_eq!(
            cfg(4, 0).validate(7, 6),
            Err(SeamCarveError::TooManyVerticalSeams {
                requested: 4,
                max: 3
            })
        );
        assert_eq!(
            cfg(0, 6).validate(7, 6),
            Err(SeamCarveError::TooManyHorizontalSeams {
                requested: 6,
                max: 5
            })
        );
        assert_eq!(
            cfg(0, 0).validate(1, 6),
            Err(SeamCarveError::ImageTooSmall {
                width: 1,
                height: 6
            })
        );
    }

    #[test]
    fn step_after_plan_is_a_no_op() {
        let mut session = CarveSession::new(vec![9; 9], 3, 3, vec![V]).unwrap();
        assert_eq!(session.step().unwrap(), Some(V));
        assert_eq!(session.step().unwrap(), None);
        assert_eq!((session.width(), session.height()), (2, 3));
    }

    #[test]
    fn session_rejects_plans_the_image_cannot_hold() {
        assert_eq!(
            CarveSession::new(vec![0; 16], 4, 4, vec![V; 3]).err(),
            Some(SeamCarveError::TooManyVerticalSeams {
                requested: 3,
                max: 2
            })
        );
        assert_eq!(
            CarveSession::new(vec![0; 12], 4, 3, vec![H, V, H, H]).err(),
            Some(SeamCarveError::TooManyHorizontalSeams {
                requested: 3,
                max: 2
            })
        );
        assert_eq!(
            CarveSession::new(vec![0; 5], 1, 5, vec![V]).err(),
            Some(SeamCarveError::ImageTooSmall {
                width: 1,
                height: 5
            })
        );
    }

    #[test]
    fn session_accepts_plans_at_the_limits() {
        let mut session = CarveSession::new(vec![7; 16], 4, 4, vec![V, H, V, H, H]).unwrap();
        session.run().unwrap();
        assert_eq!((session.width(), session.height()), (2, 1));
        assert_eq!(session.removed_seams().len(), 5);
    }
}

//! Seam removal from the working buffer and origin map.

use crate::carve::grid::{Coord, Grid};
use crate::carve::seam::{Orientation, Seam};
use crate::util::{SeamCarveError, SeamCarveResult};

/// Removes `seam` from both grids, shrinking them by one column (vertical)
/// or one row (horizontal).
///
/// Returns the original coordinates of the removed pixels in seam order.
/// Either both grids shrink or neither does.
pub fn remove_seam(
    intensities: &mut Grid<u8>,
    origins: &mut Grid<Coord>,
    seam: &Seam,
) -> SeamCarveResult<Vec<Coord>> {
    if intensities.width() != origins.width() || intensities.height() != origins.height() {
        return Err(SeamCarveError::InternalInvariant(
            "working buffer and origin map disagree in shape",
        ));
    }
    match seam.orientation() {
        Orientation::Vertical => {
            let removed = origins.remove_column_per_row(seam.positions())?;
            intensities.remove_column_per_row(seam.positions())?;
            Ok(removed)
        }
        Orientation::Horizontal => {
            let removed = origins.remove_row_per_column(seam.positions())?;
            intensities.remove_row_per_column(seam.positions())?;
            Ok(removed)
        }
    }
}

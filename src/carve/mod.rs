//! The seam-carving engine.
//!
//! Each step runs energy → cost → trace → remove over the current working
//! buffer. `session` drives the steps for a carving scheme and turns the
//! final origin map back into pixels.

pub mod cost;
pub mod energy;
pub mod grid;
pub mod remove;
pub mod seam;
pub mod session;

pub use cost::{CostMatrix, Direction};
pub use energy::{gradient_magnitude, EnergyField};
pub use grid::{Coord, Grid};
pub use remove::remove_seam;
pub use seam::{trace_seam, Orientation, Seam};
pub use session::{CarveConfig, CarveSession, CarvingScheme, RemovedSeam, SeamCarver};

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod section;

pub use error::{EasementError, Result};
pub use geometry::{Quadrant, TrackPoint};
pub use operations::fit::{Curve, CurveFitter, FitSettings};
pub use section::{Orientation, Section, Speed};

//! Fitting easement curves between tracks.
//!
//! [`CurveFitter`] holds the start point and the limits shared by every fit.
//! Each fit is an operation that borrows the fitter and returns a [`Curve`].

mod curve;
mod fit_length;
mod fit_point;
mod fit_radius;
mod fitter;

pub use curve::Curve;
pub use fit_length::FitLength;
pub use fit_point::FitPoint;
pub use fit_radius::FitRadius;
pub use fitter::{CurveFitter, FitSettings, MIN_STATIC_LENGTH};

use tracing::debug;

use crate::error::{CoordError, EasementError, FitError, Result};
use crate::geometry::TrackPoint;
use crate::math::{rounds_to_zero, Bisection, Outcome};
use crate::section::Orientation;

use super::{Curve, CurveFitter, FitRadius};

/// Fits a curve between two straight tracks whose static arcs have a given
/// total length, solving for the radius.
///
/// The static length grows with the radius, so the search starts at the
/// minimum radius and moves up from there.
pub struct FitLength {
    other: TrackPoint,
    length: f64,
    orientation: Orientation,
}

impl FitLength {
    /// Creates a new `FitLength` operation joining the fitter's start to
    /// `other` with static arcs `length` long.
    #[must_use]
    pub fn new(other: TrackPoint, length: f64) -> Self {
        Self {
            other,
            length,
            orientation: Orientation::Unresolved,
        }
    }

    /// Requires the curve to turn in `orientation`.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Executes the fit.
    ///
    /// # Errors
    ///
    /// Returns an error if `length` is negative or not finite, any error of
    /// [`FitRadius::execute`] other than [`FitError::EasementsTooLong`],
    /// [`FitError::LengthBelowMinimumRadius`] if even the minimum radius
    /// gives a longer static arc, or [`FitError::NoAlignment`] if the search
    /// does not converge.
    pub fn execute(&self, fitter: &CurveFitter) -> Result<Curve> {
        if !(self.length >= 0.0 && self.length.is_finite()) {
            return Err(CoordError::InvalidNumber {
                what: "static length",
                value: self.length,
            }
            .into());
        }
        let settings = fitter.settings();
        let minimum = fitter.section().minimum_radius();
        debug!(length = self.length, "fitting curve by static length");

        let length = self.length;
        Bisection::new(minimum, settings.length_iterations)
            .with_limits(minimum, f64::INFINITY)
            .solve(|radius| {
                let curve = match FitRadius::new(self.other, radius)
                    .with_orientation(self.orientation)
                    .execute(fitter)
                {
                    Ok(curve) => curve,
                    Err(EasementError::Fit(FitError::EasementsTooLong)) => {
                        return Ok(Outcome::TooLow);
                    }
                    Err(err) => return Err(err),
                };

                let excess = curve.static_length() - length;
                Ok(if rounds_to_zero(excess, settings.length_places) {
                    Outcome::Found(curve)
                } else if excess > 0.0 {
                    Outcome::TooHigh
                } else {
                    Outcome::TooLow
                })
            })
            .map_err(|err| match err {
                EasementError::Fit(FitError::RequiredRadiusBelowMinimum) => {
                    FitError::LengthBelowMinimumRadius { length }.into()
                }
                err => err,
            })
    }
}

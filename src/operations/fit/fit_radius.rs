use tracing::debug;

use crate::error::{FitError, Result};
use crate::geometry::TrackPoint;
use crate::math::LinearEquation;
use crate::section::Orientation;

use super::{Curve, CurveFitter};

/// Fits `easement → static arc → easement` of a given radius between two
/// straight tracks.
pub struct FitRadius {
    other: TrackPoint,
    radius: f64,
    orientation: Orientation,
}

impl FitRadius {
    /// Creates a new `FitRadius` operation joining the fitter's start to
    /// `other` with a static arc of `radius`.
    #[must_use]
    pub fn new(other: TrackPoint, radius: f64) -> Self {
        Self {
            other,
            radius,
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
    /// The chain is built from the start and then slid along the start
    /// alignment until its last point lies on `other`'s alignment.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::RadiusBelowMinimum`] if the radius is too small,
    /// [`FitError::NotStraight`] if either track is curved,
    /// [`FitError::Parallel`] or [`FitError::AntiParallel`] for parallel
    /// tracks, [`FitError::CurvedAway`] if a forced orientation turns the
    /// wrong way, and [`FitError::EasementsTooLong`] if the two easements turn
    /// through more than the angle between the tracks.
    pub fn execute(&self, fitter: &CurveFitter) -> Result<Curve> {
        let section = fitter.section();
        let start = section.start();
        let other = &self.other;

        if self.radius.is_nan() || self.radius < section.minimum_radius() {
            return Err(FitError::RadiusBelowMinimum {
                radius: self.radius,
                minimum_radius: section.minimum_radius(),
            }
            .into());
        }
        if other.curvature() != 0.0 || start.curvature() != 0.0 {
            return Err(FitError::NotStraight.into());
        }
        if fitter.is_parallel(other) {
            return Err(FitError::Parallel.into());
        }
        if fitter.is_anti_parallel(other) {
            return Err(FitError::AntiParallel.into());
        }

        let (diff, natural) = fitter.directed_difference(other, Orientation::Unresolved)?;
        if self.orientation != Orientation::Unresolved && self.orientation != natural {
            return Err(FitError::CurvedAway.into());
        }

        let curvature = natural.signed(1.0 / self.radius)?;
        let spiral = section.spiral();
        let easement_angle = spiral.angle(spiral.length_for_curvature(curvature));
        let static_angle = diff.radians() - 2.0 * easement_angle;
        if static_angle < 0.0 {
            return Err(FitError::EasementsTooLong.into());
        }
        debug!(
            radius = self.radius,
            ?natural,
            diff = %diff,
            static_angle,
            "fitting curve by radius"
        );

        let mut curve = fitter.assemble(section, curvature, static_angle)?;

        // The chain already follows the start alignment; slide it along that
        // alignment onto the other track.
        let end = *curve.end().position();
        let along_start = LinearEquation::new(start.bearing(), end);
        let target = other.tangent().intersect(&along_start)?;
        curve.translate(target.x - end.x, target.y - end.y);

        Ok(curve)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::EasementError;
    use crate::geometry::{Quadrant, SegmentKind};
    use crate::operations::fit::FitSettings;
    use approx::assert_abs_diff_eq;

    fn point(x: f64, z: f64, rotation: f64, quadrant: Quadrant) -> TrackPoint {
        TrackPoint::from_quadrant(x, z, rotation, quadrant, 0.0).unwrap()
    }

    fn start() -> TrackPoint {
        point(217.027, 34.523, 48.882, Quadrant::NE)
    }

    fn fitter() -> CurveFitter {
        CurveFitter::new(start(), 500.0, 120.0).unwrap()
    }

    fn end_left() -> TrackPoint {
        point(467.962, 465.900, 12.762, Quadrant::NE)
    }

    fn end_right() -> TrackPoint {
        point(582.769, 223.772, 75.449, Quadrant::NE)
    }

    fn assert_joins(curve: &Curve, other: &TrackPoint) {
        let first = curve.start();
        let last = curve.end();
        assert!(start().tangent().distance(first.position()) < 1e-9);
        assert!(other.tangent().distance(last.position()) < 1e-9);
        assert!(last.bearing().nearly_equal(other.bearing(), 9, false));
        assert_eq!(last.curvature(), 0.0);
    }

    #[test]
    fn fit_left() {
        let other = end_left();
        let curve = FitRadius::new(other, 600.0).execute(&fitter()).unwrap();
        assert_joins(&curve, &other);

        let kinds: Vec<_> = curve.sections().iter().map(TrackPoint::kind).collect();
        assert_eq!(
            kinds,
            [SegmentKind::Easement, SegmentKind::Static, SegmentKind::Easement]
        );
        assert_abs_diff_eq!(curve.static_radius().unwrap(), 600.0, epsilon = 1e-9);
        assert!(curve.sections()[1].curvature() > 0.0);

        let end = curve.end();
        assert_abs_diff_eq!(end.x(), 460.7586, epsilon = 1e-4);
        assert_abs_diff_eq!(end.z(), 434.0964, epsilon = 1e-4);
        assert_abs_diff_eq!(curve.static_length(), 292.204_312, epsilon = 1e-6);
        assert_abs_diff_eq!(
            curve.sections()[0].origin_length().unwrap(),
            85.970_016,
            epsilon = 1e-6
        );
    }

    #[test]
    fn fit_right_turns_clockwise() {
        let other = end_right();
        let curve = FitRadius::new(other, 600.0).execute(&fitter()).unwrap();
        assert_joins(&curve, &other);
        assert!(curve.sections()[1].curvature() < 0.0);
        assert_abs_diff_eq!(curve.end().x(), 549.5867, epsilon = 1e-4);
        assert_abs_diff_eq!(curve.end().z(), 215.1590, epsilon = 1e-4);
    }

    #[test]
    fn forced_orientation_must_agree() {
        let curve = FitRadius::new(end_right(), 600.0)
            .with_orientation(Orientation::Clockwise)
            .execute(&fitter());
        assert!(curve.is_ok());

        let result = FitRadius::new(end_right(), 600.0)
            .with_orientation(Orientation::CounterClockwise)
            .execute(&fitter());
        assert!(matches!(result, Err(EasementError::Fit(FitError::CurvedAway))));
    }

    #[test]
    fn radius_below_minimum_fails() {
        let result = FitRadius::new(end_left(), 400.0).execute(&fitter());
        assert!(matches!(
            result,
            Err(EasementError::Fit(FitError::RadiusBelowMinimum { .. }))
        ));
    }

    #[test]
    fn anti_parallel_fails() {
        let other = point(400.0, 300.0, 48.882, Quadrant::SW);
        let result = FitRadius::new(other, 600.0).execute(&fitter());
        assert!(matches!(result, Err(EasementError::Fit(FitError::AntiParallel))));
    }

    #[test]
    fn parallel_fails() {
        let other = point(400.0, 300.0, 48.882, Quadrant::NE);
        let result = FitRadius::new(other, 600.0).execute(&fitter());
        assert!(matches!(result, Err(EasementError::Fit(FitError::Parallel))));
    }

    #[test]
    fn curved_track_fails() {
        let other = TrackPoint::from_quadrant(467.962, 465.9, 12.762, Quadrant::NE, 0.001).unwrap();
        let result = FitRadius::new(other, 600.0).execute(&fitter());
        assert!(matches!(result, Err(EasementError::Fit(FitError::NotStraight))));
    }

    #[test]
    fn easements_too_long() {
        // A 5 degree turn leaves no room for two easements at this radius.
        let other = point(500.0, 500.0, 53.882, Quadrant::NE);
        let result = FitRadius::new(other, 500.0).execute(&fitter());
        assert!(matches!(result, Err(EasementError::Fit(FitError::EasementsTooLong))));
    }

    #[test]
    fn split_static_keeps_the_end() {
        let settings = FitSettings {
            split_static: true,
            ..FitSettings::default()
        };
        let split = fitter().with_settings(settings).unwrap();
        let curve = FitRadius::new(end_left(), 2000.0).execute(&split).unwrap();
        let whole = FitRadius::new(end_left(), 2000.0).execute(&fitter()).unwrap();

        let lengths: Vec<_> = curve
            .static_sections()
            .filter_map(TrackPoint::origin_length)
            .collect();
        assert_eq!(lengths.len(), 3);
        assert_abs_diff_eq!(lengths[0], 500.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lengths[1], 500.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lengths[2], 235.035, epsilon = 1e-3);

        assert_abs_diff_eq!(curve.static_length(), whole.static_length(), epsilon = 1e-9);
        assert_abs_diff_eq!(curve.end().x(), whole.end().x(), epsilon = 1e-7);
        assert_abs_diff_eq!(curve.end().z(), whole.end().z(), epsilon = 1e-7);
        assert_abs_diff_eq!(curve.end().x(), 554.9292, epsilon = 1e-4);
    }
}

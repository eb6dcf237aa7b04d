use std::f64::consts::PI;

use tracing::debug;

use crate::error::{FitError, Result};
use crate::geometry::TrackPoint;
use crate::math::{Bisection, Outcome};
use crate::section::Orientation;

use super::{Curve, CurveFitter};

/// A static arc turning through less than this many radians while the curve
/// still overshoots means the start is too close to the target track.
const MIN_STATIC_ANGLE: f64 = 1e-3;

/// Extends a curve from a possibly curved start until it meets a straight
/// track, solving for the static curvature.
///
/// A curve with too much curvature turns onto the target bearing before it
/// reaches the track; too little and it crosses the track first.
pub struct FitPoint {
    other: TrackPoint,
    add_point: Option<TrackPoint>,
    tolerance_places: Option<i32>,
    max_iterations: Option<usize>,
}

impl FitPoint {
    /// Creates a new `FitPoint` operation joining the fitter's start to
    /// `other`.
    #[must_use]
    pub fn new(other: TrackPoint) -> Self {
        Self {
            other,
            add_point: None,
            tolerance_places: None,
            max_iterations: None,
        }
    }

    /// Takes the start curvature from the arc through the start and `point`.
    #[must_use]
    pub fn with_add_point(mut self, point: TrackPoint) -> Self {
        self.add_point = Some(point);
        self
    }

    /// Overrides [`FitSettings::tolerance_places`](super::FitSettings).
    #[must_use]
    pub fn with_tolerance_places(mut self, places: i32) -> Self {
        self.tolerance_places = Some(places);
        self
    }

    /// Overrides [`FitSettings::point_iterations`](super::FitSettings).
    #[must_use]
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Executes the fit.
    ///
    /// The fitter's start is never modified; a curvature taken from the add
    /// point only applies to the returned curve.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::EndNotStraight`] if `other` is curved,
    /// [`FitError::Parallel`] for parallel tracks,
    /// [`FitError::CurvedTrackNotAligned`] if a curved start would have to
    /// turn through more than half a revolution,
    /// [`FitError::TooClose`] if the curve overshoots with no static arc left,
    /// [`FitError::RequiredRadiusBelowMinimum`] if the curve needs a radius
    /// below the minimum, or [`FitError::NoAlignment`] if the search does not
    /// converge. Errors from [`Section::apply_static_radius`](crate::section::Section::apply_static_radius)
    /// are propagated.
    pub fn execute(&self, fitter: &CurveFitter) -> Result<Curve> {
        let other = &self.other;
        if other.curvature() != 0.0 {
            return Err(FitError::EndNotStraight.into());
        }
        if fitter.is_parallel(other) {
            return Err(FitError::Parallel.into());
        }

        let mut section = *fitter.section();
        if let Some(add_point) = &self.add_point {
            section.apply_static_radius(add_point)?;
        }
        let start = *section.start();

        let (diff, orientation) = if start.curvature() == 0.0 {
            let (diff, natural) = fitter.directed_difference(other, Orientation::Unresolved)?;
            if fitter.is_anti_parallel(other) || fitter.check_start_alignment(other)? {
                (diff, natural)
            } else {
                // Heading away from the track: loop round the other way.
                let flipped = natural.flipped();
                (fitter.directed_difference(other, flipped)?.0, flipped)
            }
        } else {
            let orientation = Orientation::from_curvature(start.curvature());
            let (diff, _) = fitter.directed_difference(other, orientation)?;
            if diff.radians() > PI {
                return Err(FitError::CurvedTrackNotAligned.into());
            }
            (diff, orientation)
        };

        let spiral = *section.spiral();
        let pre_angle = spiral.angle(spiral.length_for_curvature(start.curvature()));
        let places = self
            .tolerance_places
            .unwrap_or(fitter.settings().tolerance_places);
        let iterations = self
            .max_iterations
            .unwrap_or(fitter.settings().point_iterations);
        let tolerance = 10_f64.powi(-places);
        let target = other.tangent();
        let max_curvature = section.max_curvature();

        debug!(
            ?orientation,
            diff = %diff,
            start_curvature = start.curvature(),
            "fitting curve to point"
        );

        Bisection::new(max_curvature, iterations)
            .with_limits(0.0, max_curvature)
            .solve(|magnitude| {
                let curvature = orientation.signed(magnitude)?;
                let easement_angle = spiral.angle(spiral.length_for_curvature(curvature));
                let static_angle =
                    diff.radians() - easement_angle - (easement_angle - pre_angle).abs();
                if static_angle < 0.0 {
                    return Ok(Outcome::TooHigh);
                }

                let curve = fitter.assemble(&section, curvature, static_angle)?;
                let end = curve.end().position();
                if target.distance(end) < tolerance {
                    Ok(Outcome::Found(curve))
                } else if target.same_side(start.position(), end) {
                    Ok(Outcome::TooHigh)
                } else if static_angle < MIN_STATIC_ANGLE {
                    Err(FitError::TooClose.into())
                } else {
                    Ok(Outcome::TooLow)
                }
            })
    }
}

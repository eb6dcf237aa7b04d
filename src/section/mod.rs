//! Single track sections: easement spirals, static arcs and straights.
//!
//! Every builder starts from [`Section::start`] and returns the end point of
//! the new section, tagged with its [`SegmentKind`].

mod speed;
mod spiral;

pub use speed::{Speed, KM_PER_MILE};
pub use spiral::Spiral;

use std::f64::consts::FRAC_PI_2;

use crate::error::{Result, SectionError};
use crate::geometry::{SegmentKind, TrackPoint};
use crate::math::{transform, Bearing, Point2};

/// Minimum offset of a second point from the start tangent for it to define
/// an arc.
const COLLINEAR_TOLERANCE: f64 = 5e-4;

/// Turning direction of the arc or spiral being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Unresolved,
    Clockwise,
    CounterClockwise,
}

impl Orientation {
    /// Orientation implied by a signed curvature; zero leaves it unresolved.
    #[must_use]
    pub fn from_curvature(curvature: f64) -> Self {
        if curvature < 0.0 {
            Self::Clockwise
        } else if curvature > 0.0 {
            Self::CounterClockwise
        } else {
            Self::Unresolved
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Unresolved => Self::Unresolved,
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the orientation is unresolved.
    pub fn is_clockwise(self) -> Result<bool> {
        match self {
            Self::Unresolved => Err(SectionError::OrientationUnresolved.into()),
            Self::Clockwise => Ok(true),
            Self::CounterClockwise => Ok(false),
        }
    }

    /// Applies this orientation's sign to a curvature magnitude.
    ///
    /// # Errors
    ///
    /// Returns an error if the orientation is unresolved.
    pub fn signed(self, magnitude: f64) -> Result<f64> {
        Ok(if self.is_clockwise()? {
            -magnitude.abs()
        } else {
            magnitude.abs()
        })
    }
}

/// A section of track starting at a known point.
///
/// Holds the minimum radius of curvature every built section must respect and
/// the spiral derived from the speed tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    start: TrackPoint,
    minimum_radius: f64,
    speed_tolerance: f64,
    spiral: Spiral,
}

impl Section {
    /// Creates a section starting at `start`.
    ///
    /// `speed_tolerance` is in km/h.
    ///
    /// # Errors
    ///
    /// Returns an error if `minimum_radius` or `speed_tolerance` is not
    /// positive, or the start curvature is sharper than the minimum radius.
    pub fn new(start: TrackPoint, minimum_radius: f64, speed_tolerance: f64) -> Result<Self> {
        if !(minimum_radius > 0.0 && minimum_radius.is_finite()) {
            return Err(SectionError::NonPositiveMinimumRadius(minimum_radius).into());
        }
        if !(speed_tolerance > 0.0 && speed_tolerance.is_finite()) {
            return Err(SectionError::NonPositiveSpeed(speed_tolerance).into());
        }
        let section = Self {
            start,
            minimum_radius,
            speed_tolerance,
            spiral: Spiral::new(speed_tolerance),
        };
        section.check_curvature(start.curvature())?;
        Ok(section)
    }

    /// A section with the same limits starting from another point.
    #[must_use]
    pub fn continue_from(&self, start: TrackPoint) -> Self {
        Self { start, ..*self }
    }

    #[must_use]
    pub fn start(&self) -> &TrackPoint {
        &self.start
    }

    #[must_use]
    pub fn minimum_radius(&self) -> f64 {
        self.minimum_radius
    }

    #[must_use]
    pub fn speed_tolerance(&self) -> f64 {
        self.speed_tolerance
    }

    #[must_use]
    pub fn spiral(&self) -> &Spiral {
        &self.spiral
    }

    /// Largest curvature magnitude allowed by the minimum radius.
    #[must_use]
    pub fn max_curvature(&self) -> f64 {
        1.0 / self.minimum_radius
    }

    fn check_curvature(&self, curvature: f64) -> Result<()> {
        if !curvature.is_finite() || curvature.abs() > self.max_curvature() {
            return Err(SectionError::CurvatureExceedsMinimum {
                curvature,
                minimum_radius: self.minimum_radius,
            }
            .into());
        }
        Ok(())
    }

    /// Radius of the arc through the start point (tangent to its bearing) and
    /// `other`.
    ///
    /// The centre lies on the normal through the start, so a chord `c` whose
    /// far end sits `d` off the start tangent gives `R = c² / 2d`.
    ///
    /// # Errors
    ///
    /// Returns an error if `other` lies on the start tangent.
    pub fn static_radius(&self, other: &TrackPoint) -> Result<f64> {
        let offset = self.start.tangent().distance(other.position());
        if offset < COLLINEAR_TOLERANCE {
            return Err(SectionError::CollinearPoints.into());
        }
        let chord = (self.start.position() - other.position()).norm();
        Ok(chord * chord / (2.0 * offset))
    }

    /// Sets the start curvature to the arc through the start point and `other`.
    ///
    /// The arc turns clockwise if `other` lies on the right of the start tangent.
    ///
    /// # Errors
    ///
    /// Returns an error if `other` lies on the start tangent or the resulting
    /// radius is below the minimum radius. The start is unchanged on failure.
    pub fn apply_static_radius(&mut self, other: &TrackPoint) -> Result<()> {
        let radius = self.static_radius(other)?;
        let tangent = self.start.tangent();
        let (dx, dz) = (self.start.bearing() + FRAC_PI_2).direction();
        let right = Point2::new(self.start.x() + dx, self.start.z() + dz);

        let curvature = if tangent.same_side(other.position(), &right) {
            -1.0 / radius
        } else {
            1.0 / radius
        };
        self.check_curvature(curvature)?;
        self.start.set_curvature(curvature);
        Ok(())
    }

    /// Builds an easement spiral from the start curvature to `end_curvature`.
    ///
    /// When the curvature magnitude decreases the spiral is traversed in
    /// reverse, towards its zero-curvature origin.
    ///
    /// # Errors
    ///
    /// Returns an error if `end_curvature` exceeds the minimum radius bound,
    /// equals the start curvature, or has the opposite sign to a non-zero start
    /// curvature.
    pub fn easement(&self, end_curvature: f64) -> Result<TrackPoint> {
        self.check_curvature(end_curvature)?;
        let start_curvature = self.start.curvature();

        if start_curvature == end_curvature {
            return Err(SectionError::SameCurvature.into());
        }
        let mut orientation = if start_curvature == 0.0 {
            Orientation::from_curvature(end_curvature)
        } else if start_curvature < 0.0 && end_curvature <= 0.0 {
            Orientation::Clockwise
        } else if start_curvature > 0.0 && end_curvature >= 0.0 {
            Orientation::CounterClockwise
        } else {
            return Err(SectionError::OppositeCurvature {
                start: start_curvature,
                end: end_curvature,
            }
            .into());
        };

        let reverse = start_curvature.abs() > end_curvature.abs();
        if reverse {
            orientation = orientation.flipped();
        }

        let start_length = self.spiral.length_for_curvature(start_curvature);
        let end_length = self.spiral.length_for_curvature(end_curvature);

        let p0 = self.spiral.point(start_length, orientation)?;
        let p1 = self.spiral.point(end_length, orientation)?;
        let mut r0 = Bearing::wrap(self.spiral.angle(start_length));
        let mut r1 = Bearing::wrap(self.spiral.angle(end_length));
        if !orientation.is_clockwise()? {
            r0 = -r0;
            r1 = -r1;
        }
        if reverse {
            r0 = r0.flip();
            r1 = r1.flip();
        }

        let bearing = self.start.bearing();
        let position = transform(&p1, (bearing - r0).radians(), &p0, self.start.position());

        Ok(TrackPoint::section_end(
            position,
            bearing + r1 - r0,
            end_curvature,
            start_curvature,
            (start_length - end_length).abs(),
            SegmentKind::Easement,
        ))
    }

    /// Builds a constant-radius arc turning through `angle` radians at the start
    /// curvature.
    ///
    /// # Errors
    ///
    /// Returns an error if the start is straight.
    pub fn static_arc(&self, angle: f64) -> Result<TrackPoint> {
        let curvature = self.start.curvature();
        if curvature == 0.0 {
            return Err(SectionError::StraightStaticArc.into());
        }
        let radius = 1.0 / curvature.abs();
        let (sin, cos) = angle.sin_cos();
        let (x, z) = (radius * (1.0 - cos), radius * sin);
        let (x, turn) = if curvature < 0.0 { (x, angle) } else { (-x, -angle) };

        let bearing = self.start.bearing();
        let position = transform(
            &Point2::new(x, z),
            bearing.radians(),
            &Point2::origin(),
            self.start.position(),
        );

        Ok(TrackPoint::section_end(
            position,
            bearing + turn,
            curvature,
            curvature,
            angle * radius,
            SegmentKind::Static,
        ))
    }

    /// Builds a straight section of `length` along the start bearing.
    ///
    /// # Errors
    ///
    /// Returns an error if the start is curved.
    pub fn straight(&self, length: f64) -> Result<TrackPoint> {
        if self.start.curvature() != 0.0 {
            return Err(SectionError::CurvedStraight.into());
        }
        Ok(TrackPoint::section_end(
            self.start.tangent().advance(length),
            self.start.bearing(),
            0.0,
            0.0,
            length,
            SegmentKind::Straight,
        ))
    }
}

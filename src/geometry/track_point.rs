use std::fmt;
use std::str::FromStr;

use crate::error::{CoordError, EasementError, Result};
use crate::math::{Bearing, LinearEquation, Point2};

/// Compass quadrant used by the `(rotation, quadrant)` bearing encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NE,
    SE,
    SW,
    NW,
}

impl Quadrant {
    /// Converts a y-axis rotation in `[-90, 90]` degrees within this quadrant
    /// to a bearing.
    ///
    /// # Errors
    ///
    /// Returns an error if `rotation` is not finite or lies outside `[-90, 90]`.
    pub fn bearing(self, rotation: f64) -> Result<Bearing> {
        if !rotation.is_finite() {
            return Err(CoordError::InvalidNumber {
                what: "rotation",
                value: rotation,
            }
            .into());
        }
        if rotation.abs() > 90.0 {
            return Err(CoordError::RotationOutOfRange(rotation).into());
        }
        let r = rotation.abs();
        let degrees = match self {
            Self::NE => r,
            Self::SE => 180.0 - r,
            Self::SW => 180.0 + r,
            Self::NW => 360.0 - r,
        };
        Bearing::from_degrees(degrees)
    }

    /// Splits a bearing into its `(rotation, quadrant)` encoding.
    #[must_use]
    pub fn from_bearing(bearing: Bearing) -> (f64, Self) {
        let degrees = bearing.degrees();
        if degrees < 90.0 {
            (degrees, Self::NE)
        } else if degrees < 180.0 {
            (180.0 - degrees, Self::SE)
        } else if degrees < 270.0 {
            (degrees - 180.0, Self::SW)
        } else {
            (360.0 - degrees, Self::NW)
        }
    }
}

impl FromStr for Quadrant {
    type Err = EasementError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NE" => Ok(Self::NE),
            "SE" => Ok(Self::SE),
            "SW" => Ok(Self::SW),
            "NW" => Ok(Self::NW),
            _ => Err(CoordError::InvalidQuadrant(s.to_owned()).into()),
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NE => "NE",
            Self::SE => "SE",
            Self::SW => "SW",
            Self::NW => "NW",
        };
        f.write_str(name)
    }
}

/// The kind of section that produced a [`TrackPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SegmentKind {
    /// A reference point supplied by the caller.
    #[default]
    None,
    Straight,
    Easement,
    Static,
}

/// Turning direction derived from the sign of a curvature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    AntiClockwise,
    Straight,
}

impl Direction {
    /// Direction for a signed curvature: negative curves clockwise.
    #[must_use]
    pub fn from_curvature(curvature: f64) -> Self {
        if curvature < 0.0 {
            Self::Clockwise
        } else if curvature > 0.0 {
            Self::AntiClockwise
        } else {
            Self::Straight
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Clockwise => "CW",
            Self::AntiClockwise => "ACW",
            Self::Straight => "straight",
        };
        f.write_str(label)
    }
}

fn radius_of(curvature: f64) -> f64 {
    if curvature == 0.0 {
        0.0
    } else {
        1.0 / curvature.abs()
    }
}

/// A point on a track: position, bearing and signed curvature.
///
/// Points produced by a section also record where they came from: the
/// curvature at the start of that section, its arc length and its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    position: Point2,
    bearing: Bearing,
    curvature: f64,
    origin_curvature: Option<f64>,
    origin_length: Option<f64>,
    kind: SegmentKind,
}

impl TrackPoint {
    /// Creates a reference point from a position, bearing and curvature.
    ///
    /// # Errors
    ///
    /// Returns an error if the position or curvature is not finite.
    pub fn new(x: f64, z: f64, bearing: Bearing, curvature: f64) -> Result<Self> {
        for (what, value) in [("x position", x), ("z position", z), ("curvature", curvature)] {
            if !value.is_finite() {
                return Err(CoordError::InvalidNumber { what, value }.into());
            }
        }
        Ok(Self {
            position: Point2::new(x, z),
            bearing,
            curvature,
            origin_curvature: None,
            origin_length: None,
            kind: SegmentKind::None,
        })
    }

    /// Creates a reference point from the `(rotation, quadrant)` encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is not finite or `rotation` lies outside
    /// `[-90, 90]`.
    pub fn from_quadrant(
        x: f64,
        z: f64,
        rotation: f64,
        quadrant: Quadrant,
        curvature: f64,
    ) -> Result<Self> {
        Self::new(x, z, quadrant.bearing(rotation)?, curvature)
    }

    /// Creates the end point of a section.
    pub(crate) fn section_end(
        position: Point2,
        bearing: Bearing,
        curvature: f64,
        origin_curvature: f64,
        origin_length: f64,
        kind: SegmentKind,
    ) -> Self {
        Self {
            position,
            bearing,
            curvature,
            origin_curvature: Some(origin_curvature),
            origin_length: Some(origin_length),
            kind,
        }
    }

    /// Returns the position as `(x, z)` stored in a point.
    #[must_use]
    pub fn position(&self) -> &Point2 {
        &self.position
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.position.y
    }

    #[must_use]
    pub fn bearing(&self) -> Bearing {
        self.bearing
    }

    /// Returns the signed curvature: negative clockwise, positive anticlockwise.
    #[must_use]
    pub fn curvature(&self) -> f64 {
        self.curvature
    }

    /// Radius of curvature, or `0.0` for a straight track.
    #[must_use]
    pub fn radius(&self) -> f64 {
        radius_of(self.curvature)
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        Direction::from_curvature(self.curvature)
    }

    /// Curvature at the start of the section that produced this point.
    #[must_use]
    pub fn origin_curvature(&self) -> Option<f64> {
        self.origin_curvature
    }

    #[must_use]
    pub fn origin_radius(&self) -> Option<f64> {
        self.origin_curvature.map(radius_of)
    }

    #[must_use]
    pub fn origin_direction(&self) -> Option<Direction> {
        self.origin_curvature.map(Direction::from_curvature)
    }

    /// Arc length of the section that produced this point.
    #[must_use]
    pub fn origin_length(&self) -> Option<f64> {
        self.origin_length
    }

    #[must_use]
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// Returns the bearing as `(rotation, quadrant)`.
    #[must_use]
    pub fn quadrant(&self) -> (f64, Quadrant) {
        Quadrant::from_bearing(self.bearing)
    }

    /// The tangent line through this point.
    #[must_use]
    pub fn tangent(&self) -> LinearEquation {
        LinearEquation::new(self.bearing, self.position)
    }

    /// Moves the point by `(dx, dz)` without changing its bearing.
    pub fn translate(&mut self, dx: f64, dz: f64) {
        self.position.x += dx;
        self.position.y += dz;
    }

    pub(crate) fn set_curvature(&mut self, curvature: f64) {
        self.curvature = curvature;
    }
}

impl fmt::Display for TrackPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.curvature == 0.0 {
            f.write_str("Straight section:")?;
        } else {
            write!(f, "Curved section: radius of curvature {:.0}", self.radius())?;
        }
        write!(
            f,
            " position ({:.3}, {:.3}) and bearing of {:.3}",
            self.x(),
            self.z(),
            self.bearing.degrees()
        )
    }
}

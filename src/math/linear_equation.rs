use crate::error::{FitError, Result};

use super::{Bearing, Point2, TOLERANCE};

/// Decimal places used to decide that two lines are parallel.
const PARALLEL_PLACES: i32 = 12;

/// A 2D line through an anchor point `(u, v)` with a given bearing.
///
/// In implicit form the line is `(x - u)·cos θ - (z - v)·sin θ = 0`; the
/// left-hand side is the signed distance, positive to the right of the
/// bearing direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearEquation {
    anchor: Point2,
    bearing: Bearing,
}

impl LinearEquation {
    /// Creates a line through `anchor` pointing along `bearing`.
    #[must_use]
    pub fn new(bearing: Bearing, anchor: Point2) -> Self {
        Self { anchor, bearing }
    }

    /// Returns the anchor point.
    #[must_use]
    pub fn anchor(&self) -> &Point2 {
        &self.anchor
    }

    /// Returns the bearing of the line.
    #[must_use]
    pub fn bearing(&self) -> Bearing {
        self.bearing
    }

    /// Solves for `x` given `z`.
    ///
    /// Returns `None` for east-west lines, where `x` is not a function of `z`.
    #[must_use]
    pub fn x_at(&self, z: f64) -> Option<f64> {
        let (sin, cos) = self.bearing.radians().sin_cos();
        if cos.abs() < TOLERANCE {
            return None;
        }
        Some((self.anchor.x * cos + (z - self.anchor.y) * sin) / cos)
    }

    /// Solves for `z` given `x`.
    ///
    /// Returns `None` for north-south lines, where `z` is not a function of `x`.
    #[must_use]
    pub fn z_at(&self, x: f64) -> Option<f64> {
        let (sin, cos) = self.bearing.radians().sin_cos();
        if sin.abs() < TOLERANCE {
            return None;
        }
        Some((self.anchor.y * sin + (x - self.anchor.x) * cos) / sin)
    }

    /// Perpendicular distance from `point` to the line, positive on the right.
    #[must_use]
    pub fn signed_distance(&self, point: &Point2) -> f64 {
        let (sin, cos) = self.bearing.radians().sin_cos();
        (point.x - self.anchor.x) * cos - (point.y - self.anchor.y) * sin
    }

    /// Unsigned perpendicular distance from `point` to the line.
    #[must_use]
    pub fn distance(&self, point: &Point2) -> f64 {
        self.signed_distance(point).abs()
    }

    /// Checks whether two points lie on the same side of the line.
    ///
    /// A point lying exactly on the line counts as being on the same side as
    /// any other point.
    #[must_use]
    pub fn same_side(&self, p1: &Point2, p2: &Point2) -> bool {
        let d1 = self.signed_distance(p1);
        let d2 = self.signed_distance(p2);
        if d1 == 0.0 || d2 == 0.0 {
            return true;
        }
        (d1 > 0.0) == (d2 > 0.0)
    }

    /// Returns the point `length` along the line from its anchor.
    #[must_use]
    pub fn advance(&self, length: f64) -> Point2 {
        let (dx, dz) = self.bearing.direction();
        Point2::new(self.anchor.x + length * dx, self.anchor.y + length * dz)
    }

    /// Finds the intersection of two lines.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::Parallel`] if the lines point in the same or
    /// opposite directions.
    pub fn intersect(&self, other: &Self) -> Result<Point2> {
        if self
            .bearing
            .nearly_equal(other.bearing, PARALLEL_PLACES, true)
        {
            return Err(FitError::Parallel.into());
        }

        let (u1, v1) = (self.anchor.x, self.anchor.y);
        let (u2, v2) = (other.anchor.x, other.anchor.y);
        let (sin1, cos1) = self.bearing.radians().sin_cos();
        let (sin2, cos2) = other.bearing.radians().sin_cos();

        let north_south = |sin: f64| sin.abs() < TOLERANCE;
        let east_west = |cos: f64| cos.abs() < TOLERANCE;
        let axis_aligned = |sin: f64, cos: f64| north_south(sin) || east_west(cos);

        if axis_aligned(sin1, cos1) && axis_aligned(sin2, cos2) {
            // Not parallel, so the lines are perpendicular.
            return Ok(if north_south(sin1) {
                Point2::new(u1, v2)
            } else {
                Point2::new(u2, v1)
            });
        }

        let (tan1, tan2) = (sin1 / cos1, sin2 / cos2);
        let (cot1, cot2) = (cos1 / sin1, cos2 / sin2);

        let x = if north_south(sin1) || north_south(sin2) {
            (u1 * tan2 - u2 * tan1 + (v2 - v1) * tan1 * tan2) / (tan2 - tan1)
        } else {
            (u1 * cot1 - u2 * cot2 + v2 - v1) / (cot1 - cot2)
        };

        let z = if east_west(cos1) || east_west(cos2) {
            ((u2 - u1) * cot1 * cot2 + v1 * cot2 - v2 * cot1) / (cot2 - cot1)
        } else {
            (v1 * tan1 - v2 * tan2 + u2 - u1) / (tan1 - tan2)
        };

        Ok(Point2::new(x, z))
    }
}

use crate::error::Result;
use crate::math::Point2;

use super::Orientation;

/// Reference speed for the normalization factor, in km/h.
const BASE_SPEED: f64 = 200.0;
/// Reference radius for the normalization factor.
const BASE_RADIUS: f64 = 800.0;
/// Easement length that reaches [`BASE_RADIUS`] at [`BASE_SPEED`].
const BASE_LENGTH: f64 = 298.507;

/// Euler spiral normalized to a speed tolerance.
///
/// Curvature grows linearly with arc length: `κ(L) = L / factor`. Positions
/// use truncated Taylor series of the normalized Fresnel integrals, two terms
/// along the initial tangent (`z`) and one term across it (`x`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spiral {
    factor: f64,
}

impl Spiral {
    /// Creates the spiral for a speed tolerance in km/h.
    #[must_use]
    pub fn new(speed_tolerance: f64) -> Self {
        let factor = (speed_tolerance / BASE_SPEED).powi(3) * BASE_LENGTH * BASE_RADIUS;
        Self { factor }
    }

    /// Normalization factor: arc length times radius at any point on the spiral.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    fn scale(&self) -> f64 {
        1.0 / (2.0 * self.factor).sqrt()
    }

    /// Position at arc length `length` from the zero-curvature origin, with the
    /// initial tangent along `+z`.
    ///
    /// # Errors
    ///
    /// Returns an error if `orientation` is unresolved.
    pub fn point(&self, length: f64, orientation: Orientation) -> Result<Point2> {
        let clockwise = orientation.is_clockwise()?;
        let a2 = self.scale().powi(2);
        let t = length;
        let x = a2 * t.powi(3) / 3.0;
        let z = t - a2 * a2 * t.powi(5) / 10.0;
        Ok(Point2::new(if clockwise { x } else { -x }, z))
    }

    /// Unsigned tangential angle between the spiral at `length` and its
    /// initial tangent, in radians.
    #[must_use]
    pub fn angle(&self, length: f64) -> f64 {
        let a2 = self.scale().powi(2);
        let t2 = length * length;
        // Derivatives of the polynomials in `point`.
        let dx = a2 * t2;
        let dz = 1.0 - a2 * a2 * t2 * t2 / 2.0;
        (dz / dx.hypot(dz)).acos()
    }

    /// Arc length from zero curvature needed to reach `curvature`.
    #[must_use]
    pub fn length_for_curvature(&self, curvature: f64) -> f64 {
        self.factor * curvature.abs()
    }

    /// Signed curvature reached at arc length `length` from zero curvature.
    ///
    /// # Errors
    ///
    /// Returns an error if `orientation` is unresolved.
    pub fn curvature_for_length(&self, length: f64, orientation: Orientation) -> Result<f64> {
        let curvature = length / self.factor;
        Ok(if orientation.is_clockwise()? {
            -curvature
        } else {
            curvature
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{EasementError, SectionError};
    use approx::assert_relative_eq;

    fn spiral() -> Spiral {
        Spiral::new(120.0)
    }

    #[test]
    fn factor_scales_with_speed_cubed() {
        let base = Spiral::new(200.0);
        assert_relative_eq!(base.factor(), 298.507 * 800.0);
        assert_relative_eq!(Spiral::new(100.0).factor(), base.factor() / 8.0);
    }

    #[test]
    fn unresolved_orientation_fails() {
        let result = spiral().point(80.0, Orientation::Unresolved);
        assert!(matches!(
            result,
            Err(EasementError::Section(SectionError::OrientationUnresolved))
        ));
        assert!(spiral().curvature_for_length(80.0, Orientation::Unresolved).is_err());
    }

    #[test]
    fn fresnel_values() {
        let p = spiral().point(80.0, Orientation::Clockwise).unwrap();
        assert_relative_eq!(p.x, 1.654_323_551_855_826_8, epsilon = 1e-9);
        assert_relative_eq!(p.y, 79.969_211_152_839_97, epsilon = 1e-9);
    }

    #[test]
    fn orientation_mirrors_lateral_axis() {
        let cw = spiral().point(80.0, Orientation::Clockwise).unwrap();
        let ccw = spiral().point(80.0, Orientation::CounterClockwise).unwrap();
        assert_relative_eq!(cw.x, -ccw.x);
        assert_relative_eq!(cw.y, ccw.y);
    }

    #[test]
    fn angle_at_length() {
        assert_relative_eq!(spiral().angle(80.0), 0.062_076_879_933_644_99, epsilon = 1e-9);
        assert!(spiral().angle(0.0).abs() < 1e-12);
    }

    #[test]
    fn curvature_and_length_are_inverse() {
        let s = spiral();
        let k = s.curvature_for_length(80.0, Orientation::Clockwise).unwrap();
        assert_relative_eq!(k, -0.001_550_928_329_864_837_5, epsilon = 1e-12);
        let k = s.curvature_for_length(80.0, Orientation::CounterClockwise).unwrap();
        assert_relative_eq!(s.length_for_curvature(k), 80.0, epsilon = 1e-9);
        assert_relative_eq!(s.length_for_curvature(-1.0 / 750.0), s.factor() / 750.0);
    }
}

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::ops::{Add, Neg, Sub};

use crate::error::{CoordError, Result};

use super::rounds_to_zero;

/// A direction measured clockwise from north (the `+z` axis), in radians.
///
/// The value is always normalized to `[0, 2π)`; every arithmetic operation
/// re-normalizes its result.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Bearing(f64);

impl Bearing {
    /// North.
    pub const NORTH: Self = Self(0.0);

    /// Creates a bearing from an angle in radians.
    ///
    /// # Errors
    ///
    /// Returns an error if `radians` is NaN or infinite.
    pub fn from_radians(radians: f64) -> Result<Self> {
        if !radians.is_finite() {
            return Err(CoordError::InvalidNumber {
                what: "bearing",
                value: radians,
            }
            .into());
        }
        Ok(Self::wrap(radians))
    }

    /// Creates a bearing from an angle in degrees.
    ///
    /// # Errors
    ///
    /// Returns an error if `degrees` is NaN or infinite.
    pub fn from_degrees(degrees: f64) -> Result<Self> {
        if !degrees.is_finite() {
            return Err(CoordError::InvalidNumber {
                what: "bearing",
                value: degrees,
            }
            .into());
        }
        Ok(Self::wrap(degrees.rem_euclid(360.0).to_radians()))
    }

    /// Normalizes an already-validated radian value.
    pub(crate) fn wrap(radians: f64) -> Self {
        let value = radians.rem_euclid(TAU);
        // rem_euclid rounds tiny negative inputs up to exactly 2π.
        if value >= TAU {
            Self(0.0)
        } else {
            Self(value)
        }
    }

    /// Returns the bearing in radians, in `[0, 2π)`.
    #[must_use]
    pub fn radians(self) -> f64 {
        self.0
    }

    /// Returns the bearing in degrees, in `[0, 360)`.
    #[must_use]
    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    /// Returns the bearing pointing in the opposite direction.
    #[must_use]
    pub fn flip(self) -> Self {
        Self::wrap(self.0 + PI)
    }

    /// Treats bearings past `π` as negative turns and returns their magnitude.
    #[must_use]
    pub fn fold_to_acute(self) -> Self {
        if self.0 > PI {
            Self(TAU - self.0)
        } else {
            self
        }
    }

    /// Returns the unit direction vector `(sin θ, cos θ)` as `(dx, dz)`.
    #[must_use]
    pub fn direction(self) -> (f64, f64) {
        self.0.sin_cos()
    }

    /// Checks whether two bearings are equal to `places` decimal places.
    ///
    /// If `also_check_flip` is set, a match against the antipode of `other`
    /// also counts, which detects anti-parallel tracks.
    #[must_use]
    pub fn nearly_equal(self, other: Self, places: i32, also_check_flip: bool) -> bool {
        let matches = |target: Self| {
            self == target || rounds_to_zero((self - target).fold_to_acute().0, places)
        };
        matches(other) || (also_check_flip && matches(other.flip()))
    }
}

impl Add for Bearing {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::wrap(self.0 + rhs.0)
    }
}

impl Add<f64> for Bearing {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        Self::wrap(self.0 + rhs)
    }
}

impl Sub for Bearing {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::wrap(self.0 - rhs.0)
    }
}

impl Sub<f64> for Bearing {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        Self::wrap(self.0 - rhs)
    }
}

impl Neg for Bearing {
    type Output = Self;

    fn neg(self) -> Self {
        Self::wrap(TAU - self.0)
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}°", self.degrees())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn deg(value: f64) -> Bearing {
        Bearing::from_degrees(value).unwrap()
    }

    #[test]
    fn degrees_and_radians_agree() {
        let b = deg(90.0);
        assert!((b.radians() - PI / 2.0).abs() < TOL);
        let r = Bearing::from_radians(PI / 2.0).unwrap();
        assert!((r.degrees() - 90.0).abs() < TOL);
    }

    #[test]
    fn non_numeric_input_fails() {
        assert!(Bearing::from_degrees(f64::NAN).is_err());
        assert!(Bearing::from_radians(f64::INFINITY).is_err());
    }

    #[test]
    fn wraps_full_turns() {
        for theta in [0.0, 0.3, 1.0, 2.5, 4.0, 6.0] {
            let a = Bearing::from_radians(theta).unwrap();
            let b = Bearing::from_radians(theta + TAU).unwrap();
            assert!((a.radians() - b.radians()).abs() < TOL, "theta={theta}");
        }
        assert!((deg(-90.0).degrees() - 270.0).abs() < TOL);
        assert!((deg(720.0).radians()).abs() < TOL);
    }

    #[test]
    fn tiny_negative_wraps_below_tau() {
        let b = Bearing::from_radians(-1e-18).unwrap();
        assert!(b.radians() < TAU);
    }

    #[test]
    fn addition_and_subtraction() {
        assert!(((deg(300.0) + deg(90.0)).degrees() - 30.0).abs() < TOL);
        assert!(((deg(30.0) - deg(90.0)).degrees() - 300.0).abs() < TOL);
        assert!(((deg(30.0) + PI).degrees() - 210.0).abs() < TOL);
        assert!(((deg(30.0) - PI).degrees() - 210.0).abs() < TOL);
    }

    #[test]
    fn negation() {
        assert!(((-deg(30.0)).degrees() - 330.0).abs() < TOL);
        assert!((-deg(0.0)).radians().abs() < TOL);
    }

    #[test]
    fn flip_points_opposite() {
        for (input, expected) in [(30.0, 210.0), (120.0, 300.0), (270.0, 90.0)] {
            assert!((deg(input).flip().degrees() - expected).abs() < TOL);
        }
    }

    #[test]
    fn fold_to_acute() {
        assert!((deg(300.0).fold_to_acute().degrees() - 60.0).abs() < TOL);
        assert!((deg(60.0).fold_to_acute().degrees() - 60.0).abs() < TOL);
    }

    #[test]
    fn nearly_equal_within_places() {
        let a = Bearing::from_radians(1.0).unwrap();
        let b = Bearing::from_radians(1.0 + 1e-9).unwrap();
        assert!(a.nearly_equal(b, 7, false));
        assert!(!a.nearly_equal(Bearing::from_radians(1.001).unwrap(), 7, false));
    }

    #[test]
    fn nearly_equal_across_north() {
        let a = Bearing::from_radians(1e-10).unwrap();
        let b = Bearing::from_radians(-1e-10).unwrap();
        assert!(a.nearly_equal(b, 7, false));
    }

    #[test]
    fn nearly_equal_flip() {
        let a = deg(45.0);
        let b = deg(225.0);
        assert!(!a.nearly_equal(b, 7, false));
        assert!(a.nearly_equal(b, 7, true));
    }
}

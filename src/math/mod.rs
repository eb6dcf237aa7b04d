mod bearing;
mod bisection;
mod linear_equation;

pub use bearing::Bearing;
pub use bisection::{Bisection, Outcome};
pub use linear_equation::LinearEquation;

/// 2D point type.
///
/// Track coordinates are `(x, z)`: the `z` axis points north and is stored
/// in the point's `y` slot.
pub type Point2 = nalgebra::Point2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Rotates `point` clockwise by `rotation` radians around `axis`, then
/// translates the result so that `axis` lands on `target`.
///
/// Clockwise matches the bearing convention: rotating the north unit vector
/// `(0, 1)` by `θ` yields `(sin θ, cos θ)`.
#[must_use]
pub fn transform(point: &Point2, rotation: f64, axis: &Point2, target: &Point2) -> Point2 {
    let rotation = nalgebra::Rotation2::new(-rotation);
    target + rotation * (point - axis)
}

/// Returns `true` if `value` rounds to zero at `places` decimal places.
#[must_use]
pub fn rounds_to_zero(value: f64, places: i32) -> bool {
    (value * 10_f64.powi(places)).abs() < 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const TOL: f64 = 1e-7;

    fn origin() -> Point2 {
        Point2::origin()
    }

    #[test]
    fn transform_no_movement() {
        let p = transform(&Point2::new(4.0, 3.0), 0.0, &origin(), &origin());
        assert_eq!(p, Point2::new(4.0, 3.0));
    }

    #[test]
    fn transform_positive_rotation() {
        let p = transform(&Point2::new(4.0, 3.0), 0.643_501_108_793, &origin(), &origin());
        assert_abs_diff_eq!(p, Point2::new(5.0, 0.0), epsilon = TOL);
    }

    #[test]
    fn transform_negative_rotation() {
        let p = transform(&Point2::new(4.0, 3.0), -2.498_091_544_797, &origin(), &origin());
        assert_abs_diff_eq!(p, Point2::new(-5.0, 0.0), epsilon = TOL);
    }

    #[test]
    fn transform_around_other_axis() {
        let axis = Point2::new(-6.0, 2.0);
        let p = transform(&Point2::new(6.0, 7.0), 0.394_791_119_700, &axis, &axis);
        assert_abs_diff_eq!(p, Point2::new(7.0, 2.0), epsilon = TOL);
    }

    #[test]
    fn transform_translation_only() {
        let p = transform(&Point2::new(2.0, 2.0), 0.0, &origin(), &Point2::new(-6.0, 10.0));
        assert_abs_diff_eq!(p, Point2::new(-4.0, 12.0), epsilon = TOL);
    }

    #[test]
    fn transform_rotation_and_translation() {
        let p = transform(
            &Point2::new(12.0, 5.0),
            -1.176_005_207_095,
            &origin(),
            &Point2::new(-6.0, 3.0),
        );
        assert_abs_diff_eq!(p, Point2::new(-6.0, 16.0), epsilon = TOL);
    }

    #[test]
    fn transform_all_three() {
        let p = transform(
            &Point2::new(10.0, 4.0),
            1.080_839_000_541,
            &Point2::new(-5.0, 12.0),
            &Point2::new(3.0, 20.0),
        );
        assert_abs_diff_eq!(p, Point2::new(3.0, 3.0), epsilon = TOL);
    }

    #[test]
    fn rounding_to_places() {
        assert!(rounds_to_zero(0.000_04, 4));
        assert!(!rounds_to_zero(0.000_06, 4));
        assert!(rounds_to_zero(-0.000_04, 4));
    }
}

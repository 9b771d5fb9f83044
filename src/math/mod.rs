use std::cmp::Ordering;

pub mod angle;
pub mod dd;
pub mod distance_2d;
pub mod distance_3d;
pub mod envelope;
pub mod intersect_2d;
pub mod orientation;
pub mod polygon_2d;
pub mod polygon_3d;
pub mod triangle;

pub use dd::DD;
pub use envelope::Envelope;
pub use orientation::{orientation_index, Orientation};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type. Planar coordinates carry a NaN `z`.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Relative error bound used by the orientation filter before falling back
/// to double-double arithmetic.
pub const DP_SAFE_EPSILON: f64 = 1e-15;

/// Creates a planar point whose `z` ordinate is missing (NaN).
#[must_use]
pub fn point_2d(x: f64, y: f64) -> Point3 {
    Point3::new(x, y, f64::NAN)
}

/// Tests two points for equality in X and Y only.
#[inline]
#[must_use]
#[allow(clippy::float_cmp)]
pub fn equals_2d(a: &Point3, b: &Point3) -> bool {
    a.x == b.x && a.y == b.y
}

/// Tests two points for equality in X, Y and Z. Two missing `z` values compare equal.
#[inline]
#[must_use]
#[allow(clippy::float_cmp)]
pub fn equals_3d(a: &Point3, b: &Point3) -> bool {
    equals_2d(a, b) && (a.z == b.z || (a.z.is_nan() && b.z.is_nan()))
}

/// Lexicographic comparison on `(x, y)`.
#[must_use]
pub fn compare_2d(a: &Point3, b: &Point3) -> Ordering {
    a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
}

/// Euclidean distance between two points in the XY plane.
#[inline]
#[must_use]
pub fn distance_xy(a: &Point3, b: &Point3) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_z_compares_equal_in_3d() {
        let a = point_2d(1.0, 2.0);
        let b = point_2d(1.0, 2.0);
        assert!(equals_3d(&a, &b));
        assert!(!equals_3d(&a, &Point3::new(1.0, 2.0, 0.0)));
        assert!(equals_2d(&a, &Point3::new(1.0, 2.0, 0.0)));
    }

    #[test]
    fn compare_orders_by_x_then_y() {
        assert_eq!(compare_2d(&point_2d(0.0, 5.0), &point_2d(1.0, 0.0)), Ordering::Less);
        assert_eq!(compare_2d(&point_2d(1.0, 1.0), &point_2d(1.0, 0.0)), Ordering::Greater);
        assert_eq!(compare_2d(&point_2d(1.0, 1.0), &point_2d(1.0, 1.0)), Ordering::Equal);
    }
}

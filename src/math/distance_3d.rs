use super::{equals_3d, Point3, Vector3};
use crate::error::{NumericError, Result};

/// Distance between two points in 3D.
///
/// If either point has a missing `z`, the planar distance is returned.
#[must_use]
pub fn distance(p0: &Point3, p1: &Point3) -> f64 {
    if p0.z.is_nan() || p1.z.is_nan() {
        return super::distance_xy(p0, p1);
    }
    (p1 - p0).norm()
}

/// Closest point to `p` on the segment `a-b` in 3D.
///
/// # Errors
///
/// Returns [`NumericError::NanOrdinate`] if any ordinate involved is NaN.
pub fn closest_point_on_segment(p: &Point3, a: &Point3, b: &Point3) -> Result<Point3> {
    if equals_3d(a, b) {
        return Ok(*a);
    }
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2.is_nan() {
        return Err(NumericError::NanOrdinate.into());
    }
    let r = (p - a).dot(&ab) / len2;
    if r.is_nan() {
        return Err(NumericError::NanOrdinate.into());
    }
    if r <= 0.0 {
        return Ok(*a);
    }
    if r >= 1.0 {
        return Ok(*b);
    }
    Ok(a + ab * r)
}

/// Distance from `p` to the segment `a-b` in 3D.
///
/// # Errors
///
/// Returns [`NumericError::NanOrdinate`] if any ordinate involved is NaN.
pub fn distance_point_segment(p: &Point3, a: &Point3, b: &Point3) -> Result<f64> {
    let q = closest_point_on_segment(p, a, b)?;
    Ok(distance(p, &q))
}

/// Pair of closest points between segments `a-b` and `c-d` in 3D.
///
/// The first point lies on `a-b`, the second on `c-d`. Degenerate (zero
/// length) segments are treated as points.
///
/// # Errors
///
/// Returns [`NumericError::NanOrdinate`] if any ordinate involved is NaN.
pub fn closest_points_segment_segment(
    a: &Point3,
    b: &Point3,
    c: &Point3,
    d: &Point3,
) -> Result<(Point3, Point3)> {
    if equals_3d(a, b) {
        return Ok((*a, closest_point_on_segment(a, c, d)?));
    }
    if equals_3d(c, d) {
        return Ok((closest_point_on_segment(c, a, b)?, *c));
    }

    let d1: Vector3 = b - a;
    let d2: Vector3 = d - c;
    let r: Vector3 = a - c;

    let aa = d1.dot(&d1);
    let bb = d1.dot(&d2);
    let cc = d2.dot(&d2);
    let dd = d1.dot(&r);
    let ee = d2.dot(&r);

    let denom = aa * cc - bb * bb;
    if denom.is_nan() || dd.is_nan() || ee.is_nan() {
        return Err(NumericError::NanOrdinate.into());
    }

    // Parameter on the first segment, with parallel segments pinned to its start.
    let mut s = if denom > 0.0 {
        ((bb * ee - cc * dd) / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let mut t = (bb * s + ee) / cc;
    if t < 0.0 {
        t = 0.0;
        s = (-dd / aa).clamp(0.0, 1.0);
    } else if t > 1.0 {
        t = 1.0;
        s = ((bb - dd) / aa).clamp(0.0, 1.0);
    }

    Ok((a + d1 * s, c + d2 * t))
}

/// Distance between segments `a-b` and `c-d` in 3D.
///
/// # Errors
///
/// Returns [`NumericError::NanOrdinate`] if any ordinate involved is NaN.
pub fn distance_segment_segment(a: &Point3, b: &Point3, c: &Point3, d: &Point3) -> Result<f64> {
    let (p, q) = closest_points_segment_segment(a, b, c, d)?;
    Ok(distance(&p, &q))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::GeokernError;
    use crate::math::point_2d;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn point_distance_falls_back_to_2d() {
        assert_abs_diff_eq!(distance(&p(0.0, 0.0, 0.0), &p(3.0, 4.0, 12.0)), 13.0);
        assert_abs_diff_eq!(distance(&point_2d(0.0, 0.0), &p(3.0, 4.0, 12.0)), 5.0);
    }

    #[test]
    fn point_segment_projection_and_clamp() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(0.0, 0.0, 10.0);
        assert_abs_diff_eq!(distance_point_segment(&p(3.0, 4.0, 5.0), &a, &b).unwrap(), 5.0);
        assert_abs_diff_eq!(distance_point_segment(&p(0.0, 0.0, -2.0), &a, &b).unwrap(), 2.0);
        let q = closest_point_on_segment(&p(1.0, 0.0, 12.0), &a, &b).unwrap();
        assert!(equals_3d(&q, &b));
    }

    #[test]
    fn skew_segments() {
        // X axis segment at z=0 and Y axis segment at z=1 cross over the origin.
        let (c0, c1) = closest_points_segment_segment(
            &p(-1.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.0, -1.0, 1.0),
            &p(0.0, 1.0, 1.0),
        )
        .unwrap();
        assert_abs_diff_eq!(c0.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c1.z, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(distance(&c0, &c1), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_segments() {
        let d = distance_segment_segment(
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.5, 0.0, 5.0),
            &p(3.0, 0.0, 5.0),
        )
        .unwrap();
        assert_abs_diff_eq!(d, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn disjoint_collinear_segments() {
        let d = distance_segment_segment(
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(3.0, 0.0, 0.0),
            &p(4.0, 0.0, 0.0),
        )
        .unwrap();
        assert_abs_diff_eq!(d, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn endpoint_regions() {
        // Closest approach lies beyond the end of the first segment.
        let d = distance_segment_segment(
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(3.0, -1.0, 0.0),
            &p(3.0, 1.0, 0.0),
        )
        .unwrap();
        assert_abs_diff_eq!(d, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_segment_is_a_point() {
        let d = distance_segment_segment(
            &p(0.0, 0.0, 3.0),
            &p(0.0, 0.0, 3.0),
            &p(-1.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
        )
        .unwrap();
        assert_abs_diff_eq!(d, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn nan_ordinate_is_rejected() {
        let result = distance_segment_segment(
            &point_2d(0.0, 0.0),
            &point_2d(1.0, 0.0),
            &point_2d(0.0, 1.0),
            &point_2d(1.0, 1.0),
        );
        assert!(matches!(
            result,
            Err(GeokernError::Numeric(NumericError::NanOrdinate))
        ));
    }
}

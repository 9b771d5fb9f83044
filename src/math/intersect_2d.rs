use tracing::debug;

use super::{distance_xy, point_2d, Point3};
use crate::error::{NumericError, Result};

/// Intersection of the infinite lines `p1-p2` and `q1-q2` using homogeneous
/// coordinates.
///
/// Parallel lines are not special-cased: they produce a zero `w` and surface
/// through the non-finite check.
///
/// # Errors
///
/// Returns [`NumericError::NotRepresentable`] if either ordinate of the
/// result is NaN or infinite.
pub fn hcoordinate_intersection(
    p1: &Point3,
    p2: &Point3,
    q1: &Point3,
    q2: &Point3,
) -> Result<Point3> {
    // Line through p1, p2 as (px, py, pw).
    let px = p1.y - p2.y;
    let py = p2.x - p1.x;
    let pw = p1.x * p2.y - p2.x * p1.y;

    let qx = q1.y - q2.y;
    let qy = q2.x - q1.x;
    let qw = q1.x * q2.y - q2.x * q1.y;

    let x = py * qw - qy * pw;
    let y = qx * pw - px * qw;
    let w = px * qy - qx * py;

    let x_int = x / w;
    let y_int = y / w;
    if !x_int.is_finite() || !y_int.is_finite() {
        return Err(NumericError::NotRepresentable { x: x_int, y: y_int }.into());
    }
    Ok(point_2d(x_int, y_int))
}

/// Homogeneous intersection computed after translating all four points so the
/// centre of the overlap of the two segment envelopes sits at the origin.
///
/// Falls back to [`central_endpoint_intersection`] when the homogeneous
/// computation is not representable.
#[must_use]
pub fn normalized_intersection(p1: &Point3, p2: &Point3, q1: &Point3, q2: &Point3) -> Point3 {
    let centre = overlap_centre(p1, p2, q1, q2);
    let shift = |p: &Point3| point_2d(p.x - centre.x, p.y - centre.y);
    let (n1, n2, n3, n4) = (shift(p1), shift(p2), shift(q1), shift(q2));

    let local = match hcoordinate_intersection(&n1, &n2, &n3, &n4) {
        Ok(pt) => pt,
        Err(err) => {
            debug!(%err, "homogeneous intersection failed, using central endpoint");
            central_endpoint_intersection(&n1, &n2, &n3, &n4)
        }
    };
    point_2d(local.x + centre.x, local.y + centre.y)
}

/// Midpoint of the intersection of the envelopes of `p1-p2` and `q1-q2`.
fn overlap_centre(p1: &Point3, p2: &Point3, q1: &Point3, q2: &Point3) -> Point3 {
    let int_min_x = p1.x.min(p2.x).max(q1.x.min(q2.x));
    let int_max_x = p1.x.max(p2.x).min(q1.x.max(q2.x));
    let int_min_y = p1.y.min(p2.y).max(q1.y.min(q2.y));
    let int_max_y = p1.y.max(p2.y).min(q1.y.max(q2.y));
    point_2d((int_min_x + int_max_x) / 2.0, (int_min_y + int_max_y) / 2.0)
}

/// Approximates the intersection of two nearly-parallel segments by the input
/// endpoint closest to the average of all four endpoints.
///
/// The result is always one of the inputs, so it is finite whenever they are.
#[must_use]
pub fn central_endpoint_intersection(
    p1: &Point3,
    p2: &Point3,
    q1: &Point3,
    q2: &Point3,
) -> Point3 {
    let pts = [p1, p2, q1, q2];
    #[allow(clippy::cast_precision_loss)]
    let n = pts.len() as f64;
    let avg = point_2d(
        pts.iter().map(|p| p.x).sum::<f64>() / n,
        pts.iter().map(|p| p.y).sum::<f64>() / n,
    );

    let mut nearest = *p1;
    let mut min_dist = f64::INFINITY;
    for p in pts {
        let dist = distance_xy(p, &avg);
        if dist < min_dist {
            min_dist = dist;
            nearest = *p;
        }
    }
    nearest
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GeokernError;
    use crate::math::TOLERANCE;

    fn p(x: f64, y: f64) -> Point3 {
        point_2d(x, y)
    }

    #[test]
    fn perpendicular_lines() {
        let pt = hcoordinate_intersection(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.5, -1.0), &p(0.5, 1.0))
            .unwrap();
        assert!((pt.x - 0.5).abs() < TOLERANCE);
        assert!(pt.y.abs() < TOLERANCE);
    }

    #[test]
    fn lines_intersect_beyond_segments() {
        let pt = hcoordinate_intersection(&p(0.0, 0.0), &p(1.0, 1.0), &p(3.0, 0.0), &p(4.0, -1.0))
            .unwrap();
        assert!((pt.x - 1.5).abs() < TOLERANCE);
        assert!((pt.y - 1.5).abs() < TOLERANCE);
    }

    #[test]
    fn parallel_lines_are_not_representable() {
        let result =
            hcoordinate_intersection(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0), &p(1.0, 1.0));
        assert!(matches!(
            result,
            Err(GeokernError::Numeric(NumericError::NotRepresentable { .. }))
        ));
    }

    #[test]
    fn normalization_preserves_result_far_from_origin() {
        let off = 1.0e7;
        let pt = normalized_intersection(
            &p(off, off),
            &p(off + 2.0, off + 2.0),
            &p(off, off + 2.0),
            &p(off + 2.0, off),
        );
        assert!((pt.x - (off + 1.0)).abs() < 1e-6);
        assert!((pt.y - (off + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn normalization_falls_back_for_parallel_input() {
        let pt = normalized_intersection(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, 0.0), &p(3.0, 0.0));
        assert!(pt.x.is_finite() && pt.y.is_finite());
    }

    #[test]
    fn central_endpoint_picks_input_closest_to_average() {
        // Average is (1.25, 0.25); q1 = (1, 0) is the closest input.
        let pt = central_endpoint_intersection(&p(0.0, 0.0), &p(3.0, 1.0), &p(1.0, 0.0), &p(1.0, 0.0));
        assert!((pt.x - 1.0).abs() < TOLERANCE);
        assert!(pt.y.abs() < TOLERANCE);
    }
}

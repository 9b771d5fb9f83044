use super::orientation::{orientation_index, Orientation};
use super::{equals_2d, Point3};

/// Computes the signed area of a ring in the XY plane (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. The ring may be
/// given open or closed.
#[must_use]
pub fn signed_area_2d(points: &[Point3]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Tests whether a closed ring is oriented counter-clockwise.
///
/// Uses the orientation at the highest vertex, skipping repeated copies of
/// it, so the result is robust for rings with collinear or flat tops.
/// Rings with fewer than three distinct vertices report `false`.
#[must_use]
pub fn is_ccw(ring: &[Point3]) -> bool {
    if ring.len() < 4 {
        return false;
    }
    // Number of points without the closing point.
    let n_pts = ring.len() - 1;

    let mut hi_index = 0;
    for i in 1..=n_pts {
        if ring[i].y > ring[hi_index].y {
            hi_index = i;
        }
    }
    let hi_pt = ring[hi_index];

    let mut i_prev = hi_index;
    loop {
        i_prev = if i_prev == 0 { n_pts - 1 } else { i_prev - 1 };
        if !equals_2d(&ring[i_prev], &hi_pt) || i_prev == hi_index {
            break;
        }
    }

    let mut i_next = hi_index;
    loop {
        i_next = (i_next + 1) % n_pts;
        if !equals_2d(&ring[i_next], &hi_pt) || i_next == hi_index {
            break;
        }
    }

    let prev = ring[i_prev];
    let next = ring[i_next];
    if equals_2d(&prev, &hi_pt) || equals_2d(&next, &hi_pt) || equals_2d(&prev, &next) {
        return false;
    }

    match orientation_index(&prev, &hi_pt, &next) {
        // Flat top: CCW iff the ring walks right-to-left across it.
        Orientation::Collinear => prev.x > next.x,
        o => o == Orientation::CounterClockwise,
    }
}

/// Whether the first and last point of a sequence coincide in XY.
#[must_use]
pub fn is_closed(points: &[Point3]) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => equals_2d(first, last),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{point_2d, TOLERANCE};

    fn square_ccw() -> Vec<Point3> {
        vec![
            point_2d(0.0, 0.0),
            point_2d(1.0, 0.0),
            point_2d(1.0, 1.0),
            point_2d(0.0, 1.0),
            point_2d(0.0, 0.0),
        ]
    }

    #[test]
    fn signed_area_ccw_square() {
        assert!((signed_area_2d(&square_ccw()) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = square_ccw();
        pts.reverse();
        assert!((signed_area_2d(&pts) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area_2d(&[point_2d(0.0, 0.0)]).abs() < TOLERANCE);
        assert!(signed_area_2d(&[]).abs() < TOLERANCE);
    }

    #[test]
    fn ccw_square_detected() {
        assert!(is_ccw(&square_ccw()));
        let mut cw = square_ccw();
        cw.reverse();
        assert!(!is_ccw(&cw));
    }

    #[test]
    fn ccw_with_repeated_top_vertex() {
        let ring = vec![
            point_2d(0.0, 0.0),
            point_2d(2.0, 0.0),
            point_2d(1.0, 2.0),
            point_2d(1.0, 2.0),
            point_2d(0.0, 0.0),
        ];
        assert!(is_ccw(&ring));
    }

    #[test]
    fn ccw_flat_top() {
        // Top edge is horizontal; the highest vertex is its right end.
        let ring = vec![
            point_2d(0.0, 0.0),
            point_2d(2.0, 0.0),
            point_2d(2.0, 1.0),
            point_2d(1.0, 1.0),
            point_2d(0.0, 1.0),
            point_2d(0.0, 0.0),
        ];
        assert!(is_ccw(&ring));
    }

    #[test]
    fn degenerate_ring_is_not_ccw() {
        let ring = vec![point_2d(0.0, 0.0), point_2d(1.0, 0.0), point_2d(0.0, 0.0)];
        assert!(!is_ccw(&ring));
    }

    #[test]
    fn closed_detection() {
        assert!(is_closed(&square_ccw()));
        assert!(!is_closed(&square_ccw()[..3]));
        assert!(!is_closed(&[]));
    }
}

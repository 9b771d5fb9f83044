use tracing::debug;

use super::line_intersection::{LineIntersection, LineIntersector};
use crate::math::distance_2d::point_to_segment;
use crate::math::envelope::{envelope_intersects_point, envelopes_intersect};
use crate::math::intersect_2d::normalized_intersection;
use crate::math::{equals_2d, orientation_index, Orientation, Point3};

/// Segment intersector built on the robust orientation predicate.
///
/// Topological classification (none, point, collinear, proper) is exact.
/// Computed proper intersection points are approximate but always lie in
/// the envelopes of both input segments.
#[derive(Debug, Default, Clone, Copy)]
pub struct RobustLineIntersector;

impl RobustLineIntersector {
    /// Creates a new robust intersector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LineIntersector for RobustLineIntersector {
    fn compute_intersection_point(
        &self,
        p: &Point3,
        p1: &Point3,
        p2: &Point3,
    ) -> LineIntersection {
        let input = [[*p1, *p2], [*p, *p]];
        if envelope_intersects_point(p1, p2, p)
            && orientation_index(p1, p2, p) == Orientation::Collinear
            && orientation_index(p2, p1, p) == Orientation::Collinear
        {
            let proper = !equals_2d(p, p1) && !equals_2d(p, p2);
            return LineIntersection::point(input, *p, proper);
        }
        LineIntersection::none(input)
    }

    fn compute_intersection_line(
        &self,
        p1: &Point3,
        p2: &Point3,
        q1: &Point3,
        q2: &Point3,
    ) -> LineIntersection {
        let input = [[*p1, *p2], [*q1, *q2]];
        if !envelopes_intersect(p1, p2, q1, q2) {
            return LineIntersection::none(input);
        }

        let pq1 = orientation_index(p1, p2, q1).as_i32();
        let pq2 = orientation_index(p1, p2, q2).as_i32();
        if pq1 * pq2 > 0 {
            return LineIntersection::none(input);
        }

        let qp1 = orientation_index(q1, q2, p1).as_i32();
        let qp2 = orientation_index(q1, q2, p2).as_i32();
        if qp1 * qp2 > 0 {
            return LineIntersection::none(input);
        }

        if pq1 == 0 && pq2 == 0 && qp1 == 0 && qp2 == 0 {
            return collinear_intersection(input);
        }

        // An endpoint lies on the other segment: copy it exactly rather than
        // computing it.
        if pq1 == 0 || pq2 == 0 || qp1 == 0 || qp2 == 0 {
            let pt = if equals_2d(p1, q1) || equals_2d(p1, q2) {
                *p1
            } else if equals_2d(p2, q1) || equals_2d(p2, q2) {
                *p2
            } else if pq1 == 0 {
                *q1
            } else if pq2 == 0 {
                *q2
            } else if qp1 == 0 {
                *p1
            } else {
                *p2
            };
            return LineIntersection::point(input, pt, false);
        }

        LineIntersection::point(input, proper_intersection(p1, p2, q1, q2), true)
    }
}

/// Overlap of two collinear segments whose envelopes intersect.
fn collinear_intersection(input: [[Point3; 2]; 2]) -> LineIntersection {
    let [[p1, p2], [q1, q2]] = input;
    let q1_in_p = envelope_intersects_point(&p1, &p2, &q1);
    let q2_in_p = envelope_intersects_point(&p1, &p2, &q2);
    let p1_in_q = envelope_intersects_point(&q1, &q2, &p1);
    let p2_in_q = envelope_intersects_point(&q1, &q2, &p2);

    if q1_in_p && q2_in_p {
        return LineIntersection::collinear(input, q1, q2);
    }
    if p1_in_q && p2_in_q {
        return LineIntersection::collinear(input, p1, p2);
    }

    // Partial overlaps; touching at a single shared endpoint is a point.
    let candidates = [
        (q1_in_p && p1_in_q, q1, p1, !q2_in_p && !p2_in_q),
        (q1_in_p && p2_in_q, q1, p2, !q2_in_p && !p1_in_q),
        (q2_in_p && p1_in_q, q2, p1, !q1_in_p && !p2_in_q),
        (q2_in_p && p2_in_q, q2, p2, !q1_in_p && !p1_in_q),
    ];
    for (overlaps, a, b, isolated) in candidates {
        if overlaps {
            if equals_2d(&a, &b) && isolated {
                return LineIntersection::point(input, a, false);
            }
            return LineIntersection::collinear(input, a, b);
        }
    }
    LineIntersection::none(input)
}

/// Proper intersection point, forced into both segment envelopes.
fn proper_intersection(p1: &Point3, p2: &Point3, q1: &Point3, q2: &Point3) -> Point3 {
    let pt = normalized_intersection(p1, p2, q1, q2);
    if envelope_intersects_point(p1, p2, &pt) && envelope_intersects_point(q1, q2, &pt) {
        return pt;
    }
    debug!(x = pt.x, y = pt.y, "intersection outside segment envelopes, snapping to endpoint");
    nearest_endpoint(p1, p2, q1, q2)
}

/// The endpoint of either segment that lies closest to the other segment.
fn nearest_endpoint(p1: &Point3, p2: &Point3, q1: &Point3, q2: &Point3) -> Point3 {
    let candidates = [
        (p1, point_to_segment(p1, q1, q2)),
        (p2, point_to_segment(p2, q1, q2)),
        (q1, point_to_segment(q1, p1, p2)),
        (q2, point_to_segment(q2, p1, p2)),
    ];
    let mut nearest = candidates[0];
    for cand in &candidates[1..] {
        if cand.1 < nearest.1 {
            nearest = *cand;
        }
    }
    *nearest.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::point_2d;
    use crate::operations::intersection::IntersectionKind;

    fn li() -> RobustLineIntersector {
        RobustLineIntersector::new()
    }

    #[test]
    fn crossing_diagonals() {
        let r = li().compute_intersection_line(
            &point_2d(0.0, 0.0),
            &point_2d(2.0, 2.0),
            &point_2d(0.0, 2.0),
            &point_2d(2.0, 0.0),
        );
        assert_eq!(r.kind(), IntersectionKind::Point);
        assert!(r.is_proper());
        let pt = r.intersection(0).unwrap();
        assert_abs_diff_eq!(pt.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pt.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn collinear_overlap() {
        let r = li().compute_intersection_line(
            &point_2d(0.0, 0.0),
            &point_2d(2.0, 0.0),
            &point_2d(1.0, 0.0),
            &point_2d(3.0, 0.0),
        );
        assert_eq!(r.kind(), IntersectionKind::Collinear);
        assert!(!r.is_proper());
        assert!(r.is_intersection(&point_2d(1.0, 0.0)));
        assert!(r.is_intersection(&point_2d(2.0, 0.0)));
    }

    #[test]
    fn collinear_touching_endpoints_is_a_point() {
        let r = li().compute_intersection_line(
            &point_2d(0.0, 0.0),
            &point_2d(1.0, 0.0),
            &point_2d(1.0, 0.0),
            &point_2d(3.0, 0.0),
        );
        assert_eq!(r.kind(), IntersectionKind::Point);
        assert!(r.is_end_point());
    }

    #[test]
    fn collinear_disjoint() {
        let r = li().compute_intersection_line(
            &point_2d(0.0, 0.0),
            &point_2d(1.0, 0.0),
            &point_2d(2.0, 0.0),
            &point_2d(3.0, 0.0),
        );
        assert!(!r.has_intersection());
    }

    #[test]
    fn touching_endpoint_is_copied() {
        let q1 = Point3::new(1.0, 0.0, 7.0);
        let r = li().compute_intersection_line(
            &point_2d(0.0, 0.0),
            &point_2d(2.0, 0.0),
            &q1,
            &point_2d(1.0, 5.0),
        );
        assert_eq!(r.kind(), IntersectionKind::Point);
        assert!(!r.is_proper());
        assert_abs_diff_eq!(r.intersection(0).unwrap().z, 7.0);
        assert!(r.is_interior_intersection_on(0));
        assert!(!r.is_interior_intersection_on(1));
    }

    #[test]
    fn same_side_rejected() {
        let r = li().compute_intersection_line(
            &point_2d(0.0, 0.0),
            &point_2d(2.0, 0.0),
            &point_2d(0.0, 1.0),
            &point_2d(2.0, 3.0),
        );
        assert!(!r.has_intersection());
    }

    #[test]
    fn point_on_segment() {
        let p1 = point_2d(0.0, 0.0);
        let p2 = point_2d(4.0, 4.0);
        let inside = li().compute_intersection_point(&point_2d(1.0, 1.0), &p1, &p2);
        assert!(inside.is_proper());
        let end = li().compute_intersection_point(&p2, &p1, &p2);
        assert!(end.has_intersection());
        assert!(!end.is_proper());
        let off = li().compute_intersection_point(&point_2d(1.0, 1.5), &p1, &p2);
        assert!(!off.has_intersection());
    }

    #[test]
    fn nearly_parallel_stays_in_envelopes() {
        let p1 = point_2d(0.0, 0.0);
        let p2 = point_2d(1.0e6, 1.0);
        let q1 = point_2d(0.0, 1.0e-7);
        let q2 = point_2d(1.0e6, 1.0 - 1.0e-7);
        let r = li().compute_intersection_line(&p1, &p2, &q1, &q2);
        assert!(r.is_proper());
        let pt = r.intersection(0).unwrap();
        assert!(envelope_intersects_point(&p1, &p2, &pt));
        assert!(envelope_intersects_point(&q1, &q2, &pt));
    }
}

use super::line_intersection::{LineIntersection, LineIntersector};
use crate::math::{equals_2d, point_2d, Point3};

/// Segment intersector using plain floating-point line equations.
///
/// Faster than [`RobustLineIntersector`](super::RobustLineIntersector) but
/// may misclassify near-degenerate configurations. Kept for comparison and
/// for callers that control their input precision.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonRobustLineIntersector;

impl NonRobustLineIntersector {
    /// Creates a new non-robust intersector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Line `a*x + b*y + c = 0` through two points.
fn line_coefficients(p1: &Point3, p2: &Point3) -> (f64, f64, f64) {
    (p2.y - p1.y, p1.x - p2.x, p2.x * p1.y - p1.x * p2.y)
}

fn same_sign_non_zero(a: f64, b: f64) -> bool {
    (a < 0.0 && b < 0.0) || (a > 0.0 && b > 0.0)
}

/// Parameter of `p` along `p1-p2`, measured on the dominant axis.
fn r_parameter(p1: &Point3, p2: &Point3, p: &Point3) -> f64 {
    let dx = (p2.x - p1.x).abs();
    let dy = (p2.y - p1.y).abs();
    if dx > dy {
        (p.x - p1.x) / (p2.x - p1.x)
    } else {
        (p.y - p1.y) / (p2.y - p1.y)
    }
}

impl LineIntersector for NonRobustLineIntersector {
    #[allow(clippy::float_cmp)]
    fn compute_intersection_point(
        &self,
        p: &Point3,
        p1: &Point3,
        p2: &Point3,
    ) -> LineIntersection {
        let input = [[*p1, *p2], [*p, *p]];
        let (a1, b1, c1) = line_coefficients(p1, p2);
        let r = a1 * p.x + b1 * p.y + c1;
        if r != 0.0 {
            return LineIntersection::none(input);
        }
        let dist = r_parameter(p1, p2, p);
        if !(0.0..=1.0).contains(&dist) {
            return LineIntersection::none(input);
        }
        let proper = !equals_2d(p, p1) && !equals_2d(p, p2);
        LineIntersection::point(input, *p, proper)
    }

    #[allow(clippy::float_cmp)]
    fn compute_intersection_line(
        &self,
        p1: &Point3,
        p2: &Point3,
        q1: &Point3,
        q2: &Point3,
    ) -> LineIntersection {
        let input = [[*p1, *p2], [*q1, *q2]];

        let (a1, b1, c1) = line_coefficients(p1, p2);
        let r3 = a1 * q1.x + b1 * q1.y + c1;
        let r4 = a1 * q2.x + b1 * q2.y + c1;
        if same_sign_non_zero(r3, r4) {
            return LineIntersection::none(input);
        }

        let (a2, b2, c2) = line_coefficients(q1, q2);
        let r1 = a2 * p1.x + b2 * p1.y + c2;
        let r2 = a2 * p2.x + b2 * p2.y + c2;
        if same_sign_non_zero(r1, r2) {
            return LineIntersection::none(input);
        }

        let denom = a1 * b2 - a2 * b1;
        if denom == 0.0 {
            return collinear_intersection(input);
        }
        let pt = point_2d((b1 * c2 - b2 * c1) / denom, (a2 * c1 - a1 * c2) / denom);
        let proper = [p1, p2, q1, q2].iter().all(|e| !equals_2d(&pt, e));
        LineIntersection::point(input, pt, proper)
    }
}

fn collinear_intersection(input: [[Point3; 2]; 2]) -> LineIntersection {
    let [[p1, p2], [q1, q2]] = input;
    let t_q1 = r_parameter(&p1, &p2, &q1);
    let t_q2 = r_parameter(&p1, &p2, &q2);
    let ((lo, t_lo), (hi, t_hi)) = if t_q1 < t_q2 {
        ((q1, t_q1), (q2, t_q2))
    } else {
        ((q2, t_q2), (q1, t_q1))
    };

    if t_lo > 1.0 || t_hi < 0.0 {
        return LineIntersection::none(input);
    }
    if equals_2d(&hi, &p1) {
        return LineIntersection::point(input, p1, false);
    }
    if equals_2d(&lo, &p2) {
        return LineIntersection::point(input, p2, false);
    }

    let start = if t_lo > 0.0 { lo } else { p1 };
    let end = if t_hi < 1.0 { hi } else { p2 };
    LineIntersection::collinear(input, start, end)
}

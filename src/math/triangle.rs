use super::{point_2d, Point3};

/// Twice the signed area of triangle `a, b, c`; positive when counter-clockwise.
#[must_use]
pub fn area2(a: &Point3, b: &Point3, c: &Point3) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Three times the centroid of triangle `a, b, c` (the plain coordinate sum).
#[must_use]
pub fn centroid3(a: &Point3, b: &Point3, c: &Point3) -> (f64, f64) {
    (a.x + b.x + c.x, a.y + b.y + c.y)
}

/// Centre of the circle passing through `a`, `b` and `c`.
///
/// Computed relative to `c` to limit cancellation. Collinear input yields a
/// non-finite point.
#[must_use]
pub fn circumcentre(a: &Point3, b: &Point3, c: &Point3) -> Point3 {
    let ax = a.x - c.x;
    let ay = a.y - c.y;
    let bx = b.x - c.x;
    let by = b.y - c.y;

    let denom = 2.0 * det(ax, ay, bx, by);
    let numx = det(ay, ax * ax + ay * ay, by, bx * bx + by * by);
    let numy = det(ax, ax * ax + ay * ay, bx, bx * bx + by * by);

    point_2d(c.x - numx / denom, c.y + numy / denom)
}

fn det(m00: f64, m01: f64, m10: f64, m11: f64) -> f64 {
    m00 * m11 - m01 * m10
}

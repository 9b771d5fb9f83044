use super::{point_2d, Point3};

/// Returns the minimum distance from point `(px, py)` to the line segment
/// from `(ax, ay)` to `(bx, by)`.
#[must_use]
pub fn point_to_segment_dist(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let (cx, cy) = closest_on_segment(px, py, ax, ay, bx, by);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Distance from `p` to the segment `a-b` in the XY plane.
#[must_use]
pub fn point_to_segment(p: &Point3, a: &Point3, b: &Point3) -> f64 {
    point_to_segment_dist(p.x, p.y, a.x, a.y, b.x, b.y)
}

/// Closest point to `p` on the segment `a-b` in the XY plane.
#[must_use]
pub fn closest_point_on_segment(p: &Point3, a: &Point3, b: &Point3) -> Point3 {
    let (x, y) = closest_on_segment(p.x, p.y, a.x, a.y, b.x, b.y);
    point_2d(x, y)
}

fn closest_on_segment(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> (f64, f64) {
    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (ax, ay);
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((px - ax) * dx + (py - ay) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);
    (ax + t * dx, ay + t * dy)
}

use std::f64::consts::PI;

use super::Point3;

/// Angle of the vector `p0 -> p1` relative to the positive X axis, in `(-PI, PI]`.
#[must_use]
pub fn angle(p0: &Point3, p1: &Point3) -> f64 {
    (p1.y - p0.y).atan2(p1.x - p0.x)
}

/// Smallest angle between two angles, in `[0, PI]`.
#[must_use]
pub fn diff(ang1: f64, ang2: f64) -> f64 {
    let delta = (ang1 - ang2).abs();
    if delta > PI {
        2.0 * PI - delta
    } else {
        delta
    }
}

/// Unoriented smallest angle at `tail` between the rays to `tip1` and `tip2`.
#[must_use]
pub fn angle_between(tip1: &Point3, tail: &Point3, tip2: &Point3) -> f64 {
    diff(angle(tail, tip1), angle(tail, tip2))
}

/// Whether the angle `p0-p1-p2` at `p1` is obtuse.
#[must_use]
pub fn is_obtuse(p0: &Point3, p1: &Point3, p2: &Point3) -> bool {
    let dx0 = p0.x - p1.x;
    let dy0 = p0.y - p1.y;
    let dx1 = p2.x - p1.x;
    let dy1 = p2.y - p1.y;
    dx0 * dx1 + dy0 * dy1 < 0.0
}

use tracing::trace;

use super::{point_2d, Point3, DD, DP_SAFE_EPSILON};
use crate::error::{NumericError, Result};

/// Turn direction of a point relative to a directed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The point lies to the right of the line.
    Clockwise,
    /// The point lies on the line.
    Collinear,
    /// The point lies to the left of the line.
    CounterClockwise,
}

impl Orientation {
    /// Alias for [`Orientation::Clockwise`].
    pub const RIGHT: Self = Self::Clockwise;
    /// Alias for [`Orientation::CounterClockwise`].
    pub const LEFT: Self = Self::CounterClockwise;

    /// Legacy integer code: `-1`, `0` or `1`.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Clockwise => -1,
            Self::Collinear => 0,
            Self::CounterClockwise => 1,
        }
    }

    /// The orientation seen from the opposite direction.
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::Collinear => Self::Collinear,
            Self::CounterClockwise => Self::Clockwise,
        }
    }

    fn from_sign(sign: i32) -> Self {
        match sign.signum() {
            1 => Self::CounterClockwise,
            -1 => Self::Clockwise,
            _ => Self::Collinear,
        }
    }
}

impl From<i32> for Orientation {
    fn from(value: i32) -> Self {
        Self::from_sign(value)
    }
}

impl From<Orientation> for i32 {
    fn from(value: Orientation) -> Self {
        value.as_i32()
    }
}

/// Returns the orientation of `q` relative to the directed line `p1 -> p2`.
///
/// A floating-point determinant is used when its magnitude clears the
/// rounding error bound; otherwise the determinant is recomputed in
/// double-double precision.
#[must_use]
pub fn orientation_index(p1: &Point3, p2: &Point3, q: &Point3) -> Orientation {
    if let Some(orientation) = orientation_index_filter(p1, p2, q) {
        return orientation;
    }
    trace!(?p1, ?p2, ?q, "orientation filter inconclusive, using double-double");
    orientation_index_dd(p1, p2, q)
}

/// Integer form of [`orientation_index`] over raw ordinates.
#[must_use]
pub fn orientation_index_xy(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> i32 {
    orientation_index(&point_2d(x1, y1), &point_2d(x2, y2), &point_2d(x, y)).as_i32()
}

/// Orientation computed entirely in double-double arithmetic.
#[must_use]
pub fn orientation_index_dd(p1: &Point3, p2: &Point3, q: &Point3) -> Orientation {
    let dx1 = DD::from(p2.x) - p1.x;
    let dy1 = DD::from(p2.y) - p1.y;
    let dx2 = DD::from(q.x) - p2.x;
    let dy2 = DD::from(q.y) - p2.y;
    Orientation::from_sign(DD::determinant(dx1, dy1, dx2, dy2).signum())
}

/// Fast orientation filter. Returns `None` when the floating-point
/// determinant is too close to zero to trust its sign.
fn orientation_index_filter(pa: &Point3, pb: &Point3, pc: &Point3) -> Option<Orientation> {
    let detleft = (pa.x - pc.x) * (pb.y - pc.y);
    let detright = (pa.y - pc.y) * (pb.x - pc.x);
    let det = detleft - detright;

    let detsum = if detleft > 0.0 {
        if detright <= 0.0 {
            return Some(sign_of(det));
        }
        detleft + detright
    } else if detleft < 0.0 {
        if detright >= 0.0 {
            return Some(sign_of(det));
        }
        -detleft - detright
    } else {
        return Some(sign_of(det));
    };

    let errbound = DP_SAFE_EPSILON * detsum;
    if det >= errbound || -det >= errbound {
        return Some(sign_of(det));
    }
    None
}

fn sign_of(value: f64) -> Orientation {
    if value > 0.0 {
        Orientation::CounterClockwise
    } else if value < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Intersection point of the infinite lines `p1-p2` and `q1-q2`, computed in
/// double-double precision.
///
/// Parallel and coincident lines are not special-cased; they surface through
/// the non-finite check.
///
/// # Errors
///
/// Returns [`NumericError::NotRepresentable`] if the computed point has a
/// non-finite ordinate.
pub fn intersection_dd(p1: &Point3, p2: &Point3, q1: &Point3, q2: &Point3) -> Result<Point3> {
    let px = DD::from(p2.x) - p1.x;
    let py = DD::from(p2.y) - p1.y;
    let qx = DD::from(q2.x) - q1.x;
    let qy = DD::from(q2.y) - q1.y;
    let pq_x = DD::from(p1.x) - q1.x;
    let pq_y = DD::from(p1.y) - q1.y;

    let denom = qy * px - qx * py;

    let num_x = qx * pq_y - qy * pq_x;
    let frac_p = (num_x / denom).to_f64();
    let x = (DD::from(p1.x) + px * frac_p).to_f64();

    let num_y = px * pq_y - py * pq_x;
    let frac_q = (num_y / denom).to_f64();
    let y = (DD::from(q1.y) + qy * frac_q).to_f64();

    if !x.is_finite() || !y.is_finite() {
        return Err(NumericError::NotRepresentable { x, y }.into());
    }
    Ok(point_2d(x, y))
}

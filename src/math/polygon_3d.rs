use super::{point_2d, Point3, Vector3};
use crate::error::{NumericError, Result};

/// One of the three coordinate planes, used as a projection target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPlane {
    XY,
    XZ,
    YZ,
}

impl AxisPlane {
    /// Projects a 3D point onto this plane, returning planar coordinates.
    #[must_use]
    pub fn project(self, p: &Point3) -> Point3 {
        match self {
            Self::XY => point_2d(p.x, p.y),
            Self::XZ => point_2d(p.x, p.z),
            Self::YZ => point_2d(p.y, p.z),
        }
    }

    /// Projects a sequence of points onto this plane.
    #[must_use]
    pub fn project_all(self, points: &[Point3]) -> Vec<Point3> {
        points.iter().map(|p| self.project(p)).collect()
    }
}

/// A plane in 3D given by a normal vector and a point on the plane.
#[derive(Debug, Clone, Copy)]
pub struct Plane3D {
    normal: Vector3,
    base: Point3,
}

impl Plane3D {
    /// Creates a new plane from a normal vector and a point on it.
    #[must_use]
    pub fn new(normal: Vector3, base: Point3) -> Self {
        Self { normal, base }
    }

    /// Best-fit plane of a closed ring by Newell's method.
    ///
    /// The base point is the vertex average and the normal is the normalised
    /// sum of the edge cross-product terms. Non-planar rings get the plane
    /// that minimises their deviation; rings with missing `z` produce a
    /// NaN normal, which is reported when the plane is used.
    #[must_use]
    pub fn best_fit(ring: &[Point3]) -> Self {
        Self::new(newell_normal(ring), average_point(ring))
    }

    /// Whether the normal is the zero vector, as for rings enclosing no area.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_degenerate(&self) -> bool {
        self.normal.iter().all(|c| *c == 0.0)
    }

    /// Returns the normal vector of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the base point of the plane.
    #[must_use]
    pub fn base(&self) -> &Point3 {
        &self.base
    }

    /// Signed distance from `p` to the plane, positive on the normal side.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::NanOrdinate`] if the result is NaN, which
    /// includes planes with a zero normal.
    pub fn oriented_distance(&self, p: &Point3) -> Result<f64> {
        let pb = p - self.base;
        let dist = pb.dot(&self.normal) / self.normal.norm();
        if dist.is_nan() {
            return Err(NumericError::NanOrdinate.into());
        }
        Ok(dist)
    }

    /// The coordinate plane most nearly parallel to this plane, so that
    /// projection onto it loses the least information.
    #[must_use]
    pub fn closest_axis_plane(&self) -> AxisPlane {
        let xmag = self.normal.x.abs();
        let ymag = self.normal.y.abs();
        let zmag = self.normal.z.abs();
        if xmag > ymag {
            if xmag > zmag {
                AxisPlane::YZ
            } else {
                AxisPlane::XY
            }
        } else if zmag > ymag {
            AxisPlane::XY
        } else {
            AxisPlane::XZ
        }
    }
}

/// Newell's method normal for a closed ring.
fn newell_normal(ring: &[Point3]) -> Vector3 {
    let mut sum = Vector3::zeros();
    for w in ring.windows(2) {
        let (cur, next) = (&w[0], &w[1]);
        sum.x += (cur.y - next.y) * (cur.z + next.z);
        sum.y += (cur.z - next.z) * (cur.x + next.x);
        sum.z += (cur.x - next.x) * (cur.y + next.y);
    }
    let norm = sum.norm();
    if norm > 0.0 {
        sum / norm
    } else {
        sum
    }
}

fn average_point(ring: &[Point3]) -> Point3 {
    if ring.is_empty() {
        return Point3::origin();
    }
    #[allow(clippy::cast_precision_loss)]
    let n = ring.len() as f64;
    let sum = ring
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / n)
}

/// Point where the segment `p0-p1` meets a plane, given the signed distances
/// `d0` and `d1` of its endpoints (of opposite sign or zero).
///
/// Endpoints lying on the plane are returned exactly.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn segment_plane_point(p0: &Point3, p1: &Point3, d0: f64, d1: f64) -> Point3 {
    if d0 == 0.0 {
        return *p0;
    }
    if d1 == 0.0 {
        return *p1;
    }
    let f = d0.abs() / (d0.abs() + d1.abs());
    p0 + (p1 - p0) * f
}

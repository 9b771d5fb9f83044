use std::f64::consts::TAU;

use tracing::trace;

use crate::error::{OperationError, Result};
use crate::geometry::{Geometry, LineString, Polygon};
use crate::math::angle::{angle_between, is_obtuse};
use crate::math::triangle::circumcentre;
use crate::math::{distance_xy, equals_2d, point_2d, Point3};
use crate::operations::hull::ConvexHull;

/// Number of segments used by [`MinimumBoundingCircle::circle`].
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 32;

/// Smallest circle enclosing a geometry, by Rokne's extremal-point method.
///
/// The circle is determined by one, two or three extremal points on its
/// boundary. Computed eagerly on construction.
#[derive(Debug, Clone)]
pub struct MinimumBoundingCircle {
    extremal: Vec<Point3>,
    centre: Option<Point3>,
    radius: f64,
}

impl MinimumBoundingCircle {
    /// Computes the circle for every vertex of `geom`.
    ///
    /// # Errors
    ///
    /// Returns an error if the convex hull of the input cannot be built.
    ///
    /// # Panics
    ///
    /// Panics if the extremal-point iteration fails to converge, which
    /// indicates an internal logic error rather than bad input.
    pub fn new(geom: &Geometry) -> Result<Self> {
        let extremal = circle_points(geom)?;
        let centre = match extremal.as_slice() {
            [] => None,
            [p] => Some(*p),
            [p, q] => Some(point_2d((p.x + q.x) / 2.0, (p.y + q.y) / 2.0)),
            [p, q, r, ..] => Some(circumcentre(p, q, r)),
        };
        let radius = match (&centre, extremal.first()) {
            (Some(c), Some(p)) => distance_xy(c, p),
            _ => 0.0,
        };
        Ok(Self {
            extremal,
            centre,
            radius,
        })
    }

    /// Centre of the circle, or `None` for empty input.
    #[must_use]
    pub fn centre(&self) -> Option<Point3> {
        self.centre
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The input points lying on the circle that determine it.
    #[must_use]
    pub fn extremal_points(&self) -> &[Point3] {
        &self.extremal
    }

    /// The circle as a polygon with [`DEFAULT_CIRCLE_SEGMENTS`] vertices.
    ///
    /// Empty input yields an empty polygon and a zero radius a point.
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon ring cannot be built.
    pub fn circle(&self) -> Result<Geometry> {
        self.circle_with_segments(DEFAULT_CIRCLE_SEGMENTS)
    }

    /// The circle as a polygon with `segments` vertices on the circle,
    /// oriented clockwise.
    ///
    /// The polygon is inscribed in the circle, so input points on the circle
    /// between two vertices fall slightly outside it.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if `segments` is less than
    /// three.
    #[allow(clippy::float_cmp)]
    pub fn circle_with_segments(&self, segments: usize) -> Result<Geometry> {
        if segments < 3 {
            return Err(OperationError::InvalidInput(format!(
                "a circle needs at least 3 segments, got {segments}"
            ))
            .into());
        }
        let Some(c) = self.centre else {
            return Ok(Polygon::default().into());
        };
        if self.radius == 0.0 {
            return Ok(Geometry::point(c));
        }
        #[allow(clippy::cast_precision_loss)]
        let step = TAU / segments as f64;
        let mut ring: Vec<Point3> = (0..segments)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let theta = -(i as f64) * step;
                point_2d(c.x + self.radius * theta.cos(), c.y + self.radius * theta.sin())
            })
            .collect();
        ring.push(ring[0]);
        Ok(Polygon::from_coords(ring, Vec::new())?.into())
    }

    /// Line between the two extremal points farthest apart; a point for a
    /// single extremal point, empty for empty input.
    ///
    /// # Errors
    ///
    /// Returns an error if the line cannot be built.
    pub fn farthest_points(&self) -> Result<Geometry> {
        match self.extremal.as_slice() {
            [] => Ok(LineString::empty().into()),
            [p] => Ok(Geometry::point(*p)),
            [first, .., last] => Ok(LineString::new(vec![*first, *last])?.into()),
        }
    }

    /// A diameter of the circle through the first extremal point.
    ///
    /// # Errors
    ///
    /// Returns an error if the line cannot be built.
    pub fn diameter(&self) -> Result<Geometry> {
        match (self.extremal.as_slice(), self.centre) {
            ([p, q], _) => Ok(LineString::new(vec![*p, *q])?.into()),
            ([p, _, _, ..], Some(c)) => {
                let opposite = point_2d(2.0 * c.x - p.x, 2.0 * c.y - p.y);
                Ok(LineString::new(vec![*p, opposite])?.into())
            }
            ([p, ..], _) => Ok(Geometry::point(*p)),
            ([], _) => Ok(LineString::empty().into()),
        }
    }
}

/// The one, two or three input points that determine the circle.
fn circle_points(geom: &Geometry) -> Result<Vec<Point3>> {
    if geom.is_empty() {
        return Ok(Vec::new());
    }
    if geom.num_points() == 1 {
        return Ok(geom.coordinates());
    }

    let mut pts = ConvexHull::from_geometry(geom).execute()?.coordinates();
    if pts.len() > 1 && equals_2d(&pts[0], &pts[pts.len() - 1]) {
        pts.pop();
    }
    if pts.len() <= 2 {
        return Ok(pts);
    }

    let mut p = lowest_point(&pts);
    let mut q = point_with_min_angle_with_x(&pts, p);

    for _ in 0..pts.len() {
        let r = point_with_min_angle_with_segment(&pts, p, q);
        trace!(p, q, r, "extremal point candidates");
        let (pp, pq, pr) = (&pts[p], &pts[q], &pts[r]);

        // PRQ obtuse: P and Q span a diameter.
        if is_obtuse(pp, pr, pq) {
            return Ok(vec![*pp, *pq]);
        }
        if is_obtuse(pr, pp, pq) {
            p = r;
            continue;
        }
        if is_obtuse(pr, pq, pp) {
            q = r;
            continue;
        }
        return Ok(vec![*pp, *pq, *pr]);
    }
    panic!("minimum bounding circle did not converge over {} hull points", pts.len());
}

fn lowest_point(pts: &[Point3]) -> usize {
    let mut min = 0;
    for (i, p) in pts.iter().enumerate().skip(1) {
        if p.y < pts[min].y {
            min = i;
        }
    }
    min
}

/// Index of the point making the smallest angle with the X axis from `p`.
fn point_with_min_angle_with_x(pts: &[Point3], p: usize) -> usize {
    let origin = &pts[p];
    let mut min_sin = f64::MAX;
    let mut min_index = p;
    for (i, pt) in pts.iter().enumerate() {
        if i == p {
            continue;
        }
        let dx = pt.x - origin.x;
        let dy = (pt.y - origin.y).abs();
        let sin = dy / dx.hypot(dy);
        if sin < min_sin {
            min_sin = sin;
            min_index = i;
        }
    }
    min_index
}

/// Index of the point seeing the segment `p-q` under the smallest angle.
fn point_with_min_angle_with_segment(pts: &[Point3], p: usize, q: usize) -> usize {
    let mut min_angle = f64::MAX;
    let mut min_index = p;
    for (i, pt) in pts.iter().enumerate() {
        if i == p || i == q {
            continue;
        }
        let ang = angle_between(&pts[p], pt, &pts[q]);
        if ang < min_angle {
            min_angle = ang;
            min_index = i;
        }
    }
    min_index
}

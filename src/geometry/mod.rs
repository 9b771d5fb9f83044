pub mod line_string;
pub mod polygon;

pub use line_string::{LineString, LinearRing};
pub use polygon::Polygon;

use crate::error::Result;
use crate::math::{Envelope, Point3};

/// Topological location of a point relative to a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

/// A point, line string, polygon or collection of geometries.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point3),
    LineString(LineString),
    Polygon(Polygon),
    Collection(Vec<Geometry>),
}

impl Default for Geometry {
    fn default() -> Self {
        Self::empty()
    }
}

impl Geometry {
    /// The empty geometry (an empty collection).
    #[must_use]
    pub fn empty() -> Self {
        Self::Collection(Vec::new())
    }

    /// Creates a point geometry.
    #[must_use]
    pub fn point(p: Point3) -> Self {
        Self::Point(p)
    }

    /// # Errors
    ///
    /// Returns an error if exactly one vertex is given.
    pub fn line_string(points: Vec<Point3>) -> Result<Self> {
        Ok(Self::LineString(LineString::new(points)?))
    }

    /// # Errors
    ///
    /// Returns an error if any ring is malformed.
    pub fn polygon(shell: Vec<Point3>, holes: Vec<Vec<Point3>>) -> Result<Self> {
        Ok(Self::Polygon(Polygon::from_coords(shell, holes)?))
    }

    /// Creates a collection of geometries.
    #[must_use]
    pub fn collection(geometries: Vec<Geometry>) -> Self {
        Self::Collection(geometries)
    }

    /// Returns whether the geometry has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Point(_) => false,
            Self::LineString(line) => line.is_empty(),
            Self::Polygon(poly) => poly.is_empty(),
            Self::Collection(geoms) => geoms.iter().all(Geometry::is_empty),
        }
    }

    /// Topological dimension: `-1` for empty, `0` points, `1` lines, `2` areas.
    /// Collections report the highest dimension of their members.
    #[must_use]
    pub fn dimension(&self) -> i32 {
        match self {
            Self::Point(_) => 0,
            Self::LineString(_) => 1,
            Self::Polygon(_) => 2,
            Self::Collection(geoms) => geoms.iter().map(Geometry::dimension).max().unwrap_or(-1),
        }
    }

    /// Returns the number of vertices, over all members of a collection.
    #[must_use]
    pub fn num_points(&self) -> usize {
        match self {
            Self::Point(_) => 1,
            Self::LineString(line) => line.num_points(),
            Self::Polygon(poly) => poly.num_points(),
            Self::Collection(geoms) => geoms.iter().map(Geometry::num_points).sum(),
        }
    }

    /// Every vertex of the geometry, in traversal order.
    #[must_use]
    pub fn coordinates(&self) -> Vec<Point3> {
        let mut out = Vec::with_capacity(self.num_points());
        self.collect_coordinates(&mut out);
        out
    }

    fn collect_coordinates(&self, out: &mut Vec<Point3>) {
        match self {
            Self::Point(p) => out.push(*p),
            Self::LineString(line) => out.extend_from_slice(line.points()),
            Self::Polygon(poly) => {
                for ring in poly.rings() {
                    out.extend_from_slice(ring.points());
                }
            }
            Self::Collection(geoms) => {
                for g in geoms {
                    g.collect_coordinates(out);
                }
            }
        }
    }

    /// Non-collection members, with nested collections flattened.
    #[must_use]
    pub fn components(&self) -> Vec<&Geometry> {
        let mut out = Vec::new();
        self.collect_components(&mut out);
        out
    }

    fn collect_components<'a>(&'a self, out: &mut Vec<&'a Geometry>) {
        match self {
            Self::Collection(geoms) => {
                for g in geoms {
                    g.collect_components(out);
                }
            }
            leaf => out.push(leaf),
        }
    }

    /// Planar bounding box of every vertex.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        match self {
            Self::Point(p) => Envelope::from_points(p, p),
            Self::LineString(line) => line.envelope(),
            Self::Polygon(poly) => poly.envelope(),
            Self::Collection(geoms) => geoms.iter().fold(Envelope::null(), |mut env, g| {
                env.expand_to_include_envelope(&g.envelope());
                env
            }),
        }
    }
}

impl From<Point3> for Geometry {
    fn from(p: Point3) -> Self {
        Self::Point(p)
    }
}

impl From<LineString> for Geometry {
    fn from(line: LineString) -> Self {
        Self::LineString(line)
    }
}

impl From<Polygon> for Geometry {
    fn from(poly: Polygon) -> Self {
        Self::Polygon(poly)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::point_2d;

    fn sample() -> Geometry {
        let square = vec![
            point_2d(0.0, 0.0),
            point_2d(4.0, 0.0),
            point_2d(4.0, 4.0),
            point_2d(0.0, 4.0),
            point_2d(0.0, 0.0),
        ];
        Geometry::collection(vec![
            Geometry::point(point_2d(10.0, 10.0)),
            Geometry::collection(vec![
                Geometry::line_string(vec![point_2d(-1.0, 0.0), point_2d(-2.0, 3.0)]).unwrap(),
                Geometry::polygon(square, vec![]).unwrap(),
            ]),
        ])
    }

    #[test]
    fn dimension_is_maximum_of_members() {
        assert_eq!(sample().dimension(), 2);
        assert_eq!(Geometry::empty().dimension(), -1);
        assert_eq!(Geometry::point(point_2d(0.0, 0.0)).dimension(), 0);
    }

    #[test]
    fn components_are_flattened() {
        let g = sample();
        let leaves = g.components();
        assert_eq!(leaves.len(), 3);
        assert!(matches!(leaves[2], Geometry::Polygon(_)));
    }

    #[test]
    fn coordinates_and_envelope() {
        let g = sample();
        assert_eq!(g.num_points(), 8);
        assert_eq!(g.coordinates().len(), 8);
        let env = g.envelope();
        assert!((env.min_x() + 2.0).abs() < f64::EPSILON);
        assert!((env.max_y() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn emptiness() {
        assert!(Geometry::empty().is_empty());
        assert!(Geometry::collection(vec![Geometry::empty()]).is_empty());
        assert!(!sample().is_empty());
        assert!(Geometry::line_string(vec![]).unwrap().is_empty());
    }
}

use tracing::debug;

use super::location::{GeometryLocation, GeometryPosition};
use super::planar_polygon::PlanarPolygon3D;
use crate::error::Result;
use crate::geometry::{Geometry, LinearRing, Location};
use crate::math::distance_3d::{self, closest_point_on_segment, closest_points_segment_segment};
use crate::math::polygon_3d::segment_plane_point;
use crate::math::Point3;

/// Minimum distance between two geometries in 3D.
///
/// Components of collections are compared pairwise. Polygons are treated
/// as planar areas lying in their best-fit plane. Ordinates must be
/// present: computations that meet a missing `z` fail with
/// [`NumericError::NanOrdinate`](crate::error::NumericError::NanOrdinate),
/// except point-to-point distances, which fall back to 2D.
#[derive(Debug, Clone, Copy)]
pub struct Distance3D<'a> {
    geoms: [&'a Geometry; 2],
    terminate_distance: f64,
}

impl<'a> Distance3D<'a> {
    /// Creates a new distance computation between `g0` and `g1`.
    #[must_use]
    pub fn new(g0: &'a Geometry, g1: &'a Geometry) -> Self {
        Self {
            geoms: [g0, g1],
            terminate_distance: 0.0,
        }
    }

    /// Stops the search as soon as a distance at or below `distance` is
    /// found. The reported distance is then an upper bound of the true
    /// minimum that is itself within the threshold.
    #[must_use]
    pub fn with_terminate_distance(mut self, distance: f64) -> Self {
        self.terminate_distance = distance;
        self
    }

    /// The minimum distance; `0` if either geometry is empty.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::NanOrdinate`](crate::error::NumericError::NanOrdinate)
    /// if a NaN ordinate reaches a 3D computation.
    pub fn distance(&self) -> Result<f64> {
        if self.geoms.iter().any(|g| g.is_empty()) {
            return Ok(0.0);
        }
        Ok(self.compute()?.min_distance)
    }

    /// A pair of nearest points, one on each geometry, or `None` if either
    /// is empty.
    ///
    /// # Errors
    ///
    /// See [`distance`](Self::distance).
    pub fn nearest_points(&self) -> Result<Option<[Point3; 2]>> {
        Ok(self
            .nearest_locations()?
            .map(|[a, b]| [a.point(), b.point()]))
    }

    /// Locations of a pair of nearest points, or `None` if either geometry
    /// is empty.
    ///
    /// # Errors
    ///
    /// See [`distance`](Self::distance).
    pub fn nearest_locations(&self) -> Result<Option<[GeometryLocation; 2]>> {
        if self.geoms.iter().any(|g| g.is_empty()) {
            return Ok(None);
        }
        Ok(self.compute()?.locations)
    }

    fn compute(&self) -> Result<Search> {
        let sides = [Side::new(self.geoms[0]), Side::new(self.geoms[1])];
        let first = most_polygonal_index(self.geoms[0], self.geoms[1]);
        let flip = first == 1;
        let (outer, inner) = (&sides[first], &sides[1 - first]);

        let mut search = Search::new(self.terminate_distance);
        'outer: for a in &outer.components {
            for b in &inner.components {
                search.compute_pair(a, b, flip)?;
                if search.done {
                    debug!(distance = search.min_distance, "distance search terminated early");
                    break 'outer;
                }
            }
        }
        Ok(search)
    }
}

/// The index of the geometry to iterate over first: polygonal inputs are
/// preferred, the larger one if both are.
fn most_polygonal_index(g0: &Geometry, g1: &Geometry) -> usize {
    let (dim0, dim1) = (g0.dimension(), g1.dimension());
    if dim0 >= 2 && dim1 >= 2 {
        return usize::from(g0.num_points() <= g1.num_points());
    }
    if dim0 >= 2 {
        return 0;
    }
    usize::from(dim1 >= 2)
}

/// One input geometry, flattened, with planes computed for its polygons.
struct Side<'a> {
    components: Vec<Component<'a>>,
}

impl<'a> Side<'a> {
    fn new(geom: &'a Geometry) -> Self {
        let components = geom
            .components()
            .into_iter()
            .enumerate()
            .filter(|(_, g)| !g.is_empty())
            .filter_map(|(index, g)| {
                let kind = match g {
                    Geometry::Point(p) => Kind::Point(p),
                    Geometry::LineString(line) => Kind::Line(line.points()),
                    Geometry::Polygon(poly) => Kind::Polygon(PlanarPolygon3D::new(poly)),
                    Geometry::Collection(_) => return None,
                };
                Some(Component { index, kind })
            })
            .collect();
        Self { components }
    }
}

struct Component<'a> {
    index: usize,
    kind: Kind<'a>,
}

enum Kind<'a> {
    Point(&'a Point3),
    Line(&'a [Point3]),
    Polygon(PlanarPolygon3D<'a>),
}

/// Running minimum and the locations that achieved it.
struct Search {
    min_distance: f64,
    locations: Option<[GeometryLocation; 2]>,
    terminate_distance: f64,
    done: bool,
}

impl Search {
    fn new(terminate_distance: f64) -> Self {
        Self {
            min_distance: f64::INFINITY,
            locations: None,
            terminate_distance,
            done: false,
        }
    }

    /// Records a new minimum; `loc0` belongs to the geometry iterated first
    /// unless `flip` is set.
    fn update(&mut self, dist: f64, loc0: GeometryLocation, loc1: GeometryLocation, flip: bool) {
        self.min_distance = dist;
        self.locations = Some(if flip { [loc1, loc0] } else { [loc0, loc1] });
        if self.min_distance <= self.terminate_distance {
            self.done = true;
        }
    }

    fn compute_pair(&mut self, a: &Component<'_>, b: &Component<'_>, flip: bool) -> Result<()> {
        match (&a.kind, &b.kind) {
            (Kind::Point(p), Kind::Point(q)) => {
                self.point_point(a.index, p, b.index, q, flip);
                Ok(())
            }
            (Kind::Point(p), Kind::Line(line)) => self.line_point(b.index, line, a.index, p, !flip),
            (Kind::Line(line), Kind::Point(p)) => self.line_point(a.index, line, b.index, p, flip),
            (Kind::Line(l0), Kind::Line(l1)) => self.line_line(a.index, l0, b.index, l1, flip),
            (Kind::Point(p), Kind::Polygon(poly)) => {
                self.polygon_point(b.index, poly, a.index, p, !flip)
            }
            (Kind::Polygon(poly), Kind::Point(p)) => {
                self.polygon_point(a.index, poly, b.index, p, flip)
            }
            (Kind::Line(line), Kind::Polygon(poly)) => {
                self.polygon_line(b.index, poly, a.index, line, !flip)
            }
            (Kind::Polygon(poly), Kind::Line(line)) => {
                self.polygon_line(a.index, poly, b.index, line, flip)
            }
            (Kind::Polygon(p0), Kind::Polygon(p1)) => {
                self.polygon_polygon(a.index, p0, b.index, p1, flip)
            }
        }
    }

    fn point_point(&mut self, i0: usize, p: &Point3, i1: usize, q: &Point3, flip: bool) {
        let dist = distance_3d::distance(p, q);
        if dist < self.min_distance {
            self.update(
                dist,
                GeometryLocation::new(i0, GeometryPosition::Vertex, *p),
                GeometryLocation::new(i1, GeometryPosition::Vertex, *q),
                flip,
            );
        }
    }

    fn line_point(
        &mut self,
        line_index: usize,
        line: &[Point3],
        point_index: usize,
        p: &Point3,
        flip: bool,
    ) -> Result<()> {
        for (i, w) in line.windows(2).enumerate() {
            let closest = closest_point_on_segment(p, &w[0], &w[1])?;
            let dist = distance_3d::distance(p, &closest);
            if dist < self.min_distance {
                self.update(
                    dist,
                    GeometryLocation::new(line_index, GeometryPosition::Segment(i), closest),
                    GeometryLocation::new(point_index, GeometryPosition::Vertex, *p),
                    flip,
                );
            }
            if self.done {
                break;
            }
        }
        Ok(())
    }

    fn line_line(
        &mut self,
        i0: usize,
        line0: &[Point3],
        i1: usize,
        line1: &[Point3],
        flip: bool,
    ) -> Result<()> {
        for (i, s0) in line0.windows(2).enumerate() {
            for (j, s1) in line1.windows(2).enumerate() {
                let (c0, c1) = closest_points_segment_segment(&s0[0], &s0[1], &s1[0], &s1[1])?;
                let dist = distance_3d::distance(&c0, &c1);
                if dist < self.min_distance {
                    self.update(
                        dist,
                        GeometryLocation::new(i0, GeometryPosition::Segment(i), c0),
                        GeometryLocation::new(i1, GeometryPosition::Segment(j), c1),
                        flip,
                    );
                }
                if self.done {
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn polygon_point(
        &mut self,
        poly_index: usize,
        poly: &PlanarPolygon3D<'_>,
        point_index: usize,
        p: &Point3,
        flip: bool,
    ) -> Result<()> {
        let polygon = poly.polygon();
        if !poly.plane().is_degenerate() && poly.locate_in_shell(p) != Location::Exterior {
            // Inside a hole the nearest point is on that hole's boundary.
            for (i, hole) in polygon.holes().iter().enumerate() {
                if poly.locate_in_hole(p, i) != Location::Exterior {
                    return self.line_point(poly_index, hole.points(), point_index, p, flip);
                }
            }
            let d = poly.plane().oriented_distance(p)?;
            let dist = d.abs();
            if dist < self.min_distance {
                let normal = poly.plane().normal().normalize();
                let foot = p - normal * d;
                self.update(
                    dist,
                    GeometryLocation::new(poly_index, GeometryPosition::InsideArea, foot),
                    GeometryLocation::new(point_index, GeometryPosition::Vertex, *p),
                    flip,
                );
            }
            if self.done {
                return Ok(());
            }
        }
        self.line_point(poly_index, polygon.shell().points(), point_index, p, flip)
    }

    fn polygon_line(
        &mut self,
        poly_index: usize,
        poly: &PlanarPolygon3D<'_>,
        line_index: usize,
        line: &[Point3],
        flip: bool,
    ) -> Result<()> {
        if let Some((i, hit)) = line_intersection(poly, line)? {
            self.update(
                0.0,
                GeometryLocation::new(poly_index, GeometryPosition::InsideArea, hit),
                GeometryLocation::new(line_index, GeometryPosition::Segment(i), hit),
                flip,
            );
            return Ok(());
        }
        for ring in poly.polygon().rings() {
            self.line_line(poly_index, ring.points(), line_index, line, flip)?;
            if self.done {
                break;
            }
        }
        Ok(())
    }

    fn polygon_polygon(
        &mut self,
        i0: usize,
        poly0: &PlanarPolygon3D<'_>,
        i1: usize,
        poly1: &PlanarPolygon3D<'_>,
        flip: bool,
    ) -> Result<()> {
        // Both directions are needed: a self-touching ring can cross the
        // other polygon's interior while neither shell meets the other.
        self.polygon_rings(i0, poly0, i1, poly1.polygon().rings(), flip)?;
        if self.done {
            return Ok(());
        }
        self.polygon_rings(i1, poly1, i0, poly0.polygon().rings(), !flip)
    }

    fn polygon_rings<'r>(
        &mut self,
        poly_index: usize,
        poly: &PlanarPolygon3D<'_>,
        rings_index: usize,
        rings: impl Iterator<Item = &'r LinearRing>,
        flip: bool,
    ) -> Result<()> {
        for ring in rings {
            self.polygon_line(poly_index, poly, rings_index, ring.points(), flip)?;
            if self.done {
                break;
            }
        }
        Ok(())
    }
}

/// The first point where `line` passes through the polygon's area, with the
/// index of the segment containing it.
fn line_intersection(poly: &PlanarPolygon3D<'_>, line: &[Point3]) -> Result<Option<(usize, Point3)>> {
    if poly.plane().is_degenerate() {
        return Ok(None);
    }
    let Some(first) = line.first() else {
        return Ok(None);
    };
    let plane = poly.plane();
    let mut d0 = plane.oriented_distance(first)?;
    for (i, w) in line.windows(2).enumerate() {
        let (p0, p1) = (&w[0], &w[1]);
        let d1 = plane.oriented_distance(p1)?;
        // Endpoints strictly on the same side: no crossing.
        if d0 * d1 <= 0.0 && poly.segment_may_intersect(p0, p1) {
            let hit = segment_plane_point(p0, p1, d0, d1);
            if poly.intersects(&hit) {
                return Ok(Some((i, hit)));
            }
        }
        d0 = d1;
    }
    Ok(None)
}

/// Minimum 3D distance between two geometries.
///
/// # Errors
///
/// See [`Distance3D::distance`].
pub fn distance(g0: &Geometry, g1: &Geometry) -> Result<f64> {
    Distance3D::new(g0, g1).distance()
}

/// Whether the 3D distance between two geometries is at most `distance`.
///
/// # Errors
///
/// See [`Distance3D::distance`].
pub fn is_within_distance(g0: &Geometry, g1: &Geometry, distance: f64) -> Result<bool> {
    Ok(Distance3D::new(g0, g1)
        .with_terminate_distance(distance)
        .distance()?
        <= distance)
}

/// A pair of nearest points between two geometries in 3D.
///
/// # Errors
///
/// See [`Distance3D::distance`].
pub fn nearest_points(g0: &Geometry, g1: &Geometry) -> Result<Option<[Point3; 2]>> {
    Distance3D::new(g0, g1).nearest_points()
}

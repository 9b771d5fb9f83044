use super::ray_crossing::locate_point_in_ring;
use crate::geometry::{Geometry, LineString, LinearRing, Location, Polygon};
use crate::math::{equals_2d, Point3};
use crate::operations::intersection::{LineIntersector, RobustLineIntersector};

/// Locates points relative to arbitrary geometries.
///
/// Collections follow the Mod-2 boundary rule: a point on the boundary of
/// an odd number of members is on the boundary of the collection; otherwise
/// it is interior if any member contains it. Rings are scanned linearly;
/// use [`IndexedPointInAreaLocator`](super::IndexedPointInAreaLocator) for
/// repeated queries against large polygons.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointLocator;

/// Running summary of member locations within a collection.
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    is_in: bool,
    boundaries: usize,
}

impl Tally {
    fn update(mut self, loc: Location) -> Self {
        match loc {
            Location::Interior => self.is_in = true,
            Location::Boundary => self.boundaries += 1,
            Location::Exterior => {}
        }
        self
    }

    fn location(self) -> Location {
        if self.boundaries % 2 == 1 {
            Location::Boundary
        } else if self.boundaries > 0 || self.is_in {
            Location::Interior
        } else {
            Location::Exterior
        }
    }
}

impl PointLocator {
    /// Creates a new locator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Whether `p` lies in the interior or on the boundary of `geom`.
    #[must_use]
    pub fn intersects(&self, p: &Point3, geom: &Geometry) -> bool {
        self.locate(p, geom) != Location::Exterior
    }

    /// Returns the location of `p` relative to `geom`.
    #[must_use]
    pub fn locate(&self, p: &Point3, geom: &Geometry) -> Location {
        if geom.is_empty() {
            return Location::Exterior;
        }
        match geom {
            Geometry::LineString(line) => locate_on_line_string(p, line),
            Geometry::Polygon(poly) => locate_in_polygon(p, poly),
            Geometry::Point(_) | Geometry::Collection(_) => geom
                .components()
                .into_iter()
                .fold(Tally::default(), |tally, g| tally.update(locate_leaf(p, g)))
                .location(),
        }
    }

    /// Whether `p` lies on any segment of the vertex sequence `line`.
    #[must_use]
    pub fn is_on_line(p: &Point3, line: &[Point3]) -> bool {
        let li = RobustLineIntersector::new();
        line.windows(2)
            .any(|w| li.compute_intersection_point(p, &w[0], &w[1]).has_intersection())
    }
}

fn locate_leaf(p: &Point3, geom: &Geometry) -> Location {
    match geom {
        Geometry::Point(pt) => {
            if equals_2d(pt, p) {
                Location::Interior
            } else {
                Location::Exterior
            }
        }
        Geometry::LineString(line) => locate_on_line_string(p, line),
        Geometry::Polygon(poly) => locate_in_polygon(p, poly),
        // Leaves never contain collections.
        Geometry::Collection(_) => Location::Exterior,
    }
}

fn locate_on_line_string(p: &Point3, line: &LineString) -> Location {
    if line.is_empty() || !line.envelope().intersects_point(p) {
        return Location::Exterior;
    }
    let pts = line.points();
    if !line.is_closed() {
        if let (Some(first), Some(last)) = (pts.first(), pts.last()) {
            if equals_2d(p, first) || equals_2d(p, last) {
                return Location::Boundary;
            }
        }
    }
    if PointLocator::is_on_line(p, pts) {
        Location::Interior
    } else {
        Location::Exterior
    }
}

fn locate_in_ring(p: &Point3, ring: &LinearRing) -> Location {
    if !ring.envelope().intersects_point(p) {
        return Location::Exterior;
    }
    locate_point_in_ring(p, ring.points())
}

fn locate_in_polygon(p: &Point3, poly: &Polygon) -> Location {
    if poly.is_empty() {
        return Location::Exterior;
    }
    match locate_in_ring(p, poly.shell()) {
        Location::Exterior => return Location::Exterior,
        Location::Boundary => return Location::Boundary,
        Location::Interior => {}
    }
    for hole in poly.holes() {
        match locate_in_ring(p, hole) {
            Location::Interior => return Location::Exterior,
            Location::Boundary => return Location::Boundary,
            Location::Exterior => {}
        }
    }
    Location::Interior
}

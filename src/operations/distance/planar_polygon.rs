use crate::geometry::{Location, Polygon};
use crate::math::polygon_3d::{AxisPlane, Plane3D};
use crate::math::{Envelope, Point3};
use crate::operations::intersection::RectangleLineIntersector;
use crate::operations::locate::locate_point_in_ring;

/// A polygon in 3D together with its best-fit plane and its rings projected
/// onto the axis plane that faces that plane most directly.
///
/// Built once per polygon and reused for every point-in-polygon test of a
/// distance computation.
#[derive(Debug, Clone)]
pub struct PlanarPolygon3D<'a> {
    polygon: &'a Polygon,
    plane: Plane3D,
    facing: AxisPlane,
    shell: Vec<Point3>,
    holes: Vec<Vec<Point3>>,
    rect: RectangleLineIntersector,
}

impl<'a> PlanarPolygon3D<'a> {
    /// Creates a new planar view of `polygon`.
    #[must_use]
    pub fn new(polygon: &'a Polygon) -> Self {
        let plane = Plane3D::best_fit(polygon.shell().points());
        let facing = plane.closest_axis_plane();
        let shell = facing.project_all(polygon.shell().points());
        let holes = polygon
            .holes()
            .iter()
            .map(|h| facing.project_all(h.points()))
            .collect();
        let rect = RectangleLineIntersector::new(Envelope::of(&shell));
        Self {
            polygon,
            plane,
            facing,
            shell,
            holes,
            rect,
        }
    }

    /// Returns the underlying polygon.
    #[must_use]
    pub fn polygon(&self) -> &'a Polygon {
        self.polygon
    }

    /// Returns the best-fit plane of the shell.
    #[must_use]
    pub fn plane(&self) -> &Plane3D {
        &self.plane
    }

    /// Returns the axis plane the rings are projected onto.
    #[must_use]
    pub fn facing_plane(&self) -> AxisPlane {
        self.facing
    }

    /// Location of the projection of `p` relative to the projected shell.
    #[must_use]
    pub fn locate_in_shell(&self, p: &Point3) -> Location {
        locate_point_in_ring(&self.facing.project(p), &self.shell)
    }

    /// Location of the projection of `p` relative to projected hole `i`.
    #[must_use]
    pub fn locate_in_hole(&self, p: &Point3, i: usize) -> Location {
        locate_point_in_ring(&self.facing.project(p), &self.holes[i])
    }

    /// Whether the projection of `p` lies in the projected polygon
    /// (boundaries included).
    #[must_use]
    pub fn intersects(&self, p: &Point3) -> bool {
        if self.locate_in_shell(p) == Location::Exterior {
            return false;
        }
        (0..self.holes.len()).all(|i| self.locate_in_hole(p, i) != Location::Interior)
    }

    /// Cheap rejection: false if the projected segment misses the projected
    /// shell's envelope.
    #[must_use]
    pub fn segment_may_intersect(&self, p0: &Point3, p1: &Point3) -> bool {
        self.rect
            .intersects(&self.facing.project(p0), &self.facing.project(p1))
    }
}

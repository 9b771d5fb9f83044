use super::centroid::Centroid;
use crate::geometry::Geometry;
use crate::math::{distance_xy, Point3};

/// Interior point of a linear geometry: the interior vertex closest to the
/// centroid, or the closest endpoint if no line has interior vertices.
#[derive(Debug, Clone, Copy)]
pub struct InteriorPointLine {
    centroid: Option<Point3>,
    point: Option<Point3>,
    min_distance: f64,
}

impl InteriorPointLine {
    /// Creates a new finder over the linear components of `geom`.
    #[must_use]
    pub fn new(geom: &Geometry) -> Self {
        let mut finder = Self {
            centroid: Centroid::get_centroid(geom),
            point: None,
            min_distance: f64::MAX,
        };
        finder.add_interior(geom);
        if finder.point.is_none() {
            finder.add_endpoints(geom);
        }
        finder
    }

    /// Returns the interior point, or `None` if there are no linear components.
    #[must_use]
    pub fn interior_point(&self) -> Option<Point3> {
        self.point
    }

    fn add_interior(&mut self, geom: &Geometry) {
        match geom {
            Geometry::LineString(line) => {
                let pts = line.points();
                if pts.len() > 2 {
                    for p in &pts[1..pts.len() - 1] {
                        self.add(p);
                    }
                }
            }
            Geometry::Collection(geoms) => {
                for g in geoms {
                    self.add_interior(g);
                }
            }
            Geometry::Point(_) | Geometry::Polygon(_) => {}
        }
    }

    fn add_endpoints(&mut self, geom: &Geometry) {
        match geom {
            Geometry::LineString(line) => {
                if let (Some(first), Some(last)) = (line.points().first(), line.points().last()) {
                    self.add(first);
                    self.add(last);
                }
            }
            Geometry::Collection(geoms) => {
                for g in geoms {
                    self.add_endpoints(g);
                }
            }
            Geometry::Point(_) | Geometry::Polygon(_) => {}
        }
    }

    fn add(&mut self, p: &Point3) {
        let Some(c) = self.centroid else {
            return;
        };
        let dist = distance_xy(p, &c);
        if dist < self.min_distance {
            self.min_distance = dist;
            self.point = Some(*p);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::point_2d;

    #[test]
    fn interior_vertex_nearest_centroid() {
        let g = Geometry::line_string(vec![
            point_2d(0.0, 0.0),
            point_2d(1.0, 0.0),
            point_2d(3.0, 0.0),
            point_2d(10.0, 0.0),
        ])
        .unwrap();
        let p = InteriorPointLine::new(&g).interior_point().unwrap();
        assert_abs_diff_eq!(p.x, 3.0);
    }

    #[test]
    fn two_point_line_uses_endpoint() {
        let g = Geometry::line_string(vec![point_2d(0.0, 0.0), point_2d(4.0, 0.0)]).unwrap();
        let p = InteriorPointLine::new(&g).interior_point().unwrap();
        assert_abs_diff_eq!(p.x, 0.0);
    }

    #[test]
    fn collection_of_lines() {
        let g = Geometry::collection(vec![
            Geometry::line_string(vec![point_2d(0.0, 0.0), point_2d(0.0, 2.0)]).unwrap(),
            Geometry::line_string(vec![point_2d(10.0, 0.0), point_2d(10.0, 1.0), point_2d(10.0, 2.0)])
                .unwrap(),
        ]);
        let p = InteriorPointLine::new(&g).interior_point().unwrap();
        assert_abs_diff_eq!(p.x, 10.0);
        assert_abs_diff_eq!(p.y, 1.0);
        assert!(InteriorPointLine::new(&Geometry::empty()).interior_point().is_none());
    }
}

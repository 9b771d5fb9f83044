use crate::geometry::{Geometry, LinearRing, Polygon};
use crate::math::{point_2d, Point3};

/// Interior point of an areal geometry.
///
/// Each polygon is cut by a horizontal scan line placed strictly between
/// vertex ordinates near the middle of its extent; the midpoint of the
/// widest interior section wins. Polygons of zero area contribute their
/// first vertex.
#[derive(Debug, Clone, Copy)]
pub struct InteriorPointArea {
    point: Option<Point3>,
    max_width: f64,
}

impl InteriorPointArea {
    /// Creates a new finder over the polygonal components of `geom`.
    #[must_use]
    pub fn new(geom: &Geometry) -> Self {
        let mut finder = Self {
            point: None,
            max_width: -1.0,
        };
        finder.process(geom);
        finder
    }

    /// Returns the interior point, or `None` if there are no polygonal components.
    #[must_use]
    pub fn interior_point(&self) -> Option<Point3> {
        self.point
    }

    fn process(&mut self, geom: &Geometry) {
        match geom {
            Geometry::Polygon(poly) => self.process_polygon(poly),
            Geometry::Collection(geoms) => {
                for g in geoms {
                    self.process(g);
                }
            }
            Geometry::Point(_) | Geometry::LineString(_) => {}
        }
    }

    fn process_polygon(&mut self, poly: &Polygon) {
        let Some((point, width)) = polygon_interior_point(poly) else {
            return;
        };
        if width > self.max_width {
            self.max_width = width;
            self.point = Some(point);
        }
    }
}

/// Interior point of one polygon and the width of the section it bisects.
fn polygon_interior_point(poly: &Polygon) -> Option<(Point3, f64)> {
    let first = *poly.shell().points().first()?;
    let scan_y = scan_line_y(poly);

    let mut crossings = Vec::new();
    for ring in poly.rings() {
        scan_ring(ring, scan_y, &mut crossings);
    }
    crossings.sort_by(f64::total_cmp);

    let mut best = (point_2d(first.x, first.y), 0.0);
    for pair in crossings.chunks_exact(2) {
        let width = pair[1] - pair[0];
        if width > best.1 {
            best = (point_2d((pair[0] + pair[1]) / 2.0, scan_y), width);
        }
    }
    Some(best)
}

/// A Y ordinate near the centre of the polygon's extent that avoids every
/// vertex: the midpoint of the closest vertex ordinates on either side of
/// the centre.
fn scan_line_y(poly: &Polygon) -> f64 {
    let env = poly.envelope();
    let mut lo_y = env.min_y();
    let mut hi_y = env.max_y();
    let centre_y = (lo_y + hi_y) / 2.0;
    for p in poly.rings().flat_map(LinearRing::points) {
        if p.y <= centre_y {
            if p.y > lo_y {
                lo_y = p.y;
            }
        } else if p.y < hi_y {
            hi_y = p.y;
        }
    }
    (lo_y + hi_y) / 2.0
}

fn scan_ring(ring: &LinearRing, scan_y: f64, crossings: &mut Vec<f64>) {
    if !ring.envelope().intersects_horizontal_line(scan_y) {
        return;
    }
    for w in ring.points().windows(2) {
        let (p0, p1) = (&w[0], &w[1]);
        if (p0.y > scan_y && p1.y > scan_y) || (p0.y < scan_y && p1.y < scan_y) {
            continue;
        }
        if is_edge_crossing_counted(p0, p1, scan_y) {
            crossings.push(horizontal_intersection(p0, p1, scan_y));
        }
    }
}

/// Half-open rule so that a scan line through a vertex counts it once;
/// horizontal edges never count.
#[allow(clippy::float_cmp)]
fn is_edge_crossing_counted(p0: &Point3, p1: &Point3, scan_y: f64) -> bool {
    let (y0, y1) = (p0.y, p1.y);
    if y0 == y1 {
        return false;
    }
    if y0 == scan_y && y1 < scan_y {
        return false;
    }
    if y1 == scan_y && y0 < scan_y {
        return false;
    }
    true
}

#[allow(clippy::float_cmp)]
fn horizontal_intersection(p0: &Point3, p1: &Point3, y: f64) -> f64 {
    if p0.x == p1.x {
        return p0.x;
    }
    let m = (p1.y - p0.y) / (p1.x - p0.x);
    p0.x + (y - p0.y) / m
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::geometry::Location;
    use crate::operations::locate::PointLocator;

    #[test]
    fn square_interior_point() {
        let g = Geometry::polygon(
            vec![
                point_2d(0.0, 0.0),
                point_2d(4.0, 0.0),
                point_2d(4.0, 4.0),
                point_2d(0.0, 4.0),
                point_2d(0.0, 0.0),
            ],
            vec![],
        )
        .unwrap();
        let p = InteriorPointArea::new(&g).interior_point().unwrap();
        assert_abs_diff_eq!(p.x, 2.0);
        assert_abs_diff_eq!(p.y, 2.0);
    }

    #[test]
    fn u_shape_picks_widest_section() {
        // The scan line crosses both arms; the right arm is wider.
        let g = Geometry::polygon(
            vec![
                point_2d(0.0, 0.0),
                point_2d(10.0, 0.0),
                point_2d(10.0, 10.0),
                point_2d(4.0, 10.0),
                point_2d(4.0, 2.0),
                point_2d(2.0, 2.0),
                point_2d(2.0, 10.0),
                point_2d(0.0, 10.0),
                point_2d(0.0, 0.0),
            ],
            vec![],
        )
        .unwrap();
        let p = InteriorPointArea::new(&g).interior_point().unwrap();
        assert_abs_diff_eq!(p.x, 7.0);
        assert_eq!(PointLocator::new().locate(&p, &g), Location::Interior);
    }

    #[test]
    fn point_avoids_hole() {
        let g = Geometry::polygon(
            vec![
                point_2d(0.0, 0.0),
                point_2d(10.0, 0.0),
                point_2d(10.0, 10.0),
                point_2d(0.0, 10.0),
                point_2d(0.0, 0.0),
            ],
            vec![vec![
                point_2d(2.0, 2.0),
                point_2d(6.0, 2.0),
                point_2d(6.0, 8.0),
                point_2d(2.0, 8.0),
                point_2d(2.0, 2.0),
            ]],
        )
        .unwrap();
        let p = InteriorPointArea::new(&g).interior_point().unwrap();
        assert_eq!(PointLocator::new().locate(&p, &g), Location::Interior);
    }

    #[test]
    fn zero_area_polygon_uses_first_vertex() {
        let g = Geometry::polygon(
            vec![
                point_2d(1.0, 1.0),
                point_2d(2.0, 1.0),
                point_2d(3.0, 1.0),
                point_2d(1.0, 1.0),
            ],
            vec![],
        )
        .unwrap();
        let p = InteriorPointArea::new(&g).interior_point().unwrap();
        assert_abs_diff_eq!(p.x, 1.0);
        assert_abs_diff_eq!(p.y, 1.0);
    }

    #[test]
    fn widest_polygon_of_collection_wins() {
        let small = Geometry::polygon(
            vec![
                point_2d(0.0, 0.0),
                point_2d(1.0, 0.0),
                point_2d(1.0, 1.0),
                point_2d(0.0, 0.0),
            ],
            vec![],
        )
        .unwrap();
        let big = Geometry::polygon(
            vec![
                point_2d(10.0, 0.0),
                point_2d(20.0, 0.0),
                point_2d(20.0, 5.0),
                point_2d(10.0, 5.0),
                point_2d(10.0, 0.0),
            ],
            vec![],
        )
        .unwrap();
        let p = InteriorPointArea::new(&Geometry::collection(vec![small, big]))
            .interior_point()
            .unwrap();
        assert_abs_diff_eq!(p.x, 15.0);
        assert!(InteriorPointArea::new(&Geometry::empty()).interior_point().is_none());
    }
}

use crate::geometry::{Geometry, Polygon};
use crate::math::polygon_2d::is_ccw;
use crate::math::triangle::{area2, centroid3};
use crate::math::{distance_xy, point_2d, Point3};

/// Centroid accumulator.
///
/// Contributions are kept per dimension; the result is taken from the
/// highest dimension with non-zero measure, so degenerate polygons fall
/// back to their boundary lines and zero-length lines to their points.
#[derive(Debug, Default, Clone, Copy)]
pub struct Centroid {
    area_base: Option<Point3>,
    triangle_cent3: (f64, f64),
    area_sum2: f64,
    line_cent_sum: (f64, f64),
    total_length: f64,
    pt_cent_sum: (f64, f64),
    pt_count: usize,
}

impl Centroid {
    /// Centroid of a single geometry, or `None` if it is empty.
    #[must_use]
    pub fn get_centroid(geom: &Geometry) -> Option<Point3> {
        Self::default().add(geom).centroid()
    }

    /// Adds the contribution of `geom`.
    #[must_use]
    pub fn add(mut self, geom: &Geometry) -> Self {
        self.add_geometry(geom);
        self
    }

    fn add_geometry(&mut self, geom: &Geometry) {
        match geom {
            Geometry::Point(p) => self.add_point(p),
            Geometry::LineString(line) => self.add_line_segments(line.points()),
            Geometry::Polygon(poly) => self.add_polygon(poly),
            Geometry::Collection(geoms) => {
                for g in geoms {
                    self.add_geometry(g);
                }
            }
        }
    }

    /// The centroid of everything added so far.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn centroid(&self) -> Option<Point3> {
        if self.area_sum2.abs() > 0.0 {
            Some(point_2d(
                self.triangle_cent3.0 / 3.0 / self.area_sum2,
                self.triangle_cent3.1 / 3.0 / self.area_sum2,
            ))
        } else if self.total_length > 0.0 {
            Some(point_2d(
                self.line_cent_sum.0 / self.total_length,
                self.line_cent_sum.1 / self.total_length,
            ))
        } else if self.pt_count > 0 {
            let n = self.pt_count as f64;
            Some(point_2d(self.pt_cent_sum.0 / n, self.pt_cent_sum.1 / n))
        } else {
            None
        }
    }

    fn add_point(&mut self, p: &Point3) {
        self.pt_count += 1;
        self.pt_cent_sum.0 += p.x;
        self.pt_cent_sum.1 += p.y;
    }

    #[allow(clippy::float_cmp)]
    fn add_line_segments(&mut self, pts: &[Point3]) {
        let mut line_len = 0.0;
        for w in pts.windows(2) {
            let seg_len = distance_xy(&w[0], &w[1]);
            if seg_len == 0.0 {
                continue;
            }
            line_len += seg_len;
            self.line_cent_sum.0 += seg_len * (w[0].x + w[1].x) / 2.0;
            self.line_cent_sum.1 += seg_len * (w[0].y + w[1].y) / 2.0;
        }
        self.total_length += line_len;
        if line_len == 0.0 {
            if let Some(first) = pts.first() {
                self.add_point(first);
            }
        }
    }

    fn add_polygon(&mut self, poly: &Polygon) {
        let shell = poly.shell().points();
        if self.area_base.is_none() {
            self.area_base = shell.first().copied();
        }
        self.add_ring(shell, !is_ccw(shell));
        for hole in poly.holes() {
            self.add_ring(hole.points(), is_ccw(hole.points()));
        }
    }

    /// Fans the ring into triangles from the shared base point.
    fn add_ring(&mut self, pts: &[Point3], positive: bool) {
        if let Some(base) = self.area_base {
            let sign = if positive { 1.0 } else { -1.0 };
            for w in pts.windows(2) {
                let (cx, cy) = centroid3(&base, &w[0], &w[1]);
                let a2 = area2(&base, &w[0], &w[1]);
                self.triangle_cent3.0 += sign * a2 * cx;
                self.triangle_cent3.1 += sign * a2 * cy;
                self.area_sum2 += sign * a2;
            }
        }
        self.add_line_segments(pts);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Point3> {
        vec![
            point_2d(x0, y0),
            point_2d(x0 + size, y0),
            point_2d(x0 + size, y0 + size),
            point_2d(x0, y0 + size),
            point_2d(x0, y0),
        ]
    }

    #[test]
    fn square_centroid() {
        let g = Geometry::polygon(square(0.0, 0.0, 2.0), vec![]).unwrap();
        let c = Centroid::get_centroid(&g).unwrap();
        assert_abs_diff_eq!(c.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn hole_shifts_centroid() {
        let g = Geometry::polygon(square(0.0, 0.0, 4.0), vec![square(2.0, 0.0, 2.0)]).unwrap();
        let c = Centroid::get_centroid(&g).unwrap();
        // Remaining L-shape: area 12, moments x = 16*2 - 4*3 = 20.
        assert_abs_diff_eq!(c.x, 20.0 / 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, (16.0 * 2.0 - 4.0 * 1.0) / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn area_dominates_lines_and_points() {
        let g = Geometry::collection(vec![
            Geometry::polygon(square(0.0, 0.0, 2.0), vec![]).unwrap(),
            Geometry::line_string(vec![point_2d(10.0, 10.0), point_2d(20.0, 10.0)]).unwrap(),
            Geometry::point(point_2d(-50.0, -50.0)),
        ]);
        let c = Centroid::get_centroid(&g).unwrap();
        assert_abs_diff_eq!(c.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_polygon_falls_back_to_line() {
        let flat = Geometry::polygon(
            vec![
                point_2d(0.0, 0.0),
                point_2d(1.0, 0.0),
                point_2d(2.0, 0.0),
                point_2d(0.0, 0.0),
            ],
            vec![],
        )
        .unwrap();
        let line = Geometry::line_string(vec![point_2d(0.0, 0.0), point_2d(2.0, 0.0)]).unwrap();
        let a = Centroid::get_centroid(&flat).unwrap();
        let b = Centroid::get_centroid(&line).unwrap();
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-12);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-12);
        assert_abs_diff_eq!(a.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_length_line_counts_as_point() {
        let g = Geometry::collection(vec![
            Geometry::line_string(vec![point_2d(2.0, 2.0), point_2d(2.0, 2.0)]).unwrap(),
            Geometry::point(point_2d(4.0, 4.0)),
        ]);
        let c = Centroid::get_centroid(&g).unwrap();
        assert_abs_diff_eq!(c.x, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn fold_over_geometries() {
        let c = Centroid::default()
            .add(&Geometry::point(point_2d(0.0, 0.0)))
            .add(&Geometry::point(point_2d(2.0, 4.0)))
            .centroid()
            .unwrap();
        assert_abs_diff_eq!(c.x, 1.0);
        assert_abs_diff_eq!(c.y, 2.0);
        assert!(Centroid::get_centroid(&Geometry::empty()).is_none());
    }
}

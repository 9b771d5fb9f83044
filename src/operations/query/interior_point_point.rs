use super::centroid::Centroid;
use crate::geometry::Geometry;
use crate::math::{distance_xy, Point3};

/// Interior point of a puntal geometry: the input point closest to the
/// centroid.
#[derive(Debug, Clone, Copy)]
pub struct InteriorPointPoint {
    point: Option<Point3>,
}

impl InteriorPointPoint {
    /// Creates a new finder over the point components of `geom`.
    #[must_use]
    pub fn new(geom: &Geometry) -> Self {
        let point = Centroid::get_centroid(geom).and_then(|c| {
            geom.components()
                .into_iter()
                .filter_map(|g| match g {
                    Geometry::Point(p) => Some(*p),
                    _ => None,
                })
                .min_by(|a, b| distance_xy(a, &c).total_cmp(&distance_xy(b, &c)))
        });
        Self { point }
    }

    /// Returns the interior point, or `None` if there are no point components.
    #[must_use]
    pub fn interior_point(&self) -> Option<Point3> {
        self.point
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::point_2d;

    #[test]
    fn nearest_point_to_centroid() {
        let g = Geometry::collection(vec![
            Geometry::point(point_2d(0.0, 0.0)),
            Geometry::point(point_2d(4.0, 0.0)),
            Geometry::point(point_2d(2.5, 0.0)),
            Geometry::point(point_2d(6.0, 0.0)),
        ]);
        let p = InteriorPointPoint::new(&g).interior_point().unwrap();
        assert_abs_diff_eq!(p.x, 2.5);
    }

    #[test]
    fn empty_has_none() {
        assert!(InteriorPointPoint::new(&Geometry::empty()).interior_point().is_none());
    }
}

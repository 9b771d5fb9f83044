use super::interior_point_area::InteriorPointArea;
use super::interior_point_line::InteriorPointLine;
use super::interior_point_point::InteriorPointPoint;
use crate::geometry::Geometry;
use crate::math::Point3;

/// A point guaranteed to lie in the interior of `geom` where possible, or
/// `None` if it is empty.
///
/// The finder is chosen by the highest dimension among the non-empty
/// components, so empty members of a collection do not influence it.
#[must_use]
pub fn interior_point(geom: &Geometry) -> Option<Point3> {
    match effective_dimension(geom) {
        0 => InteriorPointPoint::new(geom).interior_point(),
        1 => InteriorPointLine::new(geom).interior_point(),
        2 => InteriorPointArea::new(geom).interior_point(),
        _ => None,
    }
}

fn effective_dimension(geom: &Geometry) -> i32 {
    geom.components()
        .into_iter()
        .filter(|g| !g.is_empty())
        .map(Geometry::dimension)
        .max()
        .unwrap_or(-1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::point_2d;

    #[test]
    fn dispatches_on_effective_dimension() {
        let g = Geometry::collection(vec![
            Geometry::polygon(vec![], vec![]).unwrap(),
            Geometry::line_string(vec![point_2d(0.0, 0.0), point_2d(1.0, 0.0), point_2d(2.0, 0.0)])
                .unwrap(),
        ]);
        let p = interior_point(&g).unwrap();
        assert_abs_diff_eq!(p.x, 1.0);

        let pt = interior_point(&Geometry::point(point_2d(5.0, 5.0))).unwrap();
        assert_abs_diff_eq!(pt.y, 5.0);
        assert!(interior_point(&Geometry::empty()).is_none());
    }
}

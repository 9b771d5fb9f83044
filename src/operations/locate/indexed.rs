use tracing::debug;

use super::bintree::{Bintree, Interval};
use super::monotone_chain::{y_monotone_chains, MonotoneChain};
use super::ray_crossing::RayCrossingCounter;
use crate::error::{GeometryError, Result};
use crate::geometry::{Geometry, Location};
use crate::math::Point3;

/// Point-in-area locator backed by an interval index of ring edges.
///
/// The Y-monotone chains of every ring are indexed by their Y extent, so a
/// query only runs the ray-crossing test against chains spanning the test
/// point's `y`. Build once, then locate many points.
#[derive(Debug)]
pub struct IndexedPointInAreaLocator {
    rings: Vec<Vec<Point3>>,
    index: Bintree<MonotoneChain>,
    y_resolution: f64,
}

impl IndexedPointInAreaLocator {
    /// Builds the index for a polygon or a collection of polygons.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotPolygonal`] for any other geometry.
    pub fn new(geom: &Geometry) -> Result<Self> {
        let polygons = match geom {
            Geometry::Polygon(poly) => vec![poly],
            Geometry::Collection(_) => geom
                .components()
                .into_iter()
                .map(|g| match g {
                    Geometry::Polygon(poly) => Ok(poly),
                    _ => Err(GeometryError::NotPolygonal("collection has non-areal members")),
                })
                .collect::<std::result::Result<Vec<_>, _>>()?,
            Geometry::Point(_) => return Err(GeometryError::NotPolygonal("point").into()),
            Geometry::LineString(_) => {
                return Err(GeometryError::NotPolygonal("line string").into())
            }
        };

        let rings: Vec<Vec<Point3>> = polygons
            .iter()
            .flat_map(|poly| poly.rings())
            .filter(|ring| !ring.is_empty())
            .map(|ring| ring.points().to_vec())
            .collect();

        let mut index = Bintree::new();
        for (i, ring) in rings.iter().enumerate() {
            for chain in y_monotone_chains(ring, i) {
                index.insert(*chain.y_interval(), chain)?;
            }
        }
        debug!(
            rings = rings.len(),
            chains = index.len(),
            depth = index.depth(),
            "built point-in-area index"
        );

        Ok(Self {
            rings,
            index,
            y_resolution: 0.0,
        })
    }

    /// Widens every query by `resolution` in `y`, so that points within half
    /// of it from an edge's Y span still consider that edge.
    #[must_use]
    pub fn with_y_resolution(mut self, resolution: f64) -> Self {
        self.y_resolution = resolution.abs();
        self
    }

    /// Returns the Y resolution applied to queries.
    #[must_use]
    pub fn y_resolution(&self) -> f64 {
        self.y_resolution
    }

    /// Returns the location of `p` relative to the indexed area.
    #[must_use]
    pub fn locate(&self, p: &Point3) -> Location {
        let half = self.y_resolution / 2.0;
        let search = Interval::new(p.y - half, p.y + half);

        let mut counter = RayCrossingCounter::new(*p);
        for chain in self.index.query(&search) {
            if !chain.y_interval().overlaps(&search) {
                continue;
            }
            for w in chain.points(&self.rings[chain.ring()]).windows(2) {
                counter = counter.count_segment(&w[0], &w[1]);
                if counter.is_on_segment() {
                    return counter.location();
                }
            }
        }
        counter.location()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::point_2d;
    use crate::operations::locate::PointLocator;

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Point3> {
        vec![
            point_2d(x0, y0),
            point_2d(x0 + size, y0),
            point_2d(x0 + size, y0 + size),
            point_2d(x0, y0 + size),
            point_2d(x0, y0),
        ]
    }

    fn donut() -> Geometry {
        Geometry::polygon(square(0.0, 0.0, 10.0), vec![square(3.0, 3.0, 4.0)]).unwrap()
    }

    #[test]
    fn locates_around_a_hole() {
        let loc = IndexedPointInAreaLocator::new(&donut()).unwrap();
        assert_eq!(loc.locate(&point_2d(1.0, 1.0)), Location::Interior);
        assert_eq!(loc.locate(&point_2d(5.0, 5.0)), Location::Exterior);
        assert_eq!(loc.locate(&point_2d(3.0, 5.0)), Location::Boundary);
        assert_eq!(loc.locate(&point_2d(10.0, 10.0)), Location::Boundary);
        assert_eq!(loc.locate(&point_2d(11.0, 5.0)), Location::Exterior);
    }

    #[test]
    fn agrees_with_point_locator_on_a_grid() {
        let geom = Geometry::collection(vec![
            donut(),
            Geometry::polygon(square(20.0, 0.0, 5.0), vec![]).unwrap(),
        ]);
        let loc = IndexedPointInAreaLocator::new(&geom).unwrap();
        let plain = PointLocator::new();
        for i in -2..60 {
            for j in -2..24 {
                let p = point_2d(f64::from(i) * 0.5, f64::from(j) * 0.5);
                assert_eq!(loc.locate(&p), plain.locate(&p, &geom), "at {p:?}");
            }
        }
    }

    #[test]
    fn rejects_non_areal_input() {
        let line = Geometry::line_string(vec![point_2d(0.0, 0.0), point_2d(1.0, 1.0)]).unwrap();
        assert!(IndexedPointInAreaLocator::new(&line).is_err());
        let mixed = Geometry::collection(vec![donut(), Geometry::point(point_2d(0.0, 0.0))]);
        assert!(IndexedPointInAreaLocator::new(&mixed).is_err());
    }

    #[test]
    fn resolution_is_configurable() {
        let loc = IndexedPointInAreaLocator::new(&donut()).unwrap().with_y_resolution(0.5);
        assert!((loc.y_resolution() - 0.5).abs() < f64::EPSILON);
        assert_eq!(loc.locate(&point_2d(1.0, 1.0)), Location::Interior);
    }
}

use crate::geometry::Location;
use crate::math::{orientation_index, Orientation, Point3};

/// Counts crossings of a rightward horizontal ray from a fixed test point
/// against a stream of ring segments.
///
/// Segments may be fed in any order and the caller may stop early once
/// [`is_on_segment`](Self::is_on_segment) reports `true`. Edges follow the
/// half-open convention: an upward edge includes its start vertex and
/// excludes its end vertex, a downward edge the reverse, so a ray through
/// a shared vertex is counted once.
#[derive(Debug, Clone, Copy)]
pub struct RayCrossingCounter {
    point: Point3,
    crossings: usize,
    on_segment: bool,
}

impl RayCrossingCounter {
    /// Creates a new counter for `point` with no segments counted.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self {
            point,
            crossings: 0,
            on_segment: false,
        }
    }

    /// Feeds the segment `p1-p2` and returns the updated counter.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn count_segment(mut self, p1: &Point3, p2: &Point3) -> Self {
        let p = self.point;

        // Entirely to the left of the test point.
        if p1.x < p.x && p2.x < p.x {
            return self;
        }

        if p.x == p2.x && p.y == p2.y {
            self.on_segment = true;
            return self;
        }

        if p1.y == p.y && p2.y == p.y {
            let (min_x, max_x) = if p1.x <= p2.x { (p1.x, p2.x) } else { (p2.x, p1.x) };
            if p.x >= min_x && p.x <= max_x {
                self.on_segment = true;
            }
            return self;
        }

        // Non-horizontal segments straddling the ray's line.
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut orient = orientation_index(p1, p2, &p);
            if orient == Orientation::Collinear {
                self.on_segment = true;
                return self;
            }
            if p2.y < p1.y {
                orient = orient.reverse();
            }
            // An upward segment crosses the ray iff the point lies to its left.
            if orient == Orientation::LEFT {
                self.crossings += 1;
            }
        }
        self
    }

    /// Returns the number of crossings counted so far.
    #[must_use]
    pub fn crossings(&self) -> usize {
        self.crossings
    }

    /// Whether the test point lies on one of the segments fed so far.
    #[must_use]
    pub fn is_on_segment(&self) -> bool {
        self.on_segment
    }

    /// Location of the test point relative to the ring(s) whose segments
    /// were fed.
    #[must_use]
    pub fn location(&self) -> Location {
        if self.on_segment {
            Location::Boundary
        } else if self.crossings % 2 == 1 {
            Location::Interior
        } else {
            Location::Exterior
        }
    }

    /// Whether the point is in the interior or on the boundary.
    #[must_use]
    pub fn is_point_in_polygon(&self) -> bool {
        self.location() != Location::Exterior
    }

    /// Locates `p` relative to a closed ring.
    #[must_use]
    pub fn locate_point_in_ring(p: &Point3, ring: &[Point3]) -> Location {
        let mut counter = Self::new(*p);
        for w in ring.windows(2) {
            counter = counter.count_segment(&w[1], &w[0]);
            if counter.is_on_segment() {
                break;
            }
        }
        counter.location()
    }
}

/// Shorthand for [`RayCrossingCounter::locate_point_in_ring`].
#[must_use]
pub fn locate_point_in_ring(p: &Point3, ring: &[Point3]) -> Location {
    RayCrossingCounter::locate_point_in_ring(p, ring)
}

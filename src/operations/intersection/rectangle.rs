use std::cmp::Ordering;

use super::line_intersection::LineIntersector;
use super::robust::RobustLineIntersector;
use crate::math::{compare_2d, point_2d, Envelope, Point3};

/// Fast test of segments against a fixed axis-aligned rectangle.
///
/// A segment that meets the rectangle but has neither endpoint inside it
/// must cross one of the two diagonals; which one depends only on the
/// segment's slope, so a single robust intersection test suffices.
#[derive(Debug, Clone)]
pub struct RectangleLineIntersector {
    rect: Envelope,
    diag_up: [Point3; 2],
    diag_down: [Point3; 2],
    li: RobustLineIntersector,
}

impl RectangleLineIntersector {
    /// Creates a new intersector for the rectangle `rect`.
    #[must_use]
    pub fn new(rect: Envelope) -> Self {
        let (x0, x1, y0, y1) = (rect.min_x(), rect.max_x(), rect.min_y(), rect.max_y());
        Self {
            rect,
            diag_up: [point_2d(x0, y0), point_2d(x1, y1)],
            diag_down: [point_2d(x0, y1), point_2d(x1, y0)],
            li: RobustLineIntersector::new(),
        }
    }

    /// Returns the rectangle tested against.
    #[must_use]
    pub fn rectangle(&self) -> &Envelope {
        &self.rect
    }

    /// Whether the segment `p0-p1` meets the rectangle (interior or boundary).
    #[must_use]
    pub fn intersects(&self, p0: &Point3, p1: &Point3) -> bool {
        if !self.rect.intersects(&Envelope::from_points(p0, p1)) {
            return false;
        }
        if self.rect.intersects_point(p0) || self.rect.intersects_point(p1) {
            return true;
        }

        // Normalise to a left-to-right segment.
        let (p0, p1) = if compare_2d(p0, p1) == Ordering::Greater {
            (p1, p0)
        } else {
            (p0, p1)
        };
        let [d0, d1] = if p1.y > p0.y {
            &self.diag_down
        } else {
            &self.diag_up
        };
        self.li
            .compute_intersection_line(p0, p1, d0, d1)
            .has_intersection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> RectangleLineIntersector {
        RectangleLineIntersector::new(Envelope::from_points(
            &point_2d(0.0, 0.0),
            &point_2d(1.0, 1.0),
        ))
    }

    #[test]
    fn endpoint_inside() {
        assert!(unit_square().intersects(&point_2d(0.5, 0.5), &point_2d(5.0, 5.0)));
    }

    #[test]
    fn crossing_without_endpoints_inside() {
        let r = unit_square();
        assert!(r.intersects(&point_2d(-1.0, 0.5), &point_2d(2.0, 0.5)));
        assert!(r.intersects(&point_2d(0.5, 2.0), &point_2d(0.5, -1.0)));
        assert!(r.intersects(&point_2d(-0.5, 0.0), &point_2d(1.0, 1.5)));
    }

    #[test]
    fn missing_the_corner() {
        let r = unit_square();
        // Envelopes overlap but the segment passes outside the corner.
        assert!(!r.intersects(&point_2d(0.8, 2.0), &point_2d(2.0, 0.8)));
        assert!(!r.intersects(&point_2d(3.0, 3.0), &point_2d(4.0, 4.0)));
    }

    #[test]
    fn touching_corner() {
        assert!(unit_square().intersects(&point_2d(0.0, 2.0), &point_2d(2.0, 0.0)));
    }
}

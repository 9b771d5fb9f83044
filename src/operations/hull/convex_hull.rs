use std::cmp::Ordering;

use tracing::debug;

use crate::error::Result;
use crate::geometry::{Geometry, LineString, Location, Polygon};
use crate::math::{compare_2d, equals_2d, orientation_index, Orientation, Point3};
use crate::operations::locate::locate_point_in_ring;

/// Input sizes above this are first reduced by the octilateral filter.
pub const DEFAULT_MAX_POINTS_BEFORE_REDUCTION: usize = 50;

/// Computes the convex hull of a point set with a Graham scan.
///
/// The result is the smallest convex geometry containing every input point:
/// empty, a point, a two-point line (collinear input) or a polygon whose
/// shell is oriented clockwise.
#[derive(Debug, Clone)]
pub struct ConvexHull {
    points: Vec<Point3>,
    max_points_before_reduction: usize,
}

impl ConvexHull {
    /// Creates a new hull builder over `points`.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self {
            points,
            max_points_before_reduction: DEFAULT_MAX_POINTS_BEFORE_REDUCTION,
        }
    }

    /// Hull of every vertex of `geom`.
    #[must_use]
    pub fn from_geometry(geom: &Geometry) -> Self {
        Self::new(geom.coordinates())
    }

    /// Sets the input size above which points strictly inside an inscribed
    /// octagon are discarded before the scan.
    #[must_use]
    pub fn with_max_points_before_reduction(mut self, max: usize) -> Self {
        self.max_points_before_reduction = max;
        self
    }

    /// Runs the hull computation.
    ///
    /// # Errors
    ///
    /// Returns an error if the hull ring cannot be built, which only happens
    /// for non-finite input ordinates.
    pub fn execute(&self) -> Result<Geometry> {
        let unique = unique_points(&self.points);
        match unique.len() {
            0 => return Ok(Geometry::empty()),
            1 => return Ok(Geometry::point(unique[0])),
            2 => return Ok(LineString::new(unique)?.into()),
            _ => {}
        }

        let reduced = if unique.len() > self.max_points_before_reduction {
            reduce(unique)
        } else {
            unique
        };
        let sorted = pre_sort(reduced);
        let hull = graham_scan(&sorted);
        line_or_polygon(&hull)
    }
}

/// Distinct points in `(x, y)` order.
fn unique_points(points: &[Point3]) -> Vec<Point3> {
    let mut pts = points.to_vec();
    pts.sort_by(compare_2d);
    pts.dedup_by(|a, b| equals_2d(a, b));
    pts
}

/// Drops points strictly inside the octagon spanned by the input's extreme
/// points in the eight axis and diagonal directions.
fn reduce(points: Vec<Point3>) -> Vec<Point3> {
    let Some(ring) = inner_octolateral_ring(&points) else {
        return points;
    };
    let before = points.len();

    let mut kept: Vec<Point3> = ring.clone();
    kept.extend(
        points
            .into_iter()
            .filter(|p| locate_point_in_ring(p, &ring) == Location::Exterior),
    );
    let mut kept = unique_points(&kept);
    debug!(before, after = kept.len(), "octilateral hull reduction");

    while kept.len() < 3 {
        kept.push(kept[0]);
    }
    kept
}

fn inner_octolateral_ring(points: &[Point3]) -> Option<Vec<Point3>> {
    let mut ring: Vec<Point3> = Vec::with_capacity(9);
    for p in inner_octolateral_points(points) {
        if ring.last().map_or(true, |last| !equals_2d(last, &p)) {
            ring.push(p);
        }
    }
    if ring.len() < 3 {
        return None;
    }
    if !equals_2d(&ring[0], &ring[ring.len() - 1]) {
        ring.push(ring[0]);
    }
    Some(ring)
}

/// Extreme points by `x`, `x - y`, `y`, `x + y`, in the order
/// min x, min x-y, max y, max x+y, max x, max x-y, min y, min x+y.
fn inner_octolateral_points(points: &[Point3]) -> [Point3; 8] {
    let mut pts = [points[0]; 8];
    for p in &points[1..] {
        if p.x < pts[0].x {
            pts[0] = *p;
        }
        if p.x - p.y < pts[1].x - pts[1].y {
            pts[1] = *p;
        }
        if p.y > pts[2].y {
            pts[2] = *p;
        }
        if p.x + p.y > pts[3].x + pts[3].y {
            pts[3] = *p;
        }
        if p.x > pts[4].x {
            pts[4] = *p;
        }
        if p.x - p.y > pts[5].x - pts[5].y {
            pts[5] = *p;
        }
        if p.y < pts[6].y {
            pts[6] = *p;
        }
        if p.x + p.y < pts[7].x + pts[7].y {
            pts[7] = *p;
        }
    }
    pts
}

/// Moves the lowest (then leftmost) point to the front and sorts the rest
/// radially around it.
fn pre_sort(mut points: Vec<Point3>) -> Vec<Point3> {
    let mut lowest = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let q = &points[lowest];
        if p.y < q.y || (p.y.total_cmp(&q.y) == Ordering::Equal && p.x < q.x) {
            lowest = i;
        }
    }
    points.swap(0, lowest);
    let origin = points[0];
    points[1..].sort_by(|p, q| polar_compare(&origin, p, q));
    points
}

/// Orders `p` and `q` by the angle they make around `origin`, nearest first
/// when collinear.
fn polar_compare(origin: &Point3, p: &Point3, q: &Point3) -> Ordering {
    match orientation_index(origin, p, q) {
        Orientation::CounterClockwise => Ordering::Greater,
        Orientation::Clockwise => Ordering::Less,
        // Both lie in the closed upper half-plane of the origin, so y (then x)
        // orders them by distance.
        Orientation::Collinear => p
            .y
            .total_cmp(&q.y)
            .then_with(|| p.x.total_cmp(&q.x)),
    }
}

/// Graham scan over radially sorted points; the result is a closed ring.
fn graham_scan(c: &[Point3]) -> Vec<Point3> {
    let mut stack: Vec<Point3> = vec![c[0], c[1], c[2]];
    for ci in &c[3..] {
        let Some(mut p) = stack.pop() else {
            break;
        };
        while let Some(top) = stack.last() {
            if orientation_index(top, &p, ci) != Orientation::CounterClockwise {
                break;
            }
            match stack.pop() {
                Some(q) => p = q,
                None => break,
            }
        }
        stack.push(p);
        stack.push(*ci);
    }
    stack.push(c[0]);
    stack
}

/// Whether `c2` lies on the segment `c1-c3`, given all three are collinear.
#[allow(clippy::float_cmp)]
fn is_between(c1: &Point3, c2: &Point3, c3: &Point3) -> bool {
    if orientation_index(c1, c2, c3) != Orientation::Collinear {
        return false;
    }
    if c1.x != c3.x && ((c1.x <= c2.x && c2.x <= c3.x) || (c3.x <= c2.x && c2.x <= c1.x)) {
        return true;
    }
    if c1.y != c3.y && ((c1.y <= c2.y && c2.y <= c3.y) || (c3.y <= c2.y && c2.y <= c1.y)) {
        return true;
    }
    false
}

/// Removes repeated vertices and vertices lying between their neighbours.
fn clean_ring(original: &[Point3]) -> Vec<Point3> {
    let mut cleaned: Vec<Point3> = Vec::with_capacity(original.len());
    let mut previous: Option<Point3> = None;
    for w in original.windows(2) {
        let (current, next) = (&w[0], &w[1]);
        if equals_2d(current, next) {
            continue;
        }
        if previous.is_some_and(|prev| is_between(&prev, current, next)) {
            continue;
        }
        cleaned.push(*current);
        previous = Some(*current);
    }
    if let Some(last) = original.last() {
        cleaned.push(*last);
    }
    cleaned
}

fn line_or_polygon(ring: &[Point3]) -> Result<Geometry> {
    let cleaned = clean_ring(ring);
    if cleaned.len() <= 3 {
        let line: Vec<Point3> = cleaned.into_iter().take(2).collect();
        return Ok(LineString::new(line)?.into());
    }
    Ok(Polygon::from_coords(cleaned, Vec::new())?.into())
}

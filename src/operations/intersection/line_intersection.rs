use crate::math::{equals_2d, Point3};

/// Outcome of intersecting two segments (or a point and a segment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntersectionKind {
    /// The inputs do not intersect.
    None,
    /// The inputs meet in a single point.
    Point,
    /// The inputs are collinear and overlap in a sub-segment.
    Collinear,
}

/// Common contract of the segment intersection strategies.
///
/// Implementations are stateless; each call returns a fresh
/// [`LineIntersection`] describing the result.
pub trait LineIntersector {
    /// Tests whether point `p` lies on the segment `p1-p2`.
    fn compute_intersection_point(&self, p: &Point3, p1: &Point3, p2: &Point3)
        -> LineIntersection;

    /// Intersects segment `p1-p2` with segment `q1-q2`.
    fn compute_intersection_line(
        &self,
        p1: &Point3,
        p2: &Point3,
        q1: &Point3,
        q2: &Point3,
    ) -> LineIntersection;
}

/// Result of a segment intersection query.
///
/// Input segment `0` is `p1-p2`, input segment `1` is `q1-q2` (or the
/// degenerate segment `p-p` for point queries).
#[derive(Debug, Clone, Copy)]
pub struct LineIntersection {
    kind: IntersectionKind,
    points: [Point3; 2],
    proper: bool,
    input: [[Point3; 2]; 2],
}

impl LineIntersection {
    pub(crate) fn none(input: [[Point3; 2]; 2]) -> Self {
        Self {
            kind: IntersectionKind::None,
            points: [input[0][0], input[0][0]],
            proper: false,
            input,
        }
    }

    pub(crate) fn point(input: [[Point3; 2]; 2], point: Point3, proper: bool) -> Self {
        Self {
            kind: IntersectionKind::Point,
            points: [point, point],
            proper,
            input,
        }
    }

    pub(crate) fn collinear(input: [[Point3; 2]; 2], p0: Point3, p1: Point3) -> Self {
        Self {
            kind: IntersectionKind::Collinear,
            points: [p0, p1],
            proper: false,
            input,
        }
    }

    /// Returns the kind of intersection found.
    #[must_use]
    pub fn kind(&self) -> IntersectionKind {
        self.kind
    }

    /// Returns whether the segments intersect.
    #[must_use]
    pub fn has_intersection(&self) -> bool {
        self.kind != IntersectionKind::None
    }

    /// Number of intersection points: 0, 1 or 2.
    #[must_use]
    pub fn intersection_num(&self) -> usize {
        match self.kind {
            IntersectionKind::None => 0,
            IntersectionKind::Point => 1,
            IntersectionKind::Collinear => 2,
        }
    }

    /// The `index`-th intersection point, if it exists.
    #[must_use]
    pub fn intersection(&self, index: usize) -> Option<Point3> {
        (index < self.intersection_num()).then(|| self.points[index])
    }

    /// All intersection points.
    #[must_use]
    pub fn intersections(&self) -> &[Point3] {
        &self.points[..self.intersection_num()]
    }

    /// Whether the single intersection point lies in the interior of both
    /// segments.
    #[must_use]
    pub fn is_proper(&self) -> bool {
        self.has_intersection() && self.proper
    }

    /// Returns whether the segments overlap collinearly.
    #[must_use]
    pub fn is_collinear(&self) -> bool {
        self.kind == IntersectionKind::Collinear
    }

    /// Whether the intersection involves an endpoint of either segment.
    #[must_use]
    pub fn is_end_point(&self) -> bool {
        self.has_intersection() && !self.proper
    }

    /// Whether `pt` is one of the computed intersection points.
    #[must_use]
    pub fn is_intersection(&self, pt: &Point3) -> bool {
        self.intersections().iter().any(|p| equals_2d(p, pt))
    }

    /// Whether some intersection point lies in the interior of either segment.
    #[must_use]
    pub fn is_interior_intersection(&self) -> bool {
        self.is_interior_intersection_on(0) || self.is_interior_intersection_on(1)
    }

    /// Whether some intersection point lies in the interior of input segment
    /// `input_index` (not at one of its endpoints).
    #[must_use]
    pub fn is_interior_intersection_on(&self, input_index: usize) -> bool {
        let [a, b] = &self.input[input_index];
        self.intersections()
            .iter()
            .any(|p| !equals_2d(p, a) && !equals_2d(p, b))
    }

    /// The two endpoints of input segment `segment_index`.
    #[must_use]
    pub fn input_segment(&self, segment_index: usize) -> &[Point3; 2] {
        &self.input[segment_index]
    }

    /// Approximate distance of intersection `int_index` along input segment
    /// `segment_index`; see [`compute_edge_distance`].
    #[must_use]
    pub fn edge_distance(&self, segment_index: usize, int_index: usize) -> f64 {
        let [p0, p1] = &self.input[segment_index];
        compute_edge_distance(&self.points[int_index], p0, p1)
    }

    /// Index of the `int_index`-th intersection point when the points are
    /// ordered by increasing distance along input segment `segment_index`.
    #[must_use]
    pub fn index_along_segment(&self, segment_index: usize, int_index: usize) -> usize {
        if self.intersection_num() < 2 {
            return int_index;
        }
        let d0 = self.edge_distance(segment_index, 0);
        let d1 = self.edge_distance(segment_index, 1);
        let order = if d0 <= d1 { [0, 1] } else { [1, 0] };
        order[int_index]
    }

    /// The `int_index`-th intersection point in the direction of input
    /// segment `segment_index`.
    #[must_use]
    pub fn intersection_along_segment(&self, segment_index: usize, int_index: usize) -> Option<Point3> {
        if int_index >= self.intersection_num() {
            return None;
        }
        self.intersection(self.index_along_segment(segment_index, int_index))
    }
}

/// Robust, approximate distance of `p` along the segment `p0-p1`.
///
/// Uses the larger of the X and Y extents of the segment, so it is exact for
/// axis-aligned segments and monotone along any segment. Distinct points
/// always get a non-zero distance.
#[must_use]
pub fn compute_edge_distance(p: &Point3, p0: &Point3, p1: &Point3) -> f64 {
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();

    if equals_2d(p, p0) {
        return 0.0;
    }
    if equals_2d(p, p1) {
        return dx.max(dy);
    }
    let pdx = (p.x - p0.x).abs();
    let pdy = (p.y - p0.y).abs();
    let dist = if dx > dy { pdx } else { pdy };
    // Points off the major axis still need a non-zero distance.
    if dist == 0.0 {
        pdx.max(pdy)
    } else {
        dist
    }
}

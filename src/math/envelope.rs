use super::{point_2d, Point3};

/// An axis-aligned rectangle in the XY plane.
///
/// A freshly created envelope is *null*: it contains nothing and expands to
/// exactly the first point added to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::null()
    }
}

impl Envelope {
    /// Creates a null envelope.
    #[must_use]
    pub fn null() -> Self {
        Self {
            min_x: 0.0,
            max_x: -1.0,
            min_y: 0.0,
            max_y: -1.0,
        }
    }

    /// Creates the envelope spanned by two points.
    #[must_use]
    pub fn from_points(p1: &Point3, p2: &Point3) -> Self {
        Self {
            min_x: p1.x.min(p2.x),
            max_x: p1.x.max(p2.x),
            min_y: p1.y.min(p2.y),
            max_y: p1.y.max(p2.y),
        }
    }

    /// Creates the envelope of a sequence of points.
    #[must_use]
    pub fn of<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Self {
        points.into_iter().fold(Self::null(), |mut env, p| {
            env.expand_to_include(p);
            env
        })
    }

    /// Returns whether the envelope contains no points.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.max_x < self.min_x
    }

    /// Returns the minimum x ordinate.
    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    /// Returns the maximum x ordinate.
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    /// Returns the minimum y ordinate.
    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    /// Returns the maximum y ordinate.
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Width of the envelope, zero if null.
    #[must_use]
    pub fn width(&self) -> f64 {
        if self.is_null() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    /// Height of the envelope, zero if null.
    #[must_use]
    pub fn height(&self) -> f64 {
        if self.is_null() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }

    /// Centre point of the envelope, or `None` if null.
    #[must_use]
    pub fn centre(&self) -> Option<Point3> {
        if self.is_null() {
            return None;
        }
        Some(point_2d(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        ))
    }

    /// Grows the envelope to cover `p`.
    pub fn expand_to_include(&mut self, p: &Point3) {
        if self.is_null() {
            self.min_x = p.x;
            self.max_x = p.x;
            self.min_y = p.y;
            self.max_y = p.y;
            return;
        }
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_y = self.max_y.max(p.y);
    }

    /// Grows the envelope to cover `other`.
    pub fn expand_to_include_envelope(&mut self, other: &Self) {
        if other.is_null() {
            return;
        }
        if self.is_null() {
            *self = *other;
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Whether the point lies in the closed envelope.
    #[must_use]
    pub fn intersects_point(&self, p: &Point3) -> bool {
        !self.is_null()
            && p.x >= self.min_x
            && p.x <= self.max_x
            && p.y >= self.min_y
            && p.y <= self.max_y
    }

    /// Whether two closed envelopes share at least one point.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        !(other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    /// Same as [`Envelope::intersects_point`]; the boundary counts as inside.
    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        self.intersects_point(p)
    }

    /// Whether the horizontal line at `y` crosses the envelope.
    #[must_use]
    pub fn intersects_horizontal_line(&self, y: f64) -> bool {
        !self.is_null() && y >= self.min_y && y <= self.max_y
    }
}

/// Tests whether `q` lies in the envelope spanned by `p1` and `p2`.
#[must_use]
pub fn envelope_intersects_point(p1: &Point3, p2: &Point3, q: &Point3) -> bool {
    q.x >= p1.x.min(p2.x) && q.x <= p1.x.max(p2.x) && q.y >= p1.y.min(p2.y) && q.y <= p1.y.max(p2.y)
}

/// Tests whether the envelopes spanned by `p1, p2` and by `q1, q2` intersect.
#[must_use]
pub fn envelopes_intersect(p1: &Point3, p2: &Point3, q1: &Point3, q2: &Point3) -> bool {
    let min_q = q1.x.min(q2.x);
    let max_q = q1.x.max(q2.x);
    let min_p = p1.x.min(p2.x);
    let max_p = p1.x.max(p2.x);
    if min_p > max_q || max_p < min_q {
        return false;
    }
    let min_q = q1.y.min(q2.y);
    let max_q = q1.y.max(q2.y);
    let min_p = p1.y.min(p2.y);
    let max_p = p1.y.max(p2.y);
    !(min_p > max_q || max_p < min_q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_envelope_contains_nothing() {
        let env = Envelope::null();
        assert!(env.is_null());
        assert!(!env.intersects_point(&point_2d(0.0, 0.0)));
        assert!(env.centre().is_none());
        assert!(env.width().abs() < f64::EPSILON);
    }

    #[test]
    fn expansion_tracks_extent() {
        let pts = [point_2d(1.0, 5.0), point_2d(-2.0, 3.0), point_2d(4.0, -1.0)];
        let env = Envelope::of(&pts);
        assert!((env.min_x() + 2.0).abs() < f64::EPSILON);
        assert!((env.max_x() - 4.0).abs() < f64::EPSILON);
        assert!((env.min_y() + 1.0).abs() < f64::EPSILON);
        assert!((env.max_y() - 5.0).abs() < f64::EPSILON);
        assert!((env.width() - 6.0).abs() < f64::EPSILON);
        assert!((env.height() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn boundary_counts_as_intersecting() {
        let a = Envelope::from_points(&point_2d(0.0, 0.0), &point_2d(1.0, 1.0));
        let b = Envelope::from_points(&point_2d(1.0, 1.0), &point_2d(2.0, 2.0));
        let c = Envelope::from_points(&point_2d(1.5, 0.0), &point_2d(2.0, 0.5));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.contains(&point_2d(1.0, 0.5)));
    }

    #[test]
    fn static_segment_tests() {
        let p1 = point_2d(0.0, 0.0);
        let p2 = point_2d(2.0, 2.0);
        assert!(envelope_intersects_point(&p1, &p2, &point_2d(1.0, 2.0)));
        assert!(!envelope_intersects_point(&p1, &p2, &point_2d(3.0, 1.0)));
        assert!(envelopes_intersect(&p1, &p2, &point_2d(2.0, 0.0), &point_2d(5.0, -1.0)));
        assert!(!envelopes_intersect(&p1, &p2, &point_2d(3.0, 0.0), &point_2d(5.0, 1.0)));
    }
}

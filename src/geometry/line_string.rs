use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::is_closed;
use crate::math::{Envelope, Point3};

/// An ordered sequence of vertices joined by straight segments.
///
/// A non-empty line string has at least two vertices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString {
    points: Vec<Point3>,
}

impl LineString {
    /// Creates a line string from its vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidLineStringSize`] if exactly one vertex is given.
    pub fn new(points: Vec<Point3>) -> Result<Self> {
        if points.len() == 1 {
            return Err(GeometryError::InvalidLineStringSize(1).into());
        }
        Ok(Self { points })
    }

    /// Creates an empty line string.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the vertices in order.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Returns the vertex at `index`, if any.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&Point3> {
        self.points.get(index)
    }

    /// Returns whether there are no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the first and last vertex coincide.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        is_closed(&self.points)
    }

    /// Consecutive vertex pairs.
    #[must_use]
    pub fn segments(&self) -> impl Iterator<Item = (&Point3, &Point3)> {
        self.points.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Returns the planar bounding box of the vertices.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        Envelope::of(&self.points)
    }
}

/// A closed line string with zero or at least four vertices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearRing {
    line: LineString,
}

impl LinearRing {
    /// Creates a ring, validating closure and vertex count.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::RingNotClosed`] if the first and last vertex
    /// differ, or [`GeometryError::InvalidRingSize`] for 1 to 3 vertices.
    pub fn new(points: Vec<Point3>) -> Result<Self> {
        if points.is_empty() {
            return Ok(Self::default());
        }
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            if !is_closed(&points) {
                return Err(GeometryError::RingNotClosed {
                    first_x: first.x,
                    first_y: first.y,
                    last_x: last.x,
                    last_y: last.y,
                }
                .into());
            }
        }
        if points.len() < 4 {
            return Err(GeometryError::InvalidRingSize(points.len()).into());
        }
        Ok(Self {
            line: LineString { points },
        })
    }

    /// Returns the vertices in order.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        self.line.points()
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.line.num_points()
    }

    /// Returns whether there are no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Returns the ring as a line string.
    #[must_use]
    pub fn as_line_string(&self) -> &LineString {
        &self.line
    }

    /// Returns the planar bounding box of the vertices.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        self.line.envelope()
    }
}

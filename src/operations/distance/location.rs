use crate::math::Point3;

/// Where on a geometry component a nearest point was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryPosition {
    /// At a point component.
    Vertex,
    /// On the segment starting at the given vertex index of a line or ring.
    Segment(usize),
    /// In the interior of a polygon.
    InsideArea,
}

/// A point on a geometry, identified by component and position.
///
/// The component index counts the non-collection leaves of the geometry in
/// traversal order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryLocation {
    component: usize,
    position: GeometryPosition,
    point: Point3,
}

impl GeometryLocation {
    /// Creates a new location.
    #[must_use]
    pub fn new(component: usize, position: GeometryPosition, point: Point3) -> Self {
        Self {
            component,
            position,
            point,
        }
    }

    /// Returns the index of the component among the flattened leaves.
    #[must_use]
    pub fn component(&self) -> usize {
        self.component
    }

    /// Returns where on the component the point lies.
    #[must_use]
    pub fn position(&self) -> GeometryPosition {
        self.position
    }

    /// Returns the located point.
    #[must_use]
    pub fn point(&self) -> Point3 {
        self.point
    }

    /// Returns whether the point lies in the interior of a polygon.
    #[must_use]
    pub fn is_inside_area(&self) -> bool {
        self.position == GeometryPosition::InsideArea
    }

    /// Index of the segment the point lies on, if it lies on linework.
    #[must_use]
    pub fn segment_index(&self) -> Option<usize> {
        match self.position {
            GeometryPosition::Segment(i) => Some(i),
            GeometryPosition::Vertex | GeometryPosition::InsideArea => None,
        }
    }
}

use super::line_string::LinearRing;
use crate::error::{GeometryError, Result};
use crate::math::{Envelope, Point3};

/// A planar area bounded by one shell ring and zero or more hole rings.
///
/// Holes are assumed to lie inside the shell and not to cross it or each
/// other; this is not verified.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    shell: LinearRing,
    holes: Vec<LinearRing>,
}

impl Polygon {
    /// Creates a polygon from validated rings.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyShellWithHoles`] if the shell is empty
    /// while holes are present.
    pub fn new(shell: LinearRing, holes: Vec<LinearRing>) -> Result<Self> {
        if shell.is_empty() && holes.iter().any(|h| !h.is_empty()) {
            return Err(GeometryError::EmptyShellWithHoles(holes.len()).into());
        }
        Ok(Self { shell, holes })
    }

    /// Creates a polygon directly from ring coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if any ring is malformed.
    pub fn from_coords(shell: Vec<Point3>, holes: Vec<Vec<Point3>>) -> Result<Self> {
        let shell = LinearRing::new(shell)?;
        let holes = holes
            .into_iter()
            .map(LinearRing::new)
            .collect::<Result<Vec<_>>>()?;
        Self::new(shell, holes)
    }

    /// Returns the outer ring.
    #[must_use]
    pub fn shell(&self) -> &LinearRing {
        &self.shell
    }

    /// Returns the inner rings.
    #[must_use]
    pub fn holes(&self) -> &[LinearRing] {
        &self.holes
    }

    /// Shell followed by every hole.
    #[must_use]
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.shell).chain(self.holes.iter())
    }

    /// Returns whether the shell is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shell.is_empty()
    }

    /// Returns the number of vertices over all rings.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.rings().map(LinearRing::num_points).sum()
    }

    /// Returns the planar bounding box of the shell.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        self.shell.envelope()
    }
}

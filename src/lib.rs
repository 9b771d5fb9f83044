pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{GeokernError, Result};
pub use geometry::{Geometry, LineString, LinearRing, Location, Polygon};
pub use math::{Envelope, Point3};

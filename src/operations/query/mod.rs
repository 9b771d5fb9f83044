mod centroid;
mod interior_point;
mod interior_point_area;
mod interior_point_line;
mod interior_point_point;
mod minimum_bounding_circle;

pub use centroid::Centroid;
pub use interior_point::interior_point;
pub use interior_point_area::InteriorPointArea;
pub use interior_point_line::InteriorPointLine;
pub use interior_point_point::InteriorPointPoint;
pub use minimum_bounding_circle::{MinimumBoundingCircle, DEFAULT_CIRCLE_SEGMENTS};

mod distance_op;
mod location;
mod planar_polygon;

pub use distance_op::{distance, is_within_distance, nearest_points, Distance3D};
pub use location::{GeometryLocation, GeometryPosition};
pub use planar_polygon::PlanarPolygon3D;

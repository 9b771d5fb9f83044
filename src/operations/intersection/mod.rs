mod line_intersection;
mod non_robust;
mod rectangle;
mod robust;

pub use line_intersection::{compute_edge_distance, IntersectionKind, LineIntersection, LineIntersector};
pub use non_robust::NonRobustLineIntersector;
pub use rectangle::RectangleLineIntersector;
pub use robust::RobustLineIntersector;

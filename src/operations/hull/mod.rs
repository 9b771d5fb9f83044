mod convex_hull;

pub use convex_hull::{ConvexHull, DEFAULT_MAX_POINTS_BEFORE_REDUCTION};

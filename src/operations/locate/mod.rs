mod bintree;
mod indexed;
mod monotone_chain;
mod point_locator;
mod ray_crossing;

pub use bintree::{Bintree, Interval};
pub use indexed::IndexedPointInAreaLocator;
pub use monotone_chain::{y_monotone_chains, MonotoneChain};
pub use point_locator::PointLocator;
pub use ray_crossing::{locate_point_in_ring, RayCrossingCounter};

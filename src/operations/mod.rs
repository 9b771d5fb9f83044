pub mod distance;
pub mod hull;
pub mod intersection;
pub mod locate;
pub mod query;

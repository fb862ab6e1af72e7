pub mod registry;
pub mod tracker;

pub use registry::{VisibilityRegistry, VisibilitySnapshot};
pub use tracker::VisibilityTracker;

pub mod camera;
pub mod geo;
pub mod ids;

// Foundation crate: small, well-tested primitives only.
pub use camera::*;
pub use geo::*;
pub use ids::*;

//! Collision entity bound to one resolved segment.

mod handler;
mod types;

pub use handler::BoundaryCollider;
pub use types::{BoundCoordinates, COLLIDER_OFFSET, DEBUG_LINE_Z_OFFSET};

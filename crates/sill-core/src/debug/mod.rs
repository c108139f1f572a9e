//! Debug polylines for window outlines and resolved top edges.
//!
//! Drawing is purely observational: nothing here feeds back into the resolver.

mod handler;
mod types;

pub use handler::debug_lines;
pub use types::{DebugDrawMode, DebugLine};

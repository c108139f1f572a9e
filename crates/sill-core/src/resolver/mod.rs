//! Segment resolver: the unobstructed top edges of a window stack.

mod handler;
mod types;

pub use handler::{display_border, resolve_top_borders, to_screen_points};
pub use types::{FLOOR_ID, ScreenGeometry, Segment};

use serde::{Deserialize, Serialize};

use crate::geometry::Point2;

/// Minimum collider thickness, also the downward nudge of the centre.
pub const COLLIDER_OFFSET: f32 = 0.1;

/// Debug lines are drawn this far in front of the collider plane.
pub const DEBUG_LINE_Z_OFFSET: f32 = 10.0;

/// Start, end and centre of a boundary in one coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundCoordinates {
    pub start: Point2,
    pub end: Point2,
    pub center: Point2,
}

impl BoundCoordinates {
    pub fn new(start: Point2, end: Point2, center: Point2) -> Self {
        Self { start, end, center }
    }
}

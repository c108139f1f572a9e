use serde::{Deserialize, Serialize};

use crate::geometry::Point3;

pub use sill_config::DrawMode as DebugDrawMode;

/// One polyline in Y-up screen space, labelled with what it outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugLine {
    pub label: String,
    pub points: Vec<Point3>,
}

impl DebugLine {
    pub fn is_closed(&self) -> bool {
        self.points.len() > 2 && self.points.first() == self.points.last()
    }
}

use serde::{Deserialize, Serialize};

use crate::geometry::Point3;
use crate::window::DisplayInfo;

/// ID of the floor segment appended to every resolved frame.
pub const FLOOR_ID: &str = "FLOOR_0_0";

/// A walkable line in Y-up screen space with a stable ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point3,
    pub end: Point3,
    pub id: String,
}

impl Segment {
    pub fn new(start: Point3, end: Point3, id: impl Into<String>) -> Self {
        Self {
            start,
            end,
            id: id.into(),
        }
    }

    pub fn length(&self) -> f32 {
        let d = self.end - self.start;
        (d.x * d.x + d.y * d.y).sqrt()
    }
}

/// The display the frame is resolved against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenGeometry {
    pub width: f32,
    pub height: f32,
    /// Left edge of the display in OS pixels, subtracted from window x values.
    pub origin_x: f32,
    /// Synthetic z given to every segment.
    pub depth: f32,
}

impl ScreenGeometry {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            origin_x: 0.0,
            depth,
        }
    }

    pub fn from_display(display: &DisplayInfo, depth: f32) -> Self {
        Self {
            width: display.screen_width() as f32,
            height: display.screen_height() as f32,
            origin_x: display.monitor_area.left as f32,
            depth,
        }
    }
}

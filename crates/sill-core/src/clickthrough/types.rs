use serde::{Deserialize, Serialize};

use crate::geometry::{Point2, WindowRect};

/// Read access to the rendered frame, available once rendering finished.
pub trait FramebufferSampler {
    /// Alpha (0.0 to 1.0) of the pixel at `(x, y)` in Y-up framebuffer
    /// coordinates, or `None` if the pixel cannot be read.
    fn alpha_at(&self, x: u32, y: u32) -> Option<f32>;
}

/// Outcome of one click-through probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickDecision {
    /// `true` when the pointer is over a fully transparent pixel (or off
    /// screen) and clicks should reach the window underneath.
    pub pass_through: bool,
    /// Pointer position the decision was made for, in screen pixels.
    pub position: Point2,
}

/// A framebuffer that is fully transparent except for opaque rectangles.
///
/// Rectangles use Y-up pixel coordinates like the framebuffer.
#[derive(Debug, Clone, Default)]
pub struct SolidSampler {
    opaque: Vec<WindowRect>,
    unreadable: bool,
}

impl SolidSampler {
    pub fn transparent() -> Self {
        Self::default()
    }

    pub fn with_opaque_rect(mut self, rect: WindowRect) -> Self {
        self.opaque.push(rect);
        self
    }

    /// Every read fails.
    pub fn unreadable() -> Self {
        Self {
            opaque: Vec::new(),
            unreadable: true,
        }
    }
}

impl FramebufferSampler for SolidSampler {
    fn alpha_at(&self, x: u32, y: u32) -> Option<f32> {
        if self.unreadable {
            return None;
        }
        let (x, y) = (x as i64, y as i64);
        let hit = self.opaque.iter().any(|r| {
            x >= i64::from(r.left)
                && x < i64::from(r.right)
                && y >= i64::from(r.top)
                && y < i64::from(r.bottom)
        });
        Some(if hit { 1.0 } else { 0.0 })
    }
}

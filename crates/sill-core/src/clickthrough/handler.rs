use tracing::debug;

use super::types::{ClickDecision, FramebufferSampler};
use crate::geometry::Point2;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    /// Needs a framebuffer read at the end of the frame.
    Sample { x: u32, y: u32, position: Point2 },
    /// Decided without reading pixels.
    Decided(ClickDecision),
}

/// Two-phase click pass-through test.
///
/// [`request`](Self::request) records the pointer during the frame; the
/// pixel can only be read once rendering is done, which is when
/// [`resolve`](Self::resolve) runs. A pointer outside the screen is not over
/// the companion and resolves to pass-through without sampling.
#[derive(Debug, Default)]
pub struct ClickThroughProbe {
    pending: Option<Pending>,
}

impl ClickThroughProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pointer (Y-up screen pixels) for this frame's test.
    /// A later request in the same frame replaces an earlier one.
    pub fn request(&mut self, pointer: Point2, screen_width: f32, screen_height: f32) {
        let outside = pointer.x < 0.0
            || pointer.y < 0.0
            || pointer.x > screen_width - 1.0
            || pointer.y > screen_height - 1.0;

        self.pending = Some(if outside {
            Pending::Decided(ClickDecision {
                pass_through: true,
                position: pointer,
            })
        } else {
            Pending::Sample {
                x: pointer.x as u32,
                y: pointer.y as u32,
                position: pointer,
            }
        });
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Finish the pending test, if any.
    ///
    /// Clicks pass through only where the framebuffer is fully transparent.
    /// An unreadable pixel counts as transparent so a broken read never
    /// traps the user's clicks.
    pub fn resolve(&mut self, sampler: &dyn FramebufferSampler) -> Option<ClickDecision> {
        let decision = match self.pending.take()? {
            Pending::Decided(decision) => decision,
            Pending::Sample { x, y, position } => {
                let alpha = sampler.alpha_at(x, y);
                if alpha.is_none() {
                    debug!(event = "core.clickthrough.sample_failed", x = x, y = y);
                }
                ClickDecision {
                    pass_through: alpha.is_none_or(|a| a == 0.0),
                    position,
                }
            }
        };
        Some(decision)
    }
}

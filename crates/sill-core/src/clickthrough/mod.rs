//! Deferred "does this click pass through the companion window" test.

mod handler;
mod types;

pub use handler::ClickThroughProbe;
pub use types::{ClickDecision, FramebufferSampler, SolidSampler};

//! The per-frame composition root tying the pipeline together.

mod handler;
mod types;

pub use handler::Playspace;
pub use types::FrameReport;

//! Keeps pooled colliders in step with the resolved segments.

mod handler;
mod types;

pub use handler::BoundarySynchronizer;
pub use types::SyncReport;

use serde::{Deserialize, Serialize};

use crate::sync::SyncReport;

/// Summary of one [`super::Playspace::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// 1-based frame number
    pub frame: u64,
    /// Visible windows returned by the query
    pub windows: usize,
    /// Segments resolved, floor included
    pub segments: usize,
    pub sync: SyncReport,
    /// Colliders destroyed by an opportunistic cull this frame
    pub culled: usize,
    /// Events published during the tick
    pub events: usize,
    /// Smoothed frames per second after this tick
    pub fps: f32,
}

use super::types::{DebugDrawMode, DebugLine};
use crate::resolver::{ScreenGeometry, Segment, to_screen_points};
use crate::window::WindowRecord;

/// Polylines to draw for `mode`.
///
/// `WindowBorders` outlines every window as a closed rectangle;
/// `WindowTops` draws each resolved segment as a two-point line.
pub fn debug_lines(
    mode: DebugDrawMode,
    windows: &[WindowRecord],
    segments: &[Segment],
    screen: &ScreenGeometry,
) -> Vec<DebugLine> {
    match mode {
        DebugDrawMode::Off => Vec::new(),
        DebugDrawMode::WindowBorders => windows
            .iter()
            .map(|window| {
                let p = to_screen_points(&window.rect, screen);
                DebugLine {
                    label: format!("{}_{}", window.title, window.handle),
                    points: vec![
                        p.top_left,
                        p.top_right,
                        p.bottom_right,
                        p.bottom_left,
                        p.top_left,
                    ],
                }
            })
            .collect(),
        DebugDrawMode::WindowTops => segments
            .iter()
            .map(|segment| DebugLine {
                label: segment.id.clone(),
                points: vec![segment.start, segment.end],
            })
            .collect(),
    }
}

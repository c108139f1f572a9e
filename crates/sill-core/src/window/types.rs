use serde::{Deserialize, Serialize};

use crate::geometry::WindowRect;

/// A window as reported by the platform, before its title is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWindow {
    /// Opaque OS handle
    pub handle: u64,
    /// Window rectangle in OS pixels
    pub rect: WindowRect,
    /// Stacking depth, 0 = frontmost
    pub depth: u32,
    /// Whether the OS reports the window as visible (not minimized or hidden)
    pub is_visible: bool,
}

/// A visible top-level window for the current frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    /// Opaque OS handle
    pub handle: u64,
    /// Window title, empty when the OS reports none
    pub title: String,
    /// Window rectangle in OS pixels
    pub rect: WindowRect,
    /// Stacking depth, 0 = frontmost; smaller values occlude larger ones
    pub depth: u32,
}

impl WindowRecord {
    pub fn new(handle: u64, title: impl Into<String>, rect: WindowRect, depth: u32) -> Self {
        Self {
            handle,
            title: title.into(),
            rect,
            depth,
        }
    }
}

/// Information about a monitor/display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInfo {
    /// Enumeration index
    pub index: usize,
    /// Display name
    pub name: String,
    /// Full monitor rectangle in OS pixels
    pub monitor_area: WindowRect,
    /// Usable area excluding task bars and docks
    pub work_area: WindowRect,
    /// Whether this is the primary display
    pub is_primary: bool,
}

impl DisplayInfo {
    /// A 1920x1080 display at the origin, used when the OS reports none.
    pub fn fallback() -> Self {
        let area = WindowRect::new(0, 0, 1920, 1080);
        Self {
            index: 0,
            name: "Fallback Display".to_string(),
            monitor_area: area,
            work_area: area,
            is_primary: true,
        }
    }

    pub fn screen_width(&self) -> i32 {
        self.monitor_area.width()
    }

    pub fn screen_height(&self) -> i32 {
        self.monitor_area.height()
    }
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::geometry::Point2;

/// Platform virtual-key code as delivered by the keyboard hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VirtualKey(pub u32);

impl VirtualKey {
    pub fn code(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FsChangeKind {
    Created,
    Deleted,
}

/// Something that happened to the playspace during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayspaceEvent {
    /// Result of the click pass-through test. `intercepted` means the click
    /// landed on the companion rather than passing to the window below.
    WindowClick { intercepted: bool, position: Point2 },
    /// The current display changed size (or a different display was selected).
    WindowResize {
        old_width: i32,
        old_height: i32,
        width: i32,
        height: i32,
    },
    FileDrop {
        paths: Vec<PathBuf>,
        position: Point2,
    },
    KeyDown { key: VirtualKey },
    KeyUp { key: VirtualKey },
    FileSystemChange {
        kind: FsChangeKind,
        path: PathBuf,
        name: String,
    },
    ScaleChange { old: f32, new: f32 },
}

/// Discriminant of [`PlayspaceEvent`], used to filter subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    WindowClick,
    WindowResize,
    FileDrop,
    KeyDown,
    KeyUp,
    FileSystemChange,
    ScaleChange,
}

impl PlayspaceEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PlayspaceEvent::WindowClick { .. } => EventKind::WindowClick,
            PlayspaceEvent::WindowResize { .. } => EventKind::WindowResize,
            PlayspaceEvent::FileDrop { .. } => EventKind::FileDrop,
            PlayspaceEvent::KeyDown { .. } => EventKind::KeyDown,
            PlayspaceEvent::KeyUp { .. } => EventKind::KeyUp,
            PlayspaceEvent::FileSystemChange { .. } => EventKind::FileSystemChange,
            PlayspaceEvent::ScaleChange { .. } => EventKind::ScaleChange,
        }
    }
}

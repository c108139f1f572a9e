use std::fmt;
use std::path::PathBuf;

use crate::events::VirtualKey;
use crate::geometry::Point2;

/// The process-wide intercepts a backend can install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    ClickThrough,
    Keyboard,
    FileDrop,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HookKind::ClickThrough => "click-through",
            HookKind::Keyboard => "keyboard",
            HookKind::FileDrop => "file-drop",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Down,
    Up,
}

/// One key transition captured by the keyboard hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: VirtualKey,
    pub transition: KeyTransition,
}

impl KeyEvent {
    pub fn down(code: u32) -> Self {
        Self {
            key: VirtualKey(code),
            transition: KeyTransition::Down,
        }
    }

    pub fn up(code: u32) -> Self {
        Self {
            key: VirtualKey(code),
            transition: KeyTransition::Up,
        }
    }
}

/// Files dropped onto the companion window, with the drop point in client pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedFiles {
    pub paths: Vec<PathBuf>,
    pub position: Point2,
}

/// Win32 extended window style bits touched by click-through.
pub mod ex_style {
    pub const ACCEPT_FILES: u32 = 0x0000_0010;
    pub const TRANSPARENT: u32 = 0x0000_0020;
    pub const LAYERED: u32 = 0x0008_0000;
}

/// Extended style for the companion window with click-through toggled.
///
/// Only the transparent and accept-files bits change (layered is always
/// set); every other bit of `current` is kept.
pub fn click_through_style(current: u32, allow: bool) -> u32 {
    let style = current | ex_style::LAYERED;
    if allow {
        (style | ex_style::TRANSPARENT) & !ex_style::ACCEPT_FILES
    } else {
        (style | ex_style::ACCEPT_FILES) & !ex_style::TRANSPARENT
    }
}

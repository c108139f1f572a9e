//! Window source backed by the `xcap` crate (Core Graphics, Win32, X11/Wayland).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use tracing::debug;

use crate::geometry::WindowRect;
use crate::window::errors::WindowError;
use crate::window::traits::WindowSource;
use crate::window::types::{DisplayInfo, RawWindow};

/// Native window source.
///
/// `xcap` returns windows front to back, so the enumeration position is used
/// as the stacking depth. The native window objects from the latest
/// enumeration are kept so that a title cache miss can query just that
/// window instead of re-enumerating.
pub struct XcapWindowSource {
    last_enumeration: RefCell<HashMap<u64, xcap::Window>>,
    own_handle: Cell<Option<u64>>,
    own_pid: u32,
}

impl XcapWindowSource {
    pub fn new() -> Self {
        Self {
            last_enumeration: RefCell::new(HashMap::new()),
            own_handle: Cell::new(None),
            own_pid: std::process::id(),
        }
    }
}

impl Default for XcapWindowSource {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowSource for XcapWindowSource {
    fn name(&self) -> &'static str {
        "xcap"
    }

    fn enumerate(&self) -> Result<Vec<RawWindow>, WindowError> {
        let windows = xcap::Window::all().map_err(|e| WindowError::EnumerationFailed {
            message: e.to_string(),
        })?;

        let mut skipped_count = 0;
        let mut result = Vec::with_capacity(windows.len());
        let mut natives = HashMap::with_capacity(windows.len());
        let mut own_handle = None;

        for (position, w) in windows.into_iter().enumerate() {
            let depth = position as u32;

            let id = match w.id() {
                Ok(id) => u64::from(id),
                Err(e) => {
                    debug!(
                        event = "core.window.property_access_failed",
                        property = "id",
                        error = %e
                    );
                    skipped_count += 1;
                    continue;
                }
            };

            let geometry = (|| Some((w.x().ok()?, w.y().ok()?, w.width().ok()?, w.height().ok()?)))();
            let Some((x, y, width, height)) = geometry else {
                debug!(
                    event = "core.window.property_access_failed",
                    property = "geometry",
                    window_id = id
                );
                skipped_count += 1;
                continue;
            };

            if own_handle.is_none() && w.pid().ok() == Some(self.own_pid) {
                own_handle = Some(id);
            }

            let is_minimized = w.is_minimized().unwrap_or(false);
            result.push(RawWindow {
                handle: id,
                rect: WindowRect::from_origin_size(x, y, width, height),
                depth,
                is_visible: !is_minimized,
            });
            natives.insert(id, w);
        }

        if skipped_count > 0 {
            debug!(
                event = "core.window.enumeration_skipped",
                skipped = skipped_count
            );
        }

        *self.last_enumeration.borrow_mut() = natives;
        self.own_handle.set(own_handle);
        Ok(result)
    }

    fn fetch_title(&self, handle: u64) -> Result<String, WindowError> {
        let natives = self.last_enumeration.borrow();
        let window = natives
            .get(&handle)
            .ok_or_else(|| WindowError::TitleQueryFailed {
                handle,
                message: "window not present in the latest enumeration".to_string(),
            })?;
        window.title().map_err(|e| WindowError::TitleQueryFailed {
            handle,
            message: e.to_string(),
        })
    }

    fn displays(&self) -> Result<Vec<DisplayInfo>, WindowError> {
        let monitors = xcap::Monitor::all().map_err(|e| WindowError::MonitorEnumerationFailed {
            message: e.to_string(),
        })?;

        let result = monitors
            .into_iter()
            .enumerate()
            .filter_map(|(idx, m)| {
                let x = m.x().ok()?;
                let y = m.y().ok()?;
                let width = m.width().ok()?;
                let height = m.height().ok()?;
                let name = m.name().unwrap_or_else(|_| format!("Display {}", idx + 1));
                let area = WindowRect::from_origin_size(x, y, width, height);

                Some(DisplayInfo {
                    index: idx,
                    name,
                    monitor_area: area,
                    // xcap does not expose the work area; the full monitor is used.
                    work_area: area,
                    is_primary: m.is_primary().unwrap_or(false),
                })
            })
            .collect();

        Ok(result)
    }

    fn own_handle(&self) -> Option<u64> {
        self.own_handle.get()
    }
}

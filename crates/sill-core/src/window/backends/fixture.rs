//! In-memory window source for tests and headless runs.

use std::cell::Cell;

use crate::geometry::WindowRect;
use crate::window::errors::WindowError;
use crate::window::traits::WindowSource;
use crate::window::types::{DisplayInfo, RawWindow};

#[derive(Debug, Clone)]
struct FixtureWindow {
    raw: RawWindow,
    title: String,
}

/// A [`WindowSource`] serving a fixed window stack.
///
/// Windows added with the `with_*` builders get a depth equal to their
/// insertion position, hidden ones included, the same way a real front-to-back
/// enumeration assigns depth.
#[derive(Debug, Default)]
pub struct StaticWindowSource {
    windows: Vec<FixtureWindow>,
    displays: Vec<DisplayInfo>,
    own_handle: Option<u64>,
    fail_enumeration: bool,
    failing_titles: Vec<u64>,
    title_fetches: Cell<usize>,
}

impl StaticWindowSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(self, handle: u64, title: &str, rect: WindowRect) -> Self {
        let depth = self.windows.len() as u32;
        self.with_window_at_depth(handle, title, rect, depth)
    }

    pub fn with_hidden_window(mut self, handle: u64, title: &str, rect: WindowRect) -> Self {
        let depth = self.windows.len() as u32;
        self.windows.push(FixtureWindow {
            raw: RawWindow {
                handle,
                rect,
                depth,
                is_visible: false,
            },
            title: title.to_string(),
        });
        self
    }

    pub fn with_window_at_depth(
        mut self,
        handle: u64,
        title: &str,
        rect: WindowRect,
        depth: u32,
    ) -> Self {
        self.windows.push(FixtureWindow {
            raw: RawWindow {
                handle,
                rect,
                depth,
                is_visible: true,
            },
            title: title.to_string(),
        });
        self
    }

    pub fn with_display(mut self, display: DisplayInfo) -> Self {
        self.displays.push(display);
        self
    }

    /// Add a primary display of the given size at the origin.
    pub fn with_screen(self, width: i32, height: i32) -> Self {
        let index = self.displays.len();
        self.with_display(DisplayInfo {
            index,
            name: format!("Display {}", index + 1),
            monitor_area: WindowRect::new(0, 0, width, height),
            work_area: WindowRect::new(0, 0, width, height),
            is_primary: index == 0,
        })
    }

    pub fn with_own_handle(mut self, handle: u64) -> Self {
        self.own_handle = Some(handle);
        self
    }

    /// Make every enumeration call fail.
    pub fn failing(mut self) -> Self {
        self.fail_enumeration = true;
        self
    }

    /// Make title queries for `handle` fail.
    pub fn with_failing_title(mut self, handle: u64) -> Self {
        self.failing_titles.push(handle);
        self
    }

    /// Replace the whole window stack, keeping displays and failure settings.
    pub fn replace_windows(&mut self, windows: Vec<(u64, &str, WindowRect)>) {
        self.windows = windows
            .into_iter()
            .enumerate()
            .map(|(depth, (handle, title, rect))| FixtureWindow {
                raw: RawWindow {
                    handle,
                    rect,
                    depth: depth as u32,
                    is_visible: true,
                },
                title: title.to_string(),
            })
            .collect();
    }

    /// Replace the display list, e.g. to simulate a resolution change.
    pub fn set_displays(&mut self, displays: Vec<DisplayInfo>) {
        self.displays = displays;
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.fail_enumeration = failing;
    }

    /// Number of `fetch_title` calls served so far.
    pub fn title_fetches(&self) -> usize {
        self.title_fetches.get()
    }
}

impl WindowSource for StaticWindowSource {
    fn name(&self) -> &'static str {
        "static"
    }

    fn enumerate(&self) -> Result<Vec<RawWindow>, WindowError> {
        if self.fail_enumeration {
            return Err(WindowError::EnumerationFailed {
                message: "static source configured to fail".to_string(),
            });
        }
        Ok(self.windows.iter().map(|w| w.raw.clone()).collect())
    }

    fn fetch_title(&self, handle: u64) -> Result<String, WindowError> {
        self.title_fetches.set(self.title_fetches.get() + 1);
        if self.failing_titles.contains(&handle) {
            return Err(WindowError::TitleQueryFailed {
                handle,
                message: "static source configured to fail".to_string(),
            });
        }
        self.windows
            .iter()
            .find(|w| w.raw.handle == handle)
            .map(|w| w.title.clone())
            .ok_or_else(|| WindowError::TitleQueryFailed {
                handle,
                message: "unknown handle".to_string(),
            })
    }

    fn displays(&self) -> Result<Vec<DisplayInfo>, WindowError> {
        if self.fail_enumeration {
            return Err(WindowError::MonitorEnumerationFailed {
                message: "static source configured to fail".to_string(),
            });
        }
        Ok(self.displays.clone())
    }

    fn own_handle(&self) -> Option<u64> {
        self.own_handle
    }
}

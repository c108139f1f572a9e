use tracing::{debug, info, warn};

use super::errors::WindowError;
use super::traits::WindowSource;
use super::types::{DisplayInfo, WindowRecord};
use crate::cache::LruCache;

/// Per-frame window query: a [`WindowSource`] plus the title cache.
pub struct WindowQuery<S> {
    source: S,
    titles: LruCache<u64, String>,
    min_window_size: u32,
}

impl<S: WindowSource> WindowQuery<S> {
    pub fn new(source: S, title_cache_capacity: usize) -> Self {
        Self {
            source,
            titles: LruCache::new(title_cache_capacity),
            min_window_size: 0,
        }
    }

    /// Ignore windows narrower or shorter than `size` pixels.
    pub fn with_min_window_size(mut self, size: u32) -> Self {
        self.min_window_size = size;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn own_handle(&self) -> Option<u64> {
        self.source.own_handle()
    }

    pub fn cached_titles(&self) -> usize {
        self.titles.len()
    }

    /// Visible windows ascending by depth (frontmost first).
    ///
    /// Enumeration failures are logged and yield an empty list so the rest of
    /// the frame still runs with "floor only" surfaces.
    pub fn list_visible_windows(&mut self) -> Vec<WindowRecord> {
        match self.query_windows() {
            Ok(windows) => windows,
            Err(e) => {
                warn!(
                    event = "core.window.list_failed",
                    backend = self.source.name(),
                    error = %e,
                    "Window enumeration failed, continuing with no windows"
                );
                Vec::new()
            }
        }
    }

    /// Strict form of [`list_visible_windows`](Self::list_visible_windows)
    /// that surfaces the enumeration error.
    pub fn query_windows(&mut self) -> Result<Vec<WindowRecord>, WindowError> {
        debug!(event = "core.window.list_started", backend = self.source.name());

        let raw = self.source.enumerate()?;
        let total = raw.len();
        let min = i64::from(self.min_window_size);

        let mut windows: Vec<WindowRecord> = Vec::with_capacity(total);
        for window in raw {
            if !window.is_visible {
                continue;
            }
            if i64::from(window.rect.width()) < min || i64::from(window.rect.height()) < min {
                continue;
            }
            let title = self.title_for(window.handle);
            windows.push(WindowRecord {
                handle: window.handle,
                title,
                rect: window.rect,
                depth: window.depth,
            });
        }
        windows.sort_by_key(|w| w.depth);

        debug!(
            event = "core.window.list_completed",
            enumerated = total,
            visible = windows.len()
        );
        Ok(windows)
    }

    /// Displays known to the OS; empty on failure.
    pub fn displays(&self) -> Vec<DisplayInfo> {
        match self.query_displays() {
            Ok(displays) => displays,
            Err(e) => {
                warn!(
                    event = "core.monitor.list_failed",
                    backend = self.source.name(),
                    error = %e
                );
                Vec::new()
            }
        }
    }

    pub fn query_displays(&self) -> Result<Vec<DisplayInfo>, WindowError> {
        let displays = self.source.displays()?;
        info!(event = "core.monitor.list_completed", count = displays.len());
        Ok(displays)
    }

    /// Cached title, or a fresh OS query on a miss. Failed queries yield an
    /// empty title and are not cached, so the next frame retries.
    fn title_for(&mut self, handle: u64) -> String {
        if let Some(title) = self.titles.try_get(&handle) {
            return title.clone();
        }

        match self.source.fetch_title(handle) {
            Ok(title) => {
                self.titles.insert(handle, title.clone());
                title
            }
            Err(e) => {
                debug!(
                    event = "core.window.title_query_failed",
                    handle = handle,
                    error = %e
                );
                String::new()
            }
        }
    }
}

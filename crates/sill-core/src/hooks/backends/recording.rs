//! In-memory hook backend for tests and headless runs.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::geometry::Point2;
use crate::hooks::errors::HookError;
use crate::hooks::queue::HookQueue;
use crate::hooks::traits::InputHooks;
use crate::hooks::types::{DroppedFiles, HookKind, KeyEvent};

#[derive(Debug, Default)]
struct RecordingState {
    keys: Option<HookQueue<KeyEvent>>,
    drops: Option<HookQueue<DroppedFiles>>,
    click_through_calls: Vec<bool>,
    uninstall_count: usize,
    poll_count: usize,
    failing: HashSet<HookKind>,
}

/// An [`InputHooks`] backend that records calls and lets the caller inject
/// key presses and file drops. Clones share state, so a test can keep one
/// clone while a `HookSet` owns the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingHooks {
    state: Arc<Mutex<RecordingState>>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make installing (or applying) `kind` fail.
    pub fn failing(self, kind: HookKind) -> Self {
        self.lock().failing.insert(kind);
        self
    }

    pub fn press(&self, code: u32) {
        if let Some(keys) = &self.lock().keys {
            keys.push(KeyEvent::down(code));
        }
    }

    pub fn release(&self, code: u32) {
        if let Some(keys) = &self.lock().keys {
            keys.push(KeyEvent::up(code));
        }
    }

    pub fn drop_files(&self, paths: Vec<PathBuf>, position: Point2) {
        if let Some(drops) = &self.lock().drops {
            drops.push(DroppedFiles { paths, position });
        }
    }

    pub fn click_through_calls(&self) -> Vec<bool> {
        self.lock().click_through_calls.clone()
    }

    pub fn uninstall_count(&self) -> usize {
        self.lock().uninstall_count
    }

    pub fn poll_count(&self) -> usize {
        self.lock().poll_count
    }

    fn check(&self, hook: HookKind) -> Result<(), HookError> {
        if self.lock().failing.contains(&hook) {
            return Err(HookError::InstallFailed {
                hook,
                message: "recording backend configured to fail".to_string(),
            });
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, RecordingState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl InputHooks for RecordingHooks {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn install_key_hook(&mut self, queue: HookQueue<KeyEvent>) -> Result<(), HookError> {
        self.check(HookKind::Keyboard)?;
        self.lock().keys = Some(queue);
        Ok(())
    }

    fn install_drop_hook(&mut self, queue: HookQueue<DroppedFiles>) -> Result<(), HookError> {
        self.check(HookKind::FileDrop)?;
        self.lock().drops = Some(queue);
        Ok(())
    }

    fn set_click_through(&mut self, allow: bool) -> Result<(), HookError> {
        self.check(HookKind::ClickThrough)?;
        self.lock().click_through_calls.push(allow);
        Ok(())
    }

    fn poll(&mut self) {
        self.lock().poll_count += 1;
    }

    fn uninstall_all(&mut self) {
        let mut state = self.lock();
        state.keys = None;
        state.drops = None;
        state.uninstall_count += 1;
    }
}

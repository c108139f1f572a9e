use std::collections::HashSet;

use tracing::{info, warn};

use super::errors::HookError;
use super::queue::HookQueue;
use super::traits::InputHooks;
use super::types::{DroppedFiles, HookKind, KeyEvent};

/// Owns an [`InputHooks`] backend for the lifetime of the session.
///
/// Hooks are installed once in [`install`](Self::install); a hook that fails
/// to install is logged and stays unavailable. [`uninstall`](Self::uninstall)
/// runs at most once and `Drop` calls it if the owner did not.
pub struct HookSet<H: InputHooks> {
    hooks: H,
    keys: HookQueue<KeyEvent>,
    drops: HookQueue<DroppedFiles>,
    available: HashSet<HookKind>,
    click_through: Option<bool>,
    uninstalled: bool,
}

impl<H: InputHooks> HookSet<H> {
    pub fn install(mut hooks: H) -> Self {
        let keys = HookQueue::new();
        let drops = HookQueue::new();
        let mut available = HashSet::new();

        info!(event = "core.hooks.install_started", backend = hooks.name());

        if report(hooks.name(), hooks.install_key_hook(keys.clone())) {
            available.insert(HookKind::Keyboard);
        }
        if report(hooks.name(), hooks.install_drop_hook(drops.clone())) {
            available.insert(HookKind::FileDrop);
        }
        // Start with clicks passing through; the first resolved probe decides.
        if report(hooks.name(), hooks.set_click_through(true)) {
            available.insert(HookKind::ClickThrough);
        }

        info!(
            event = "core.hooks.install_completed",
            backend = hooks.name(),
            available = available.len()
        );

        let click_through = available.contains(&HookKind::ClickThrough).then_some(true);
        Self {
            hooks,
            keys,
            drops,
            available,
            click_through,
            uninstalled: false,
        }
    }

    pub fn is_available(&self, kind: HookKind) -> bool {
        !self.uninstalled && self.available.contains(&kind)
    }

    /// Apply a click pass-through decision. Repeated identical decisions do
    /// not reach the backend. Returns whether the window style now matches.
    pub fn set_click_through(&mut self, allow: bool) -> bool {
        if !self.is_available(HookKind::ClickThrough) {
            return false;
        }
        if self.click_through == Some(allow) {
            return true;
        }
        match self.hooks.set_click_through(allow) {
            Ok(()) => {
                self.click_through = Some(allow);
                true
            }
            Err(e) => {
                warn!(
                    event = "core.hooks.click_through_failed",
                    backend = self.hooks.name(),
                    error = %e
                );
                false
            }
        }
    }

    pub fn click_through(&self) -> Option<bool> {
        self.click_through
    }

    /// Let the backend service its message loop.
    pub fn poll(&mut self) {
        if !self.uninstalled {
            self.hooks.poll();
        }
    }

    pub fn drain_keys(&self) -> Vec<KeyEvent> {
        self.keys.drain()
    }

    pub fn drain_drops(&self) -> Vec<DroppedFiles> {
        self.drops.drain()
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Remove every hook. Calling this again is a no-op.
    pub fn uninstall(&mut self) {
        if self.uninstalled {
            return;
        }
        self.uninstalled = true;
        self.hooks.uninstall_all();
        info!(event = "core.hooks.uninstall_completed", backend = self.hooks.name());
    }

    pub fn is_uninstalled(&self) -> bool {
        self.uninstalled
    }
}

impl<H: InputHooks> Drop for HookSet<H> {
    fn drop(&mut self) {
        self.uninstall();
    }
}

fn report(backend: &'static str, result: Result<(), HookError>) -> bool {
    match result {
        Ok(()) => true,
        Err(HookError::Unsupported { hook }) => {
            info!(
                event = "core.hooks.unsupported",
                backend = backend,
                hook = %hook
            );
            false
        }
        Err(e) => {
            warn!(
                event = "core.hooks.install_failed",
                backend = backend,
                error = %e
            );
            false
        }
    }
}

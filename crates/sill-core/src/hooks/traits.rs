//! Input hook backend trait definition.

use super::errors::HookError;
use super::queue::HookQueue;
use super::types::{DroppedFiles, KeyEvent};

/// Process-wide input intercepts owned by the companion process.
///
/// Hook callbacks run on the platform's message loop and only push onto the
/// queues they were given; the tick drains those queues.
pub trait InputHooks {
    /// The canonical name of this backend (e.g., "windows", "unsupported").
    fn name(&self) -> &'static str;

    /// Install the global low-level keyboard hook.
    fn install_key_hook(&mut self, queue: HookQueue<KeyEvent>) -> Result<(), HookError>;

    /// Install the file-drop hook on the companion window.
    fn install_drop_hook(&mut self, queue: HookQueue<DroppedFiles>) -> Result<(), HookError>;

    /// Let clicks pass through the companion window (`true`) or capture them.
    fn set_click_through(&mut self, allow: bool) -> Result<(), HookError>;

    /// Service the platform message queue so hook callbacks get to run.
    fn poll(&mut self) {}

    /// Remove every installed hook. Must tolerate being called when nothing
    /// is installed.
    fn uninstall_all(&mut self);
}

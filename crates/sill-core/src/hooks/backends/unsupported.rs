use crate::hooks::errors::HookError;
use crate::hooks::queue::HookQueue;
use crate::hooks::traits::InputHooks;
use crate::hooks::types::{DroppedFiles, HookKind, KeyEvent};

/// Backend for platforms without native hook support.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedHooks;

impl InputHooks for UnsupportedHooks {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn install_key_hook(&mut self, _queue: HookQueue<KeyEvent>) -> Result<(), HookError> {
        Err(HookError::Unsupported {
            hook: HookKind::Keyboard,
        })
    }

    fn install_drop_hook(&mut self, _queue: HookQueue<DroppedFiles>) -> Result<(), HookError> {
        Err(HookError::Unsupported {
            hook: HookKind::FileDrop,
        })
    }

    fn set_click_through(&mut self, _allow: bool) -> Result<(), HookError> {
        Err(HookError::Unsupported {
            hook: HookKind::ClickThrough,
        })
    }

    fn uninstall_all(&mut self) {}
}

mod recording;
mod unsupported;
#[cfg(target_os = "windows")]
mod windows;

pub use recording::RecordingHooks;
pub use unsupported::UnsupportedHooks;
#[cfg(target_os = "windows")]
pub use self::windows::WindowsHooks;

use tracing::debug;

/// The native hook backend for this platform.
#[cfg(target_os = "windows")]
pub type PlatformHooks = WindowsHooks;

/// The native hook backend for this platform.
#[cfg(not(target_os = "windows"))]
pub type PlatformHooks = UnsupportedHooks;

/// Build the native hook backend, attached to the companion window if known.
pub fn platform_hooks(own_handle: Option<u64>) -> PlatformHooks {
    debug!(
        event = "core.hooks.backend_selected",
        os = std::env::consts::OS,
        own_handle = ?own_handle
    );
    #[cfg(target_os = "windows")]
    {
        WindowsHooks::new(own_handle)
    }
    #[cfg(not(target_os = "windows"))]
    {
        UnsupportedHooks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::InputHooks;

    #[test]
    fn test_platform_hooks_does_not_panic() {
        let hooks = platform_hooks(None);
        assert!(!hooks.name().is_empty());
    }
}

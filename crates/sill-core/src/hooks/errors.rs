use crate::errors::SillError;

use super::types::HookKind;

#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("Failed to install {hook} hook: {message}")]
    InstallFailed { hook: HookKind, message: String },

    #[error("{hook} hook is not supported on this platform")]
    Unsupported { hook: HookKind },
}

impl SillError for HookError {
    fn error_code(&self) -> &'static str {
        match self {
            HookError::InstallFailed { .. } => "HOOK_INSTALL_FAILED",
            HookError::Unsupported { .. } => "HOOK_UNSUPPORTED",
        }
    }
}

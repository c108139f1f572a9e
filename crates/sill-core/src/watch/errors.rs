use std::path::PathBuf;

use crate::errors::SillError;

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Failed to create file watcher: {message}")]
    WatcherCreateFailed { message: String },

    #[error("Failed to watch '{}': {message}", path.display())]
    WatchFailed { path: PathBuf, message: String },
}

impl SillError for WatchError {
    fn error_code(&self) -> &'static str {
        match self {
            WatchError::WatcherCreateFailed { .. } => "WATCHER_CREATE_FAILED",
            WatchError::WatchFailed { .. } => "WATCH_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, WatchError::WatchFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_failed_display() {
        let error = WatchError::WatchFailed {
            path: PathBuf::from("/missing"),
            message: "No such file or directory".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to watch '/missing': No such file or directory"
        );
        assert_eq!(error.error_code(), "WATCH_FAILED");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_create_failed_is_not_user_error() {
        let error = WatchError::WatcherCreateFailed {
            message: "inotify limit".to_string(),
        };
        assert_eq!(error.error_code(), "WATCHER_CREATE_FAILED");
        assert!(!error.is_user_error());
    }
}

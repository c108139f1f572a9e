use crate::errors::SillError;

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Failed to enumerate windows: {message}")]
    EnumerationFailed { message: String },

    #[error("Failed to read title of window {handle}: {message}")]
    TitleQueryFailed { handle: u64, message: String },

    #[error("Failed to enumerate monitors: {message}")]
    MonitorEnumerationFailed { message: String },

    #[error("Monitor not found at index: {index}")]
    MonitorNotFound { index: usize },
}

impl SillError for WindowError {
    fn error_code(&self) -> &'static str {
        match self {
            WindowError::EnumerationFailed { .. } => "WINDOW_ENUMERATION_FAILED",
            WindowError::TitleQueryFailed { .. } => "WINDOW_TITLE_QUERY_FAILED",
            WindowError::MonitorEnumerationFailed { .. } => "MONITOR_ENUMERATION_FAILED",
            WindowError::MonitorNotFound { .. } => "MONITOR_NOT_FOUND",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, WindowError::MonitorNotFound { .. })
    }
}

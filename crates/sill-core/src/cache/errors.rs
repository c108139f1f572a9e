use crate::errors::SillError;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache key not found: {key}")]
    KeyNotFound { key: String },
}

impl SillError for CacheError {
    fn error_code(&self) -> &'static str {
        match self {
            CacheError::KeyNotFound { .. } => "CACHE_KEY_NOT_FOUND",
        }
    }
}

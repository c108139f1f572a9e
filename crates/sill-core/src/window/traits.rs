//! Window source trait definition.

use super::errors::WindowError;
use super::types::{DisplayInfo, RawWindow};

/// Platform abstraction over the OS window stack.
///
/// Backends only enumerate; title caching and the "failure means empty"
/// policy live in [`super::WindowQuery`] so that every backend behaves the
/// same way under errors.
pub trait WindowSource {
    /// The canonical name of this backend (e.g., "xcap", "static").
    fn name(&self) -> &'static str;

    /// All top-level windows, ordered front to back.
    fn enumerate(&self) -> Result<Vec<RawWindow>, WindowError>;

    /// Read the title of one window. Potentially expensive.
    fn fetch_title(&self, handle: u64) -> Result<String, WindowError>;

    /// All displays known to the OS.
    fn displays(&self) -> Result<Vec<DisplayInfo>, WindowError>;

    /// Handle of the application's own window, excluded from surfaces.
    fn own_handle(&self) -> Option<u64> {
        None
    }
}

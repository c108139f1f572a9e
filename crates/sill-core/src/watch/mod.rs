//! Directory watching that surfaces file creation and deletion as playspace events.

mod errors;
mod handler;

pub use errors::WatchError;
pub use handler::FileSystemHooks;

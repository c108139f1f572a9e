//! Platform window source: visible windows and displays for the current frame.

pub mod backends;
pub mod errors;
pub mod handler;
pub mod traits;
pub mod types;

pub use backends::{StaticWindowSource, XcapWindowSource};
pub use errors::WindowError;
pub use handler::WindowQuery;
pub use traits::WindowSource;
pub use types::{DisplayInfo, RawWindow, WindowRecord};

//! Bounded least-recently-used cache.
//!
//! Used by the window query to avoid asking the OS for the title of the same
//! long-lived window handle on every frame.

mod errors;
mod lru;

pub use errors::CacheError;
pub use lru::LruCache;

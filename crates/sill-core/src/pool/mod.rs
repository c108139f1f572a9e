//! Generic pool of reusable entities.

mod handler;
mod types;

pub use handler::ObjectPool;
pub use types::{PoolHandle, Poolable};

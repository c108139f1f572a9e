//! Screen, scaled-screen and world coordinate conversions.

mod ortho;
mod traits;

pub use ortho::OrthoCameraTransform;
pub use traits::CoordinateTransform;

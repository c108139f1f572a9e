mod fixture;
mod xcap;

pub use fixture::StaticWindowSource;
pub use self::xcap::XcapWindowSource;

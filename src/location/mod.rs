mod ip_provider;
mod provider;
mod static_provider;
mod tracker;

pub use ip_provider::IpLocationProvider;
pub use provider::{LocationProvider, Permission, PositionError};
pub use static_provider::StaticLocationProvider;
pub use tracker::{Tracker, TrackingError, WatchOptions};

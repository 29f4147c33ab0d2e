mod interfaces;
mod monitor;
mod probe;
mod sysfs_interfaces;

pub use interfaces::{InterfaceError, InterfaceState, NetworkInterfaces};
pub use monitor::{ConnectivityMonitor, MonitorSettings};
pub use probe::{HttpProbe, ProbeError, ReachabilityProbe};
pub use sysfs_interfaces::SysfsInterfaces;

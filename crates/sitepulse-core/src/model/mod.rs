// Domain model -- the typed view the dashboard layer reads.

pub mod device;
pub mod site;

pub use device::{Device, DeviceKind, DeviceState, DeviceStats};
pub use site::{ClientCounts, ClientType, Site, WanInterface};

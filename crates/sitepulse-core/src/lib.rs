// sitepulse-core: polling/aggregation engine between sitepulse-api and
// the dashboard's entity layer.
//
// The caller owns configuration and scheduling; this crate owns one
// refresh cycle and the snapshot it produces.

pub mod aggregator;
pub mod config;
mod convert;
pub mod error;
pub mod model;
pub mod snapshot;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregator::Aggregator;
pub use config::ConnectionConfig;
pub use error::CoreError;
pub use model::{
    ClientCounts, ClientType, Device, DeviceKind, DeviceState, DeviceStats, Site, WanInterface,
};
pub use snapshot::{DeviceEntry, ErrorScope, ItemError, Snapshot};

// Error classification tags surface on snapshot item errors.
pub use sitepulse_api::ErrorKind;

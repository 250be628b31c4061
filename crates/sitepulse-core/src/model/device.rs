// ── Device domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Device category. Display-only -- the API and this engine treat all
/// kinds uniformly, so this is a tag, not a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DeviceKind {
    Gateway,
    Switch,
    AccessPoint,
    Other,
}

/// Device operational state as reported by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DeviceState {
    Online,
    Offline,
    PendingAdoption,
    Updating,
    GettingReady,
    Adopting,
    Deleting,
    ConnectionInterrupted,
    Isolated,
    /// State string the controller sent but this build doesn't know.
    Unknown,
}

impl DeviceState {
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

/// One adopted device, denormalized for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: Uuid,
    /// Owning site. Back-reference only; the snapshot's site map owns
    /// the `Site` value.
    pub site_id: Uuid,
    pub name: Option<String>,
    pub model: Option<String>,
    pub kind: DeviceKind,
    pub state: DeviceState,
    pub firmware_version: Option<String>,
    pub firmware_updatable: bool,
    /// Uplink throughput, bytes/s. From the statistics endpoint; absent
    /// when that fetch failed this cycle.
    pub uplink_tx_rate_bps: Option<i64>,
    pub uplink_rx_rate_bps: Option<i64>,
    pub last_heartbeat: Option<DateTime<Utc>>,
}

/// Utilization figures from the statistics endpoint. Merged by device
/// id; a device whose statistics fetch failed keeps an absent stats
/// slot, never gets dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceStats {
    pub cpu_utilization_pct: Option<f64>,
    pub memory_utilization_pct: Option<f64>,
    pub uptime_secs: Option<u64>,
    pub load_average_1m: Option<f64>,
    pub load_average_5m: Option<f64>,
    pub load_average_15m: Option<f64>,
}

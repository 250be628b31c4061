// ── Snapshot: the immutable per-cycle result ──
//
// Built once per refresh cycle and swapped in wholesale; readers always
// hold either the previous complete snapshot or this one, never a
// half-built value. No methods beyond field access and equality.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use sitepulse_api::ErrorKind;

use crate::model::{Device, DeviceStats, Site};

/// One device plus whatever statistics this cycle managed to fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceEntry {
    pub device: Device,
    /// `None` when this cycle's statistics fetch failed (recorded in the
    /// snapshot's error set).
    pub stats: Option<DeviceStats>,
}

/// What one contained failure was scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorScope {
    /// The site's device listing failed; it contributes zero devices.
    SiteDevices { site_id: Uuid },
    /// The site's client listing failed; its counters are unknown.
    SiteClients { site_id: Uuid },
    /// The site's WAN fetch failed; enrichment absent.
    SiteWans { site_id: Uuid },
    /// Device detail failed; the device is excluded this cycle.
    DeviceDetail { device_id: Uuid },
    /// Device statistics failed; the device stays, stats absent.
    DeviceStats { device_id: Uuid },
}

/// A failure contained to one site/device/resource this cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemError {
    pub scope: ErrorScope,
    pub kind: ErrorKind,
    pub message: String,
}

impl ItemError {
    pub(crate) fn new(scope: ErrorScope, err: &sitepulse_api::Error) -> Self {
        Self {
            scope,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// The denormalized result of one refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub sites: HashMap<Uuid, Site>,
    pub devices: HashMap<Uuid, DeviceEntry>,
    pub fetched_at: DateTime<Utc>,
    /// Item-level failures encountered this cycle. Diagnostics only --
    /// their presence never invalidates the rest of the snapshot.
    pub errors: Vec<ItemError>,
}

impl Snapshot {
    /// Field-wise equality ignoring the fetch timestamp. Two cycles
    /// against an unchanged backend compare equal under this.
    pub fn same_content(&self, other: &Self) -> bool {
        self.sites == other.sites && self.devices == other.devices && self.errors == other.errors
    }
}

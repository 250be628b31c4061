// ── Site domain types ──

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a client is attached to the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ClientType {
    Wired,
    Wireless,
    Vpn,
    /// Anything else (e.g. Teleport). Counted in the total only.
    Other,
}

/// Per-site client counters computed from the client listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCounts {
    pub total: u32,
    pub wired: u32,
    pub wireless: u32,
    pub vpn: u32,
}

impl ClientCounts {
    /// Tally a client listing by connection type.
    pub fn tally<I: IntoIterator<Item = ClientType>>(types: I) -> Self {
        let mut counts = Self::default();
        for t in types {
            counts.total += 1;
            match t {
                ClientType::Wired => counts.wired += 1,
                ClientType::Wireless => counts.wireless += 1,
                ClientType::Vpn => counts.vpn += 1,
                ClientType::Other => {}
            }
        }
        counts
    }
}

/// WAN interface status, folded into the site as optional enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WanInterface {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub status: Option<String>,
}

/// One monitored site. Refreshed wholesale every cycle, never mutated
/// in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: Uuid,
    pub name: String,
    /// `None` when this cycle's client listing failed -- explicitly
    /// unknown, not zero.
    pub client_counts: Option<ClientCounts>,
    /// Devices that made it into this cycle's snapshot for this site.
    pub device_count: u32,
    /// `None` when this cycle's WAN fetch failed.
    pub wans: Option<Vec<WanInterface>>,
}

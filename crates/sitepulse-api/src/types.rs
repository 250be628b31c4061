//! Wire types for the Integration API.
//!
//! Field names use camelCase via `#[serde(rename_all = "camelCase")]`.
//! Fields the dashboard never reads are left out rather than carried
//! as opaque JSON.

use serde::{Deserialize, Serialize};

use uuid::Uuid;

// ── Pagination ───────────────────────────────────────────────────────

/// Pagination envelope returned by all list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub offset: i64,
    pub limit: i32,
    pub count: i32,
    pub total_count: i64,
    pub data: Vec<T>,
}

// ── Application info ─────────────────────────────────────────────────

/// From `GET /v1/info` — setup-time liveness check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInfo {
    pub application_version: String,
}

// ── Sites ────────────────────────────────────────────────────────────

/// From `GET /v1/sites`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSummary {
    pub id: Uuid,
    pub name: String,
}

// ── Devices ──────────────────────────────────────────────────────────

/// Listing item from `GET /v1/sites/{siteId}/devices`.
///
/// The listing only drives the per-device fan-out; identity and state
/// come from the detail fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSummary {
    pub id: Uuid,
    /// ISO 8601; some firmware versions include it in the listing
    /// payload. Heartbeat fallback when detail and statistics lack one.
    #[serde(default)]
    pub last_heartbeat_at: Option<String>,
}

/// From `GET /v1/sites/{siteId}/devices/{deviceId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetails {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub state: String,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub firmware_version: Option<String>,
    #[serde(default)]
    pub firmware_updatable: bool,
    #[serde(default)]
    pub features: Vec<String>,
    /// ISO 8601; some firmware versions include it in the detail payload.
    #[serde(default)]
    pub last_heartbeat_at: Option<String>,
}

/// Uplink throughput block nested inside the statistics payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UplinkStats {
    #[serde(default)]
    pub tx_rate_bps: Option<i64>,
    #[serde(default)]
    pub rx_rate_bps: Option<i64>,
}

/// From `GET /v1/sites/{siteId}/devices/{deviceId}/statistics/latest`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatistics {
    #[serde(default)]
    pub uptime_sec: Option<i64>,
    #[serde(default)]
    pub cpu_utilization_pct: Option<f64>,
    #[serde(default)]
    pub memory_utilization_pct: Option<f64>,
    #[serde(default)]
    pub load_average_1_min: Option<f64>,
    #[serde(default)]
    pub load_average_5_min: Option<f64>,
    #[serde(default)]
    pub load_average_15_min: Option<f64>,
    /// ISO 8601 date-time.
    #[serde(default)]
    pub last_heartbeat_at: Option<String>,
    #[serde(default)]
    pub uplink: Option<UplinkStats>,
}

// ── Clients ──────────────────────────────────────────────────────────

/// Listing item from `GET /v1/sites/{siteId}/clients`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    /// `WIRED`, `WIRELESS`, `VPN`, or `TELEPORT`.
    #[serde(rename = "type")]
    pub client_type: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    /// ISO 8601 date-time.
    #[serde(default)]
    pub connected_at: Option<String>,
}

// ── WANs ─────────────────────────────────────────────────────────────

/// Item from `GET /v1/sites/{siteId}/wans`.
///
/// Optional enrichment; modeled leniently since the payload shape is
/// firmware-dependent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WanStatus {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

// ── Wire → domain conversion ──
//
// All mapping from sitepulse-api response types into the domain model
// lives here. Lenient by policy: unknown enum strings map to catch-all
// variants and unparseable timestamps become None -- a cosmetic field
// never fails a cycle.

use chrono::{DateTime, Utc};

use sitepulse_api::types::{
    ClientSummary, DeviceDetails, DeviceStatistics, DeviceSummary, WanStatus,
};

use crate::model::{ClientType, Device, DeviceKind, DeviceState, DeviceStats, WanInterface};
use uuid::Uuid;

pub(crate) fn device_state(raw: &str) -> DeviceState {
    match raw {
        "ONLINE" => DeviceState::Online,
        "OFFLINE" => DeviceState::Offline,
        "PENDING_ADOPTION" => DeviceState::PendingAdoption,
        "UPDATING" => DeviceState::Updating,
        "GETTING_READY" => DeviceState::GettingReady,
        "ADOPTING" => DeviceState::Adopting,
        "DELETING" => DeviceState::Deleting,
        "CONNECTION_INTERRUPTED" => DeviceState::ConnectionInterrupted,
        "ISOLATED" => DeviceState::Isolated,
        _ => DeviceState::Unknown,
    }
}

/// Classify a device by model-name prefix. Ubiquiti model codes start
/// with a family prefix (UDM/UXG/UCG gateways, USW switches, UAP/U6/U7
/// access points).
pub(crate) fn device_kind(model: Option<&str>) -> DeviceKind {
    let Some(model) = model else {
        return DeviceKind::Other;
    };
    let model = model.to_ascii_uppercase();

    if ["UDM", "UXG", "UCG", "UGW", "USG"]
        .iter()
        .any(|p| model.starts_with(p))
    {
        DeviceKind::Gateway
    } else if model.starts_with("USW") || model.starts_with("US-") {
        DeviceKind::Switch
    } else if ["UAP", "U6", "U7", "UK-"].iter().any(|p| model.starts_with(p)) {
        DeviceKind::AccessPoint
    } else {
        DeviceKind::Other
    }
}

pub(crate) fn client_type(raw: &str) -> ClientType {
    match raw.to_ascii_uppercase().as_str() {
        "WIRED" => ClientType::Wired,
        "WIRELESS" => ClientType::Wireless,
        "VPN" => ClientType::Vpn,
        _ => ClientType::Other,
    }
}

/// Parse an ISO 8601 timestamp leniently; anything unparseable is None.
pub(crate) fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Assemble the denormalized `Device` from its detail payload plus
/// whatever statistics this cycle managed to fetch. The heartbeat
/// prefers detail, then statistics, then the listing payload.
pub(crate) fn device(
    site_id: Uuid,
    listed: &DeviceSummary,
    detail: &DeviceDetails,
    stats: Option<&DeviceStatistics>,
) -> Device {
    let uplink = stats.and_then(|s| s.uplink.as_ref());
    let heartbeat = parse_timestamp(detail.last_heartbeat_at.as_deref())
        .or_else(|| parse_timestamp(stats.and_then(|s| s.last_heartbeat_at.as_deref())))
        .or_else(|| parse_timestamp(listed.last_heartbeat_at.as_deref()));

    Device {
        id: detail.id,
        site_id,
        name: detail.name.clone(),
        model: detail.model.clone(),
        kind: device_kind(detail.model.as_deref()),
        state: device_state(&detail.state),
        firmware_version: detail.firmware_version.clone(),
        firmware_updatable: detail.firmware_updatable,
        uplink_tx_rate_bps: uplink.and_then(|u| u.tx_rate_bps),
        uplink_rx_rate_bps: uplink.and_then(|u| u.rx_rate_bps),
        last_heartbeat: heartbeat,
    }
}

pub(crate) fn device_stats(stats: &DeviceStatistics) -> DeviceStats {
    DeviceStats {
        cpu_utilization_pct: stats.cpu_utilization_pct,
        memory_utilization_pct: stats.memory_utilization_pct,
        uptime_secs: stats.uptime_sec.and_then(|v| u64::try_from(v).ok()),
        load_average_1m: stats.load_average_1_min,
        load_average_5m: stats.load_average_5_min,
        load_average_15m: stats.load_average_15_min,
    }
}

pub(crate) fn client_type_of(client: &ClientSummary) -> ClientType {
    client_type(&client.client_type)
}

pub(crate) fn wan_interface(wan: &WanStatus) -> WanInterface {
    WanInterface {
        id: wan.id,
        name: wan.name.clone(),
        status: wan.status.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_strings_round_trip() {
        assert_eq!(device_state("ONLINE"), DeviceState::Online);
        assert_eq!(device_state("CONNECTION_INTERRUPTED"), DeviceState::ConnectionInterrupted);
        assert_eq!(device_state("SOMETHING_NEW"), DeviceState::Unknown);
    }

    #[test]
    fn kind_from_model_prefix() {
        assert_eq!(device_kind(Some("UDM-Pro")), DeviceKind::Gateway);
        assert_eq!(device_kind(Some("USW-Lite-8-PoE")), DeviceKind::Switch);
        assert_eq!(device_kind(Some("U6-LR")), DeviceKind::AccessPoint);
        assert_eq!(device_kind(Some("UP-Chime")), DeviceKind::Other);
        assert_eq!(device_kind(None), DeviceKind::Other);
    }

    #[test]
    fn client_type_is_case_insensitive() {
        assert_eq!(client_type("wired"), ClientType::Wired);
        assert_eq!(client_type("WIRELESS"), ClientType::Wireless);
        assert_eq!(client_type("TELEPORT"), ClientType::Other);
    }

    #[test]
    fn bad_timestamps_become_none() {
        assert!(parse_timestamp(Some("2025-06-01T12:00:00Z")).is_some());
        assert!(parse_timestamp(Some("not-a-date")).is_none());
        assert!(parse_timestamp(None).is_none());
    }

    #[test]
    fn heartbeat_falls_back_to_listing_payload() {
        let listed = DeviceSummary {
            id: Uuid::new_v4(),
            last_heartbeat_at: Some("2025-06-01T12:00:00Z".to_owned()),
        };
        let detail = DeviceDetails {
            id: listed.id,
            name: None,
            model: None,
            state: "ONLINE".to_owned(),
            mac_address: None,
            ip_address: None,
            firmware_version: None,
            firmware_updatable: false,
            features: Vec::new(),
            last_heartbeat_at: None,
        };

        // Neither detail nor statistics carry a heartbeat.
        let from_listing = device(Uuid::new_v4(), &listed, &detail, None);
        assert!(from_listing.last_heartbeat.is_some());

        // Detail wins when it has one.
        let detail_with = DeviceDetails {
            last_heartbeat_at: Some("2025-06-02T00:00:00Z".to_owned()),
            ..detail
        };
        let from_detail = device(Uuid::new_v4(), &listed, &detail_with, None);
        assert_eq!(
            from_detail.last_heartbeat,
            parse_timestamp(Some("2025-06-02T00:00:00Z"))
        );
    }

    #[test]
    fn stats_with_negative_uptime_drop_it() {
        let wire = DeviceStatistics {
            uptime_sec: Some(-1),
            ..DeviceStatistics::default()
        };
        assert_eq!(device_stats(&wire).uptime_secs, None);
    }
}

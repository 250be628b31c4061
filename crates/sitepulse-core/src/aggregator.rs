// ── Aggregator: one refresh cycle, one snapshot ──
//
// Cycle shape: list sites (cycle-fatal on failure) → per site, list
// devices/clients/wans concurrently → per device, fetch detail and
// statistics concurrently → merge by device id → swap the finished
// snapshot into the single-slot holder.
//
// Partial-failure policy lives entirely here: fetchers never retry and
// never contain. A contained failure becomes an ItemError on the
// snapshot; only the sites listing, a rejected API key, or the cycle
// budget can fail the whole cycle, in which case the previous snapshot
// stays in place.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::Utc;
use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, warn};
use uuid::Uuid;

use sitepulse_api::types::{DeviceSummary, SiteSummary};
use sitepulse_api::{ApiClient, ErrorKind, Transport};

use crate::config::ConnectionConfig;
use crate::convert;
use crate::error::CoreError;
use crate::model::{ClientCounts, Site};
use crate::snapshot::{DeviceEntry, ErrorScope, ItemError, Snapshot};

/// Run a future while holding a slot on the cycle-wide semaphore.
///
/// Every HTTP call in a cycle goes through this, so the number of
/// in-flight requests never exceeds the configured cap. The permit is
/// released on completion, success or failure, by RAII.
async fn gated<T>(sem: &Semaphore, fut: impl Future<Output = T>) -> T {
    let _permit = sem
        .acquire()
        .await
        .expect("cycle semaphore is never closed");
    fut.await
}

/// Everything one site contributed to the cycle.
struct SiteOutcome {
    site: Site,
    devices: Vec<(Uuid, DeviceEntry)>,
    errors: Vec<ItemError>,
}

/// The polling/aggregation engine for one controller.
///
/// `refresh` takes `&mut self`: a cycle cannot overlap a previous one by
/// construction, which keeps the concurrency reasoning local to a single
/// cycle. Reading the current snapshot only needs `&self` and is safe
/// from any number of readers while a cycle runs.
pub struct Aggregator {
    config: ConnectionConfig,
    client: ApiClient,
    current: ArcSwapOption<Snapshot>,
}

impl Aggregator {
    /// Build from connection parameters. Performs no I/O; call
    /// [`verify_connection`](Self::verify_connection) to check reachability.
    pub fn new(config: ConnectionConfig) -> Result<Self, CoreError> {
        if config.max_in_flight == 0 {
            return Err(CoreError::Config {
                message: "max_in_flight must be at least 1".into(),
            });
        }

        let transport = Transport {
            host: config.host.clone(),
            api_key: config.api_key.clone(),
            verify_tls: config.verify_tls,
            timeout: config.request_timeout,
        };
        let client = ApiClient::new(&transport, config.page_size, config.max_pages)?;

        Ok(Self {
            config,
            client,
            current: ArcSwapOption::const_empty(),
        })
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// The snapshot produced by the last successful cycle, if any.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.load_full()
    }

    // ── Setup-time calls ─────────────────────────────────────────────

    /// Connectivity check against `/v1/info`. Not part of the cycle.
    pub async fn verify_connection(&self) -> Result<(), CoreError> {
        let info = self.client.get_info().await?;
        debug!(version = %info.application_version, "controller reachable");
        Ok(())
    }

    /// Discover sites the API key can see. Used once at setup to let the
    /// caller pick which to monitor; counters are unset here.
    pub async fn list_available_sites(&self) -> Result<Vec<Site>, CoreError> {
        let sites = self.client.list_sites().await?;
        Ok(sites
            .into_iter()
            .map(|s| Site {
                id: s.id,
                name: s.name,
                client_counts: None,
                device_count: 0,
                wans: None,
            })
            .collect())
    }

    // ── The cycle ────────────────────────────────────────────────────

    /// Run one refresh cycle and return the new snapshot.
    ///
    /// On a cycle-fatal error (sites listing, revoked key, cycle budget
    /// exceeded) the previous snapshot is left untouched and the caller
    /// keeps reading it via [`current`](Self::current) -- stale-but-valid
    /// data beats no data.
    pub async fn refresh(&mut self) -> Result<Arc<Snapshot>, CoreError> {
        let budget = self.config.cycle_timeout;
        match tokio::time::timeout(budget, self.run_cycle()).await {
            Ok(result) => result,
            Err(_) => {
                warn!(budget_secs = budget.as_secs(), "refresh cycle timed out");
                Err(CoreError::CycleTimeout {
                    budget_secs: budget.as_secs(),
                })
            }
        }
    }

    async fn run_cycle(&self) -> Result<Arc<Snapshot>, CoreError> {
        let listed = self
            .client
            .list_sites()
            .await
            .map_err(CoreError::from_sites_failure)?;

        let selected: Vec<SiteSummary> = if self.config.sites.is_empty() {
            listed
        } else {
            listed
                .into_iter()
                .filter(|s| self.config.sites.contains(&s.id))
                .collect()
        };

        let semaphore = Semaphore::new(self.config.max_in_flight);

        // Sites are independent of each other; collect them all
        // concurrently under the shared in-flight cap.
        let outcomes = join_all(
            selected
                .iter()
                .map(|site| self.collect_site(site, &semaphore)),
        )
        .await;

        let mut sites = HashMap::new();
        let mut devices = HashMap::new();
        let mut errors = Vec::new();
        for outcome in outcomes {
            devices.extend(outcome.devices);
            errors.extend(outcome.errors);
            sites.insert(outcome.site.id, outcome.site);
        }

        // A key revoked mid-cycle shows up as contained 401s. Nothing
        // gathered under a rejected key is trustworthy, so surface it
        // instead of swapping in a degraded snapshot.
        if errors.iter().any(|e| e.kind == ErrorKind::Unauthorized) {
            return Err(CoreError::Unauthorized);
        }

        let snapshot = Arc::new(Snapshot {
            sites,
            devices,
            fetched_at: Utc::now(),
            errors,
        });

        debug!(
            sites = snapshot.sites.len(),
            devices = snapshot.devices.len(),
            item_errors = snapshot.errors.len(),
            "refresh cycle complete"
        );

        self.current.store(Some(Arc::clone(&snapshot)));
        Ok(snapshot)
    }

    /// Gather one site's listings and fan out over its devices.
    async fn collect_site(&self, summary: &SiteSummary, sem: &Semaphore) -> SiteOutcome {
        let site_id = summary.id;

        // Three independent listings; a failure in one never cancels the
        // others.
        let (devices_res, clients_res, wans_res) = tokio::join!(
            gated(sem, self.client.list_devices(&site_id)),
            gated(sem, self.client.list_clients(&site_id)),
            gated(sem, self.client.list_wans(&site_id)),
        );

        let mut errors = Vec::new();

        let client_counts = match clients_res {
            Ok(clients) => Some(ClientCounts::tally(
                clients.iter().map(convert::client_type_of),
            )),
            Err(err) => {
                warn!(%site_id, error = %err, "client listing failed; counters unknown");
                errors.push(ItemError::new(ErrorScope::SiteClients { site_id }, &err));
                None
            }
        };

        let wans = match wans_res {
            Ok(wans) => Some(wans.iter().map(convert::wan_interface).collect()),
            Err(err) => {
                warn!(%site_id, error = %err, "WAN fetch failed; enrichment absent");
                errors.push(ItemError::new(ErrorScope::SiteWans { site_id }, &err));
                None
            }
        };

        let listed = match devices_res {
            Ok(devices) => devices,
            Err(err) => {
                warn!(%site_id, error = %err, "device listing failed; site contributes no devices");
                errors.push(ItemError::new(ErrorScope::SiteDevices { site_id }, &err));
                Vec::new()
            }
        };

        // Per-device fan-out. All tasks join here before merging, and
        // none outlives the cycle.
        let results = join_all(
            listed
                .iter()
                .map(|device| self.collect_device(site_id, device, sem)),
        )
        .await;

        let mut devices = Vec::new();
        for (entry, mut device_errors) in results {
            devices.extend(entry);
            errors.append(&mut device_errors);
        }

        let site = Site {
            id: site_id,
            name: summary.name.clone(),
            client_counts,
            device_count: u32::try_from(devices.len()).unwrap_or(u32::MAX),
            wans,
        };

        SiteOutcome {
            site,
            devices,
            errors,
        }
    }

    /// Fetch one device's detail and statistics concurrently.
    ///
    /// Detail is load-bearing: without it the device's identity and
    /// state cannot be shown, so a detail failure excludes the device.
    /// A statistics failure keeps the device with stats absent.
    async fn collect_device(
        &self,
        site_id: Uuid,
        listed: &DeviceSummary,
        sem: &Semaphore,
    ) -> (Option<(Uuid, DeviceEntry)>, Vec<ItemError>) {
        let device_id = listed.id;

        let (detail_res, stats_res) = tokio::join!(
            gated(sem, self.client.get_device(&site_id, &device_id)),
            gated(sem, self.client.get_device_statistics(&site_id, &device_id)),
        );

        let detail = match detail_res {
            Ok(detail) => detail,
            Err(err) => {
                warn!(%device_id, error = %err, "device detail failed; excluding device this cycle");
                let errors = vec![ItemError::new(ErrorScope::DeviceDetail { device_id }, &err)];
                return (None, errors);
            }
        };

        let mut errors = Vec::new();
        let stats = match stats_res {
            Ok(stats) => Some(stats),
            Err(err) => {
                warn!(%device_id, error = %err, "device statistics failed; keeping device without stats");
                errors.push(ItemError::new(ErrorScope::DeviceStats { device_id }, &err));
                None
            }
        };

        let device = convert::device(site_id, listed, &detail, stats.as_ref());
        let entry = DeviceEntry {
            device,
            stats: stats.as_ref().map(convert::device_stats),
        };

        (Some((device_id, entry)), errors)
    }
}

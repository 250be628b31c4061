// Async client for the controller's Integration API.
//
// Base path: /proxy/network/integration/
// Auth: X-API-Key header (injected by Transport)
//
// One method per endpoint the dashboard polls. Listing endpoints drain
// all pages through `paginate`; no method retries — partial-failure
// policy belongs to the aggregation layer.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::error::Error;
use crate::transport::Transport;
use crate::types::{
    ApplicationInfo, ClientSummary, DeviceDetails, DeviceStatistics, DeviceSummary, Page,
    SiteSummary, WanStatus,
};

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Stateless client for the Integration API.
///
/// Holds only the HTTP client and pagination tuning it was built with.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    page_size: i32,
    max_pages: u32,
}

impl ApiClient {
    /// Build from connection parameters.
    ///
    /// `page_size` is the `limit` sent to listing endpoints; `max_pages`
    /// caps how many pages one listing may consume before the call fails
    /// with [`Error::PaginationLoopDetected`].
    pub fn new(transport: &Transport, page_size: i32, max_pages: u32) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            base_url: transport.base_url()?,
            page_size,
            max_pages,
        })
    }

    /// Join a relative path (e.g. `"v1/sites"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with a slash, so joining `v1/…` works.
        self.base_url
            .join(path)
            .expect("endpoint paths are valid relative URLs")
    }

    // ── HTTP plumbing ────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::classify_status(status, resp).await);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            // Truncate on a char boundary; error pages can be non-ASCII.
            let mut end = body.len().min(200);
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            Error::Malformed {
                message: format!("{e} (body preview: {:?})", &body[..end]),
            }
        })
    }

    async fn classify_status(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Error::Unauthorized;
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Error::NotFound {
                path: resp.url().path().to_owned(),
            };
        }

        let raw = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        Error::ServerError {
            status: status.as_u16(),
            message,
        }
    }

    // ── Paginator ────────────────────────────────────────────────────

    /// Drain a listing endpoint into a complete, server-ordered `Vec`.
    ///
    /// Drives the offset from what the previous page actually returned
    /// and stops on an empty page, a short page, or once `totalCount`
    /// items have been collected. A listing that keeps producing full
    /// pages past `max_pages` fails the whole call — never a silently
    /// truncated list.
    async fn paginate<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        let mut all = Vec::new();
        let mut offset: i64 = 0;
        let limit = usize::try_from(self.page_size).unwrap_or(0);

        for _ in 0..self.max_pages {
            let page: Page<T> = self
                .get_with_params(
                    path,
                    &[
                        ("offset", offset.to_string()),
                        ("limit", self.page_size.to_string()),
                    ],
                )
                .await?;

            let received = page.data.len();
            all.extend(page.data);

            let collected = i64::try_from(all.len()).unwrap_or(i64::MAX);
            if received == 0 || received < limit || collected >= page.total_count {
                return Ok(all);
            }

            offset += i64::try_from(received).unwrap_or(i64::MAX);
        }

        Err(Error::PaginationLoopDetected {
            max_pages: self.max_pages,
        })
    }

    // ━━ Endpoints ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// `GET /v1/info` — connectivity check, used only at setup.
    pub async fn get_info(&self) -> Result<ApplicationInfo, Error> {
        self.get("v1/info").await
    }

    /// `GET /v1/sites` — all sites, fully paginated.
    pub async fn list_sites(&self) -> Result<Vec<SiteSummary>, Error> {
        self.paginate("v1/sites").await
    }

    /// `GET /v1/sites/{id}/devices` — adopted devices, fully paginated.
    pub async fn list_devices(&self, site_id: &Uuid) -> Result<Vec<DeviceSummary>, Error> {
        self.paginate(&format!("v1/sites/{site_id}/devices")).await
    }

    /// `GET /v1/sites/{id}/devices/{id}` — device detail.
    pub async fn get_device(
        &self,
        site_id: &Uuid,
        device_id: &Uuid,
    ) -> Result<DeviceDetails, Error> {
        self.get(&format!("v1/sites/{site_id}/devices/{device_id}"))
            .await
    }

    /// `GET /v1/sites/{id}/devices/{id}/statistics/latest`.
    pub async fn get_device_statistics(
        &self,
        site_id: &Uuid,
        device_id: &Uuid,
    ) -> Result<DeviceStatistics, Error> {
        self.get(&format!(
            "v1/sites/{site_id}/devices/{device_id}/statistics/latest"
        ))
        .await
    }

    /// `GET /v1/sites/{id}/clients` — connected clients, fully paginated.
    pub async fn list_clients(&self, site_id: &Uuid) -> Result<Vec<ClientSummary>, Error> {
        self.paginate(&format!("v1/sites/{site_id}/clients")).await
    }

    /// `GET /v1/sites/{id}/wans` — WAN interfaces.
    ///
    /// Firmware-dependent shape: either a bare JSON array or a `Page`
    /// envelope. Both are accepted.
    pub async fn list_wans(&self, site_id: &Uuid) -> Result<Vec<WanStatus>, Error> {
        let body: Value = self.get(&format!("v1/sites/{site_id}/wans")).await?;

        let items = if body.is_array() {
            body
        } else {
            body.get("data")
                .cloned()
                .unwrap_or_else(|| Value::Array(Vec::new()))
        };

        serde_json::from_value(items).map_err(|e| Error::Malformed {
            message: format!("unexpected WAN payload: {e}"),
        })
    }
}

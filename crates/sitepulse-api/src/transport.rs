// Transport configuration for building reqwest::Client instances.
//
// Holds the fixed connection parameters (host, API key, TLS policy,
// per-call timeout) and nothing else; the client built from it is
// stateless apart from these.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::Error;

/// Path prefix the controller serves the Integration API under.
const BASE_PATH: &str = "/proxy/network/integration";

/// Fixed connection parameters for one controller.
#[derive(Debug, Clone)]
pub struct Transport {
    /// Controller host. Either a bare host (`192.168.1.1`, `udm.local:8443`)
    /// or a full URL; bare hosts get `https://` prepended.
    pub host: String,
    /// Integration API key, sent as `X-API-Key` on every request.
    pub api_key: SecretString,
    /// Verify the controller's TLS certificate. Off for self-signed
    /// local controllers.
    pub verify_tls: bool,
    /// Per-call timeout.
    pub timeout: Duration,
}

impl Transport {
    /// Build a `reqwest::Client` with the API key injected as a default
    /// header on every request.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(self.api_key.expose_secret()).map_err(|e| Error::Unreachable {
                reason: format!("invalid API key header value: {e}"),
            })?;
        key_value.set_sensitive(true);
        headers.insert("X-API-Key", key_value);

        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("sitepulse/0.1.0")
            .default_headers(headers);

        if !self.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder.build().map_err(|e| Error::Unreachable {
            reason: format!("failed to build HTTP client: {e}"),
        })
    }

    /// Resolve the base URL all API paths are joined onto.
    ///
    /// `https://<host>/proxy/network/integration/` — the prefix is only
    /// appended when the host doesn't already carry it, so tests can
    /// point at a mock server with an explicit scheme and port.
    pub fn base_url(&self) -> Result<Url, Error> {
        let raw = self.host.trim_end_matches('/');
        let raw = if raw.contains("://") {
            raw.to_owned()
        } else {
            format!("https://{raw}")
        };

        let mut url = Url::parse(&raw).map_err(|e| Error::Unreachable {
            reason: format!("invalid controller host {raw:?}: {e}"),
        })?;

        let path = url.path().trim_end_matches('/').to_owned();
        if path.ends_with(BASE_PATH) {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}{BASE_PATH}/"));
        }

        Ok(url)
    }
}

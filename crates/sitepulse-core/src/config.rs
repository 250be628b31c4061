// ── Connection configuration ──
//
// Describes how to reach one controller and how hard a refresh cycle
// may push it. Built by the caller (setup wizard, config entry) and
// immutable after that -- core never reads config files.

use std::time::Duration;

use secrecy::SecretString;
use uuid::Uuid;

/// Connection parameters and cycle tuning for one controller.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Controller host: bare host/IP (optionally with port) or full URL.
    pub host: String,
    /// Integration API key.
    pub api_key: SecretString,
    /// Verify the controller's TLS certificate. Off by default: local
    /// controllers ship self-signed certs.
    pub verify_tls: bool,
    /// Sites to monitor. Empty means every site the key can see.
    pub sites: Vec<Uuid>,
    /// Per-call HTTP timeout.
    pub request_timeout: Duration,
    /// Budget for one whole refresh cycle. Must stay below the caller's
    /// poll interval (30 s) so cycles can never overlap the next trigger.
    pub cycle_timeout: Duration,
    /// Page size for listing endpoints.
    pub page_size: i32,
    /// Max pages one listing may consume before it is treated as a
    /// malformed pagination loop.
    pub max_pages: u32,
    /// Cap on simultaneous in-flight requests during a cycle.
    pub max_in_flight: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "192.168.1.1".into(),
            api_key: SecretString::from(String::new()),
            verify_tls: false,
            sites: Vec::new(),
            request_timeout: Duration::from_secs(10),
            cycle_timeout: Duration::from_secs(25),
            page_size: 200,
            max_pages: 50,
            max_in_flight: 16,
        }
    }
}

// ── Core error types ──
//
// Only cycle-fatal failures surface here; item-level failures are
// contained inside the snapshot's error set. Consumers never see raw
// HTTP status codes -- the `From<sitepulse_api::Error>` impl translates
// transport errors into domain variants.

use thiserror::Error;

/// Cycle-fatal errors from the aggregation engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The controller rejected the API key. Nothing this cycle can show.
    #[error("Authentication failed: API key rejected by controller")]
    Unauthorized,

    /// The sites listing failed; with no sites there is nothing to
    /// aggregate, so the previous snapshot is retained.
    #[error("Sites listing failed")]
    SitesListing(#[source] sitepulse_api::Error),

    /// The cycle exceeded its budget and was aborted. The previous
    /// snapshot is retained.
    #[error("Refresh cycle exceeded its {budget_secs}s budget")]
    CycleTimeout { budget_secs: u64 },

    /// Setup-time failure (connectivity check, site discovery).
    #[error("API error")]
    Api(#[from] sitepulse_api::Error),

    /// Invalid connection parameters.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Map a sites-listing failure to its cycle-fatal variant.
    pub(crate) fn from_sites_failure(err: sitepulse_api::Error) -> Self {
        if err.is_unauthorized() {
            Self::Unauthorized
        } else {
            Self::SitesListing(err)
        }
    }
}

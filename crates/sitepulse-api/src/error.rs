use thiserror::Error;

/// Classified failure modes for controller API calls.
///
/// Every transport- and protocol-level failure is folded into one of
/// these variants so the aggregation layer can decide containment
/// without inspecting HTTP status codes or reqwest internals.
#[derive(Debug, Error)]
pub enum Error {
    /// API key rejected by the controller (401/403).
    #[error("API key rejected by controller")]
    Unauthorized,

    /// Network-level failure: connection refused, DNS, TLS handshake.
    #[error("Controller unreachable: {reason}")]
    Unreachable { reason: String },

    /// The requested resource does not exist (404).
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// Controller-side failure (5xx), with whatever message it gave us.
    #[error("Controller error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    /// Non-JSON or schema-violating response body.
    #[error("Malformed response: {message}")]
    Malformed { message: String },

    /// The per-call timeout elapsed.
    #[error("Request timed out")]
    Timeout,

    /// A listing kept producing full pages past the configured cap.
    #[error("Pagination exceeded {max_pages} pages without terminating")]
    PaginationLoopDetected { max_pages: u32 },
}

/// Lightweight tag for an [`Error`], used where the error itself is
/// consumed but its classification must survive (e.g. snapshot item
/// errors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    Unreachable,
    NotFound,
    ServerError,
    Malformed,
    Timeout,
    PaginationLoopDetected,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Unreachable { .. } => ErrorKind::Unreachable,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ServerError { .. } => ErrorKind::ServerError,
            Self::Malformed { .. } => ErrorKind::Malformed,
            Self::Timeout => ErrorKind::Timeout,
            Self::PaginationLoopDetected { .. } => ErrorKind::PaginationLoopDetected,
        }
    }

    /// Returns `true` if re-authenticating (a new API key) might resolve it.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Malformed {
                message: err.to_string(),
            }
        } else {
            // Connect errors, DNS failures, and TLS problems all mean
            // the controller could not be reached.
            Self::Unreachable {
                reason: err.to_string(),
            }
        }
    }
}

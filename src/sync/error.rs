//! Error types for the document synchronization engine

use thiserror::Error;

/// Errors raised by the sync pipeline.
///
/// The variants map the operational taxonomy the trigger endpoint reports:
/// configuration problems are actionable by an operator, network problems are
/// retryable by re-triggering, conflicts mean the remote document moved
/// between fetch and write.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Remote sync is not enabled for this deployment. This is an expected
    /// state, not a defect; the endpoint reports it distinctly.
    #[error("GitHub sync is not configured: {0}")]
    NotConfigured(String),

    /// A configured value is present but malformed (e.g. a private key
    /// without PEM markers). Never reaches the network.
    #[error("invalid sync configuration for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    /// GitHub rejected the signed assertion or the exchanged token.
    #[error("GitHub authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    /// Timeout, connection failure, or 5xx from GitHub. Safe to re-trigger.
    #[error("network error talking to GitHub: {0}")]
    Network(String),

    /// The document changed between fetch and write. The caller decides
    /// whether to re-run; the stale write is never applied.
    #[error("remote document changed since fetch: {path}")]
    Conflict { path: String },

    /// GitHub answered with a shape we could not interpret. The raw payload
    /// is kept for postmortem.
    #[error("unexpected GitHub response while {context}: {payload}")]
    Decode { context: String, payload: String },

    /// Any other non-2xx response, body surfaced verbatim.
    #[error("GitHub request failed ({status}): {body}")]
    Remote { status: u16, body: String },
}

impl SyncError {
    /// Whether re-triggering the whole sync may succeed without operator
    /// intervention.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::Network(_) | SyncError::Conflict { .. })
    }

    /// Classify a transport-level reqwest failure. Timeouts and connection
    /// failures are transient; anything else at this layer is too, since
    /// status-code handling happens before this is called.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SyncError::Network(format!("request timed out: {}", err))
        } else if err.is_connect() {
            SyncError::Network(format!("connection failed: {}", err))
        } else {
            SyncError::Network(err.to_string())
        }
    }

    /// Classify a non-2xx response status shared by the token exchange and
    /// the Contents API calls. Conflict handling is endpoint-specific and
    /// happens before this.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => SyncError::Auth {
                status,
                message: body,
            },
            500..=599 => SyncError::Network(format!("GitHub returned {}: {}", status, body)),
            _ => SyncError::Remote { status, body },
        }
    }
}

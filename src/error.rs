//! Error types for the Event Map server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::sync::SyncError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Sync(e) => sync_error_response(e),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "Database error".to_string(),
                )
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "io_error",
                    "IO error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}

/// Map the sync taxonomy to distinct statuses and tags so the caller can
/// tell an operator problem from a transient one from a lost race.
fn sync_error_response(e: &SyncError) -> (StatusCode, &'static str, String) {
    match e {
        SyncError::NotConfigured(msg) => {
            (StatusCode::SERVICE_UNAVAILABLE, "not_configured", msg.clone())
        }
        SyncError::InvalidConfig { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "invalid_configuration",
            e.to_string(),
        ),
        SyncError::Auth { .. } => {
            tracing::error!("GitHub authentication failed: {}", e);
            (StatusCode::BAD_GATEWAY, "auth_failed", e.to_string())
        }
        SyncError::Network(msg) => (
            StatusCode::BAD_GATEWAY,
            "network_error",
            format!("{} (retry later)", msg),
        ),
        SyncError::Conflict { .. } => (StatusCode::CONFLICT, "conflict", e.to_string()),
        SyncError::Decode { context, payload } => {
            // The raw payload goes to the log, not the response body.
            tracing::error!("Decode error while {}: {}", context, payload);
            (
                StatusCode::BAD_GATEWAY,
                "decode_error",
                format!("unexpected GitHub response while {}", context),
            )
        }
        SyncError::Remote { .. } => (StatusCode::BAD_GATEWAY, "remote_error", e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_error_mapping() {
        let (status, tag, _) =
            sync_error_response(&SyncError::NotConfigured("no app id".to_string()));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(tag, "not_configured");

        let (status, tag, _) = sync_error_response(&SyncError::Conflict {
            path: "example/event-docs:docs/events.md".to_string(),
        });
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(tag, "conflict");

        let (status, tag, _) = sync_error_response(&SyncError::Network("timeout".to_string()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(tag, "network_error");

        let (status, tag, _) = sync_error_response(&SyncError::Auth {
            status: 401,
            message: "bad credentials".to_string(),
        });
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(tag, "auth_failed");
    }
}

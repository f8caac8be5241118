//! Document sync endpoints
//!
//! The administrator-triggered mirror action and its read-only diagnostics
//! log. Duplicate triggers are safe: the losing run of a race observes a
//! conflict and reports "retry later" instead of overwriting.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::events::EventStore;
use crate::state::AppState;
use crate::sync::{LogEntry, SyncError, SyncStatus};

/// Create the sync router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/push", post(trigger_sync))
        .route("/log", get(read_log))
}

/// Success payload of the trigger endpoint
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub success: bool,
    pub status: SyncStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Mirror the current event list to the configured GitHub document.
async fn trigger_sync(State(state): State<AppState>) -> Result<Json<SyncResponse>> {
    let service = match state.sync_service() {
        Some(service) => service,
        None => {
            let err = SyncError::NotConfigured(
                "set GITHUB_APP_ID, GITHUB_APP_PRIVATE_KEY, GITHUB_INSTALLATION_ID, \
                 GITHUB_OWNER and GITHUB_REPO to enable document mirroring"
                    .to_string(),
            );
            state.sync_log().error("Sync rejected", err.to_string()).await;
            return Err(AppError::Sync(err));
        }
    };

    let events = EventStore::new(state.db()).snapshot().await?;
    let outcome = service.sync(&events).await.map_err(AppError::Sync)?;

    Ok(Json(SyncResponse {
        success: true,
        status: outcome.status,
        message: outcome.message,
        url: outcome.url,
    }))
}

/// Read the accumulated diagnostics, oldest first.
async fn read_log(State(state): State<AppState>) -> Json<Vec<LogEntry>> {
    Json(state.sync_log().entries().await)
}
